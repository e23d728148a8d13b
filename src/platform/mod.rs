//! Platform abstraction layer
//!
//! Everything between the host and the simulation:
//! - Input events and sources (`input`)
//! - Frame pacing (`time`)
//! - Presentation of a finished frame ([`Presenter`])
//! - The frame loop itself ([`run`])

pub mod input;
pub mod time;

pub use input::{Autopilot, InputEvent, InputSource, ScriptedInput, frame_input};
pub use time::FrameClock;

use crate::renderer::MeshSurface;
use crate::sim::{GameEvent, Recorder};

/// Shows a finished frame. Failures are logged by the implementation and
/// never stop the loop.
pub trait Presenter {
    fn present(&mut self, mesh: &MeshSurface);
}

/// Presenter for headless runs; keeps frame statistics only
#[derive(Debug, Default)]
pub struct Headless {
    pub frames: u64,
    pub peak_triangles: usize,
    /// Largest vertex upload a GPU host would have made
    pub peak_upload_bytes: usize,
}

impl Presenter for Headless {
    fn present(&mut self, mesh: &MeshSurface) {
        self.frames += 1;
        self.peak_triangles = self.peak_triangles.max(mesh.triangle_count());
        self.peak_upload_bytes = self.peak_upload_bytes.max(mesh.vertex_bytes().len());
    }
}

/// Totals for one call to [`run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub crashes: u32,
    pub restarts: u32,
    pub pipes_passed: u32,
    pub power_ups: u32,
    pub high_score: u32,
    /// Loop ended on a `Quit` event rather than the frame limit
    pub quit: bool,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Crashed(_) => self.crashes += 1,
            GameEvent::Restarted => self.restarts += 1,
            GameEvent::PipePassed { .. } => self.pipes_passed += 1,
            GameEvent::PowerUpCollected(_) => self.power_ups += 1,
            _ => {}
        }
    }
}

/// Drive the session frame by frame until the source quits or `max_frames`
/// is reached. Every frame's input is recorded, so the recorder can be
/// turned into a replay afterwards.
pub fn run(
    recorder: &mut Recorder,
    input: &mut impl InputSource,
    presenter: &mut impl Presenter,
    clock: &mut FrameClock,
    max_frames: Option<u64>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut events = Vec::new();
    let mut mesh = MeshSurface::new();

    while max_frames.is_none_or(|max| summary.frames < max) {
        events.clear();
        input.poll(&recorder.session, &mut events);
        if events.contains(&InputEvent::Quit) {
            summary.quit = true;
            log::info!("Quit requested after {} frames", summary.frames);
            break;
        }

        recorder.tick(&frame_input(&events));
        for event in &recorder.session.events {
            summary.record(event);
        }

        mesh.clear();
        recorder.session.render(&mut mesh);
        presenter.present(&mesh);

        summary.frames += 1;
        clock.wait();
    }

    summary.high_score = recorder.session.high_score;
    summary
}
