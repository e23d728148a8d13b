//! Input events and the sources that produce them

use std::collections::VecDeque;

use crate::consts::*;
use crate::sim::{FrameInput, GameSession, Replay};

/// Host-level input, already mapped from keys or taps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or host asked to stop
    Quit,
    /// Space bar / tap
    Jump,
    /// R key
    Restart,
}

/// Anything that can feed input to the frame loop.
///
/// Sources see the session read-only so a bot can react to game state.
pub trait InputSource {
    fn poll(&mut self, session: &GameSession, out: &mut Vec<InputEvent>);
}

/// Fold one frame's events into the simulation's input. `Quit` is handled
/// by the loop and ignored here.
pub fn frame_input(events: &[InputEvent]) -> FrameInput {
    let mut input = FrameInput::NONE;
    for event in events {
        match event {
            InputEvent::Jump => input.jump = true,
            InputEvent::Restart => input.restart = true,
            InputEvent::Quit => {}
        }
    }
    input
}

/// Plays back a fixed list of frame inputs, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn from_replay(replay: &Replay) -> Self {
        Self::new(replay.frames.iter().copied())
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _session: &GameSession, out: &mut Vec<InputEvent>) {
        let Some(input) = self.frames.pop_front() else {
            out.push(InputEvent::Quit);
            return;
        };
        if input.jump {
            out.push(InputEvent::Jump);
        }
        if input.restart {
            out.push(InputEvent::Restart);
        }
    }
}

/// Demo player: steers toward the gap of the nearest pipe still ahead and
/// restarts shortly after a crash.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames to linger on the game-over screen
    pub restart_delay: u32,
    /// Stop after this many crashes (None = play forever)
    pub max_crashes: Option<u32>,
    waited: u32,
    crashes: u32,
}

/// Dead band around the target so the bot does not flap every frame
const AIM_SLACK: f32 = 8.0;
/// Distance below target at which the bot keeps climbing while still rising
const CATCH_UP: f32 = 60.0;

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            restart_delay: TARGET_FPS,
            max_crashes: None,
            waited: 0,
            crashes: 0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restart_delay(mut self, frames: u32) -> Self {
        self.restart_delay = frames;
        self
    }

    pub fn with_max_crashes(mut self, crashes: u32) -> Self {
        self.max_crashes = Some(crashes);
        self
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }

    /// Vertical position the bird should hold: the middle of the next gap,
    /// or mid-field when no pipe is ahead
    pub fn target_y(session: &GameSession) -> f32 {
        let bird_x = session.bird.pos.x;
        session
            .pipes
            .iter()
            .filter(|p| p.x + p.width > bird_x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|p| p.top_height + p.gap / 2.0)
            .unwrap_or(FIELD_HEIGHT / 2.0)
    }

    /// Flap decision for the current state
    pub fn wants_flap(session: &GameSession) -> bool {
        let bird = &session.bird;
        let below = bird.center().y - Self::target_y(session);
        let near_floor = bird.pos.y + bird.size.y > FIELD_HEIGHT - GROUND_HEIGHT;

        near_floor
            || (below > AIM_SLACK && bird.velocity >= 0.0)
            || (below > CATCH_UP && bird.velocity > JUMP_IMPULSE / 2.0)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, session: &GameSession, out: &mut Vec<InputEvent>) {
        if !session.is_game_over() {
            self.waited = 0;
            if Self::wants_flap(session) {
                out.push(InputEvent::Jump);
            }
            return;
        }

        if self.waited == 0 {
            self.crashes += 1;
            log::debug!("Autopilot crashed ({} so far)", self.crashes);
        }
        if self.max_crashes.is_some_and(|max| self.crashes >= max) {
            out.push(InputEvent::Quit);
            return;
        }

        self.waited += 1;
        if self.waited > self.restart_delay {
            out.push(InputEvent::Restart);
        }
    }
}
