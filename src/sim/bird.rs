//! The player-controlled bird

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::rect::Rect;
use crate::consts::*;
use crate::renderer::{Surface, colors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in px/frame (positive = downward)
    pub velocity: f32,
    /// Tilt in degrees, clamped to ±[`MAX_TILT_DEG`]
    pub tilt: f32,
    pub shield: bool,
    /// Frames of shield left while `shield` is set
    pub shield_frames: u32,
    /// Wing animation phase (radians)
    pub flap_phase: f32,
    /// Frames alive, drives the shield aura pulse
    pub frame: u64,
    pub particles: Vec<Particle>,
    /// Maximum live particles; 0 disables emission
    pub particle_cap: usize,
    /// Pulse the shield aura (off under reduced motion)
    pub pulse_aura: bool,
}

impl Bird {
    pub fn new(particle_cap: usize, pulse_aura: bool) -> Self {
        Self {
            pos: Vec2::new((FIELD_WIDTH / 3.0).floor(), (FIELD_HEIGHT / 2.0).floor()),
            size: Vec2::splat(BIRD_SIZE),
            velocity: 0.0,
            tilt: 0.0,
            shield: false,
            shield_frames: 0,
            flap_phase: 0.0,
            frame: 0,
            particles: Vec::new(),
            particle_cap,
            pulse_aura,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Replace the vertical velocity with the jump impulse
    pub fn jump<R: Rng>(&mut self, rng: &mut R) {
        self.velocity = JUMP_IMPULSE;
        let tail = Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0);
        self.emit(tail, colors::YELLOW, JUMP_BURST, rng);
    }

    /// Advance one frame. Returns true when the bird touches the floor.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.velocity += GRAVITY;
        self.pos.y += self.velocity;

        self.tilt = (self.velocity * TILT_PER_VELOCITY).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        self.flap_phase += FLAP_PHASE_STEP;
        self.frame += 1;

        if self.shield {
            self.shield_frames = self.shield_frames.saturating_sub(1);
            if self.shield_frames == 0 {
                self.shield = false;
            }
        }

        self.particles.retain_mut(|p| p.advance());

        if rng.random_bool(FLIGHT_PARTICLE_CHANCE) {
            let trail = Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0);
            self.emit(trail, colors::SKY_BLUE, 1, rng);
        }

        let floor = FIELD_HEIGHT - self.size.y;
        if self.pos.y >= floor {
            self.pos.y = floor;
            return true;
        }
        false
    }

    pub fn activate_shield(&mut self, duration: u32) {
        self.shield = duration > 0;
        self.shield_frames = duration;
    }

    /// Burst of red particles from the body center
    pub fn spawn_explosion<R: Rng>(&mut self, rng: &mut R) {
        let center = self.center();
        self.emit(center, colors::RED, EXPLOSION_BURST, rng);
    }

    fn emit<R: Rng>(&mut self, at: Vec2, color: [f32; 4], count: usize, rng: &mut R) {
        let count = count.min(self.particle_cap);
        if count == 0 {
            return;
        }
        // Oldest particles make room, in one compaction
        let overflow = (self.particles.len() + count).saturating_sub(self.particle_cap);
        if overflow > 0 {
            self.particles.drain(..overflow);
        }
        for _ in 0..count {
            self.particles.push(Particle::spawn(at, color, rng));
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        for particle in &self.particles {
            particle.render(surface);
        }

        let w = self.size.x;
        let h = self.size.y;

        if self.shield {
            let pulse = if self.pulse_aura {
                (self.frame as f32 * 1000.0 / TARGET_FPS as f32 * 0.01).sin() * 50.0
            } else {
                0.0
            };
            let alpha = (100.0 + pulse.trunc()) / 255.0;
            surface.fill_circle(
                self.center(),
                w / 2.0 + 5.0,
                colors::with_alpha(colors::SHIELD_AURA, alpha),
            );
        }

        // Bird drawn around its center so the tilt pivots in place
        surface.push_transform(self.center(), self.tilt.to_radians());
        let half = self.size / 2.0;

        // Body
        surface.fill_ellipse(Vec2::ZERO, half, colors::BLUE);

        // Wing (animated)
        let wing_offset = self.flap_phase.sin() * 3.0;
        let wing_size = Vec2::new(w - 10.0, h - 15.0);
        let wing_min = Vec2::new(5.0, 5.0 + wing_offset) - half;
        surface.fill_ellipse(wing_min + wing_size / 2.0, wing_size / 2.0, colors::BIRD_WING);

        // Eye
        let eye = Vec2::new(w - 8.0, 10.0) - half;
        surface.fill_circle(eye, 5.0, colors::WHITE);
        surface.fill_circle(eye, 2.0, colors::BLACK);

        // Beak
        surface.fill_polygon(
            &[
                Vec2::new(w - 2.0, h / 2.0) - half,
                Vec2::new(w + 8.0, h / 2.0 - 3.0) - half,
                Vec2::new(w + 8.0, h / 2.0 + 3.0) - half,
            ],
            colors::ORANGE,
        );

        surface.pop_transform();
    }
}
