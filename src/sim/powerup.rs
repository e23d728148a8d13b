//! Collectible power-ups drifting across the field

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::renderer::{Color, Surface, colors};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary immunity to pipe collisions
    Shield,
    /// Halves scroll speed for a while
    Slow,
    /// Flat score bonus
    Points,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Slow, PowerUpKind::Points];

    /// Pick a kind uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Shield => colors::BLUE,
            PowerUpKind::Slow => colors::YELLOW,
            PowerUpKind::Points => colors::PURPLE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Slow => "slow",
            PowerUpKind::Points => "points",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
    /// Pulsation phase (radians)
    pub phase: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            size: POWER_UP_SIZE,
            kind,
            phase: 0.0,
        }
    }

    /// Spawn at the right edge with a random height and kind
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let y = rng.random_range(POWER_UP_MARGIN..=FIELD_HEIGHT - POWER_UP_MARGIN);
        Self::new(Vec2::new(FIELD_WIDTH, y), PowerUpKind::random(rng))
    }

    /// Scroll left and animate. Returns true once fully off the left edge.
    pub fn advance(&mut self, scroll_speed: f32) -> bool {
        self.pos.x -= scroll_speed;
        self.phase += POWER_UP_PHASE_STEP;
        self.is_off_field()
    }

    pub fn is_off_field(&self) -> bool {
        self.pos.x < -self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let pulse = self.phase.sin() * 2.0;
        surface.fill_rect(self.rect().inflate(pulse), self.kind.color());

        let center = self.rect().center();
        let s = self.size;
        match self.kind {
            PowerUpKind::Shield => {
                surface.stroke_circle(center, 6.0, 2.0, colors::WHITE);
            }
            PowerUpKind::Slow => {
                surface.stroke_rect(
                    Rect::new(self.pos.x + 5.0, self.pos.y + 5.0, 10.0, 10.0),
                    2.0,
                    colors::WHITE,
                );
            }
            PowerUpKind::Points => {
                surface.fill_polygon(
                    &[
                        Vec2::new(center.x, self.pos.y + 3.0),
                        Vec2::new(self.pos.x + s - 3.0, center.y),
                        Vec2::new(center.x, self.pos.y + s - 3.0),
                        Vec2::new(self.pos.x + 3.0, center.y),
                    ],
                    colors::WHITE,
                );
            }
        }
    }
}
