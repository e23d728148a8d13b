//! Pipe obstacles: a top and bottom segment around a gap

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::renderer::{Color, Surface, colors};

/// Gap height for a difficulty level, clamped so geometry never degenerates
pub fn gap_for_difficulty(difficulty: u32) -> f32 {
    (BASE_PIPE_GAP - difficulty as f32 * PIPE_GAP_SHRINK).max(MIN_PIPE_GAP)
}

/// Frames between pipe spawns for a difficulty level
pub fn spawn_interval(difficulty: u32) -> u64 {
    PIPE_SPAWN_FRAMES.saturating_sub(difficulty as u64 * PIPE_SPAWN_STEP_FRAMES)
}

/// A pipe pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    /// Whether the bird has passed this pipe (scored once)
    pub passed: bool,
    pub color: Color,
}

impl Pipe {
    /// Build a pipe at the right edge with a random gap position
    pub fn new<R: Rng>(difficulty: u32, rng: &mut R) -> Self {
        let gap = gap_for_difficulty(difficulty);
        let max_top = FIELD_HEIGHT - gap - PIPE_MARGIN;
        let top_height = if max_top >= PIPE_MARGIN {
            rng.random_range(PIPE_MARGIN..=max_top)
        } else {
            PIPE_MARGIN.clamp(0.0, FIELD_HEIGHT - gap)
        };
        let color = colors::rgb(
            rng.random_range(0..=100),
            rng.random_range(128..=255),
            rng.random_range(0..=100),
        );
        Self::with_geometry(FIELD_WIDTH, gap, top_height, color)
    }

    /// Build a pipe from explicit geometry; the bottom segment fills the rest
    pub fn with_geometry(x: f32, gap: f32, top_height: f32, color: Color) -> Self {
        let bottom_height = FIELD_HEIGHT - top_height - gap;
        debug_assert!(
            top_height >= 0.0 && bottom_height >= 0.0,
            "degenerate pipe: top {top_height}, gap {gap}"
        );
        Self {
            x,
            width: PIPE_WIDTH,
            gap,
            top_height,
            bottom_height,
            passed: false,
            color,
        }
    }

    /// Scroll left. Returns true once fully off the left edge.
    pub fn advance(&mut self, scroll_speed: f32) -> bool {
        self.x -= scroll_speed;
        self.is_off_field()
    }

    pub fn is_off_field(&self) -> bool {
        self.x < -self.width
    }

    /// Flip `passed` the first frame the pipe is left of `bird_x`.
    /// Returns true only on that frame.
    pub fn mark_passed(&mut self, bird_x: f32) -> bool {
        if !self.passed && self.x < bird_x {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            FIELD_HEIGHT - self.bottom_height,
            self.width,
            self.bottom_height,
        )
    }

    pub fn rects(&self) -> [Rect; 2] {
        [self.top_rect(), self.bottom_rect()]
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let top = self.top_rect();
        let bottom = self.bottom_rect();
        surface.fill_rect(top, self.color);
        surface.fill_rect(
            Rect::new(
                self.x - 3.0,
                self.top_height - PIPE_LIP_HEIGHT,
                self.width + 6.0,
                PIPE_LIP_HEIGHT,
            ),
            colors::PIPE_LIP,
        );

        surface.fill_rect(bottom, self.color);
        surface.fill_rect(
            Rect::new(self.x - 3.0, bottom.y, self.width + 6.0, PIPE_LIP_HEIGHT),
            colors::PIPE_LIP,
        );
    }
}
