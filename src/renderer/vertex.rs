//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements (straight RGBA, 0-1)
pub mod colors {
    /// Build an opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Replace the alpha channel
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    pub const WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const BLACK: [f32; 4] = rgb(0, 0, 0);
    pub const BLUE: [f32; 4] = rgb(0, 0, 255);
    pub const RED: [f32; 4] = rgb(255, 0, 0);
    pub const YELLOW: [f32; 4] = rgb(255, 255, 0);
    pub const PURPLE: [f32; 4] = rgb(128, 0, 128);
    pub const ORANGE: [f32; 4] = rgb(255, 165, 0);
    pub const SKY_BLUE: [f32; 4] = rgb(135, 206, 235);

    pub const BIRD_WING: [f32; 4] = rgb(0, 0, 200);
    pub const SHIELD_AURA: [f32; 4] = rgb(0, 100, 255);
    pub const PIPE_LIP: [f32; 4] = rgb(0, 100, 0);
    pub const GROUND: [f32; 4] = rgb(100, 70, 0);
    pub const GROUND_TOP: [f32; 4] = rgb(120, 90, 0);
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 150.0 / 255.0];
}
