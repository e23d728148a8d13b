//! Flappy Deluxe - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird, pipes, power-ups, background, session)
//! - `renderer`: Drawing-surface capability and tessellation into GPU-ready vertices
//! - `platform`: Input sources, frame pacing and the frame loop
//! - `settings`: User preferences loaded from JSON

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{Pacing, QualityPreset, Settings};

/// Game configuration constants
///
/// Everything is counted in frames at [`consts::TARGET_FPS`]; distances are pixels.
pub mod consts {
    /// Playfield dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Simulation cadence
    pub const TARGET_FPS: u32 = 60;

    /// Bird physics
    pub const GRAVITY: f32 = 0.25;
    pub const JUMP_IMPULSE: f32 = -5.0;
    pub const BIRD_SIZE: f32 = 30.0;
    /// Tilt clamp in degrees
    pub const MAX_TILT_DEG: f32 = 30.0;
    pub const TILT_PER_VELOCITY: f32 = 3.0;
    pub const FLAP_PHASE_STEP: f32 = 0.3;
    /// Chance per frame of a trailing flight particle
    pub const FLIGHT_PARTICLE_CHANCE: f64 = 0.3;
    pub const JUMP_BURST: usize = 5;
    pub const EXPLOSION_BURST: usize = 15;

    /// Scrolling
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Pipes
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const BASE_PIPE_GAP: f32 = 150.0;
    pub const PIPE_GAP_SHRINK: f32 = 5.0;
    /// Gap never shrinks below this, whatever the difficulty
    pub const MIN_PIPE_GAP: f32 = 80.0;
    /// Minimum height of either pipe segment
    pub const PIPE_MARGIN: f32 = 50.0;
    pub const PIPE_LIP_HEIGHT: f32 = 20.0;
    /// Frames between pipe spawns at difficulty 0 (1.5 s)
    pub const PIPE_SPAWN_FRAMES: u64 = 90;
    /// Spawn interval reduction per difficulty level (50 ms)
    pub const PIPE_SPAWN_STEP_FRAMES: u64 = 3;

    /// Difficulty progression
    pub const MAX_DIFFICULTY: u32 = 10;
    pub const SCORE_PER_DIFFICULTY: u32 = 5;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_COOLDOWN_FRAMES: u32 = 300;
    pub const POWER_UP_CHANCE: f64 = 0.01;
    pub const POWER_UP_MARGIN: f32 = 100.0;
    pub const POWER_UP_PHASE_STEP: f32 = 0.1;
    pub const POINTS_BONUS: u32 = 5;
    /// Shield lasts 5 seconds
    pub const SHIELD_FRAMES: u32 = 300;
    pub const SLOW_FRAMES: u32 = 300;
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_SPEED: f32 = 3.0;
    pub const PARTICLE_MIN_DECAY: f32 = 0.02;
    pub const PARTICLE_MAX_DECAY: f32 = 0.05;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;

    /// Background
    pub const TIME_OF_DAY_STEP: f32 = 0.0005;
    pub const GROUND_HEIGHT: f32 = 20.0;
    pub const CLOUD_RECYCLE_X: f32 = -100.0;
    pub const CLOUD_RESPAWN_OFFSET: f32 = 50.0;

    /// Seed used when settings leave it unset
    pub const DEFAULT_SEED: u64 = 0x5EED_F1A9;
}

/// Linear interpolation between two RGB triples (components 0-255)
#[inline]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] * (1.0 - t) + b[0] * t,
        a[1] * (1.0 - t) + b[1] * t,
        a[2] * (1.0 - t) + b[2] * t,
    ]
}
