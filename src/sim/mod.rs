//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-counted timers only
//! - Seeded RNG only, owned by the session
//! - No window, clock or GPU dependencies (drawing goes through [`Surface`])
//!
//! [`Surface`]: crate::renderer::Surface

pub mod background;
pub mod bird;
pub mod collision;
pub mod particle;
pub mod pipe;
pub mod powerup;
pub mod rect;
pub mod replay;
pub mod session;

pub use background::{Background, Cloud, Star};
pub use bird::Bird;
pub use particle::Particle;
pub use pipe::{Pipe, gap_for_difficulty, spawn_interval};
pub use powerup::{PowerUp, PowerUpKind};
pub use rect::Rect;
pub use replay::{Recorder, Replay, ReplayOutcome};
pub use session::{
    CrashCause, FrameInput, GameEvent, GamePhase, GameSession, difficulty_for_score,
};
