//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary. Missing fields fall back to
//! their defaults, so a partial file is always valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::error::GameError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles the bird keeps alive at once
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 512,
        }
    }

    /// Drifting clouds in the background
    pub fn cloud_count(&self) -> usize {
        match self {
            QualityPreset::Low => 3,
            QualityPreset::Medium => 5,
            QualityPreset::High => 8,
        }
    }

    /// Night-sky stars
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 20,
            QualityPreset::High => 40,
        }
    }
}

/// How the frame loop paces wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pacing {
    /// Sleep to hold the target frame rate
    #[default]
    RealTime,
    /// Run frames back to back (headless runs, replays)
    Unthrottled,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (jump bursts, flight trail, explosions)
    pub particles: bool,
    /// Reduced motion (no star twinkle, steady shield aura)
    pub reduced_motion: bool,
    /// Draw score, high score and shield timer
    pub show_hud: bool,
    /// Frame rate the loop paces to
    pub target_fps: u32,
    pub pacing: Pacing,
    /// Fixed RNG seed; `None` uses the built-in default
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
            show_hud: true,
            target_fps: TARGET_FPS,
            pacing: Pacing::RealTime,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether stars twinkle and the shield aura pulses
    pub fn animate_ambient(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
