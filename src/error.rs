//! Error type for the crate's fallible edges
//!
//! The simulation itself never fails; only settings I/O, JSON decoding and
//! replay verification report errors.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    Io(std::io::Error),
    Json(serde_json::Error),
    ReplayMismatch {
        field: &'static str,
        expected: u64,
        actual: u64,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::ReplayMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "replay mismatch on {field}: expected {expected}, got {actual}"
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::ReplayMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
