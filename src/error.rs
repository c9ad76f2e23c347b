//! Configuration errors
//!
//! The simulation itself never fails; only the knobs handed to it can be wrong.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
    InvalidFrameDt { frame_dt: f32 },
    ZeroFrameBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value for {field}: {reason}")
            }
            Self::InvalidFrameDt { frame_dt } => {
                write!(f, "frame dt must be positive and finite, got {frame_dt}")
            }
            Self::ZeroFrameBudget => write!(f, "max frames must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {}
