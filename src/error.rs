//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbit-rig crate.
#[derive(Debug)]
pub enum OrbitError {
    /// A NaN or infinite value reached the public API.
    NonFinite {
        /// Which argument was rejected (e.g. `"distance"`).
        what: &'static str,
    },
    /// Options that would break the controller's invariants.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { what } => {
                write!(f, "non-finite value for {what}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid orbit options: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Reject NaN and infinities before they reach the spherical math.
pub(crate) fn ensure_finite(
    value: f32,
    what: &'static str,
) -> Result<f32, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::NonFinite { what })
    }
}
