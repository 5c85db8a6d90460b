//! Configuration errors
//!
//! The physics itself never fails; it guards numerically instead. Only
//! construction-time settings and viewport checks surface errors to the host.

use thiserror::Error;

/// Rejected settings, viewport, or settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is outside its valid range
    #[error("invalid setting `{field}`: {value}")]
    InvalidSetting { field: &'static str, value: String },

    /// Viewport dimensions must be finite and positive
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn setting(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidSetting {
            field,
            value: value.to_string(),
        }
    }
}
