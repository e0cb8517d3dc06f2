//! Error types for the editing engine
//!
//! Session mutations never fail; these cover the host-facing edges:
//! - Initial payloads that cannot be deserialized
//! - Config files that cannot be read or parsed
//! - Open/close instants that are not dates

use std::path::PathBuf;

/// Errors while preparing or loading a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Host payload is not valid JSON for an initial form
    #[error("invalid form payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("io error reading config {path}: {source}")]
    ConfigRead {
        /// File that failed to read
        path: PathBuf,
        /// Underlying io error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the editor config
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Open or close instant could not be split into date and time
    #[error("invalid {field} instant '{value}'")]
    InvalidInstant {
        /// `opens` or `closes`
        field: &'static str,
        /// Text as received
        value: String,
    },
}

impl SessionError {
    /// Create config read error for path
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create invalid instant error
    pub fn invalid_instant(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidInstant {
            field,
            value: value.into(),
        }
    }
}

/// Result type alias for session setup
pub type SessionResult<T> = Result<T, SessionError>;
