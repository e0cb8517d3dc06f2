//! Editor configuration
//!
//! Defaults applied when a session starts or a question is added. Loadable
//! from TOML; keys left out keep their defaults.

use crate::error::{SessionError, SessionResult};
use forms_schema::{FileConstraints, UNLIMITED_FILES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Title used when the payload has none
    pub default_title: String,
    /// Description used when the payload has none
    pub default_description: String,
    /// Visibility used when the payload has none
    pub default_visibility: String,
    /// Responses allowed per respondent when the payload has no limit
    pub default_individual_limit: u32,
    /// Blank options a new choice question starts with
    pub choice_option_count: usize,
    /// Size limit (MB) of a new file question
    pub file_max_size_mb: f64,
    /// File count limit of a new file question
    pub file_max_files: i64,
    /// Accepted types of a new file question
    pub file_allowed_types: Vec<String>,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| SessionError::config_read(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// With number of starting options for choice questions
    #[inline]
    #[must_use]
    pub fn with_choice_option_count(mut self, count: usize) -> Self {
        self.choice_option_count = count;
        self
    }

    /// With file question defaults
    #[inline]
    #[must_use]
    pub fn with_file_defaults(mut self, max_size_mb: f64, max_files: i64) -> Self {
        self.file_max_size_mb = max_size_mb;
        self.file_max_files = max_files;
        self
    }

    /// With default title
    #[inline]
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// File constraints a new file question starts with
    #[must_use]
    pub fn default_file_constraints(&self) -> FileConstraints {
        FileConstraints::new(
            self.file_max_size_mb,
            self.file_max_files,
            self.file_allowed_types.clone(),
        )
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_title: "Untitled Form".to_string(),
            default_description: "Add a description".to_string(),
            default_visibility: "private".to_string(),
            default_individual_limit: 1,
            choice_option_count: 2,
            file_max_size_mb: 10.0,
            file_max_files: UNLIMITED_FILES,
            file_allowed_types: Vec::new(),
        }
    }
}
