//! Error types for the validation library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the migration an error or connector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Main error type for validation runs.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// Configuration error (invalid YAML, bad tolerance values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connector failure on one side. Surfaced as-is and aborts the run
    /// for that side; never recovered by the core.
    #[error("{side} connector error: {message}")]
    Connector { side: Side, message: String },

    /// Malformed or inconsistent catalog rows. Aborts the affected side's
    /// snapshot build rather than producing a partial snapshot.
    #[error("{side} catalog normalization failed for {object}: {message}")]
    Normalization {
        side: Side,
        object: String,
        message: String,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidateError {
    /// Create a Connector error for the given side.
    pub fn connector(side: Side, message: impl Into<String>) -> Self {
        ValidateError::Connector {
            side,
            message: message.into(),
        }
    }

    /// Create a Normalization error naming the offending object.
    pub fn normalization(
        side: Side,
        object: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidateError::Normalization {
            side,
            object: object.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for the CLI, one per error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            ValidateError::Config(_) | ValidateError::Yaml(_) | ValidateError::Json(_) => 1,
            ValidateError::Connector { .. } => 2,
            ValidateError::Normalization { .. } => 3,
            ValidateError::Io(_) => 7,
        }
    }
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
