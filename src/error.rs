/// Error types for Worldbuilder
///
/// Every fallible operation in the crate returns [`WorldError`]. The
/// user-facing warnings (duplicate world, missing field, bad name) are kept
/// apart from storage failures so the presentation layer can report the
/// former and abort on the latter.

use thiserror::Error;

/// Main error type for Worldbuilder operations
#[derive(Error, Debug)]
pub enum WorldError {
    // ========================================
    // Session Warnings
    // ========================================

    #[error("World '{name}' already exists")]
    DuplicateWorld {
        name: String,
    },

    #[error("Missing required field '{field}'")]
    MissingField {
        field: String,
    },

    #[error("Invalid world name '{name}': {reason}")]
    InvalidWorldName {
        name: String,
        reason: String,
    },

    #[error("Unknown category '{label}'")]
    UnknownCategory {
        label: String,
    },

    #[error("No world selected")]
    NoActiveWorld,

    // ========================================
    // Storage Failures
    // ========================================

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================
    // Configuration
    // ========================================

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WorldError {
    /// True for errors reported to the user as a warning with no state change
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            WorldError::DuplicateWorld { .. }
                | WorldError::MissingField { .. }
                | WorldError::InvalidWorldName { .. }
                | WorldError::UnknownCategory { .. }
                | WorldError::NoActiveWorld
        )
    }

    /// True for errors raised by the filesystem or the JSON codec
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, WorldError::Io(_) | WorldError::Json(_))
    }
}

/// Result type alias for Worldbuilder operations
pub type Result<T> = std::result::Result<T, WorldError>;
