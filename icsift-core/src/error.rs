//! Error types for the icsift ecosystem.

use thiserror::Error;

/// Errors that can occur while building filters from a group config.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Group '{0}' not found in config")]
    UnknownGroup(String),

    #[error("Unknown mode '{mode}' for group '{group}'")]
    UnknownGroupMode { group: String, mode: String },

    #[error("Excluded group '{referenced}' (referenced by '{group}') not found in config")]
    UnknownReferencedGroup { group: String, referenced: String },

    #[error("Config is not valid: {0}")]
    ConfigInvalid(String),
}

/// Result type alias for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;
