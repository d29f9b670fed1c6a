//! Core error types for class extraction
//!
//! Only caller contract violations are errors. Data-quality problems in
//! individual source files are reported as [`BatchWarning`] values and
//! never abort a batch.

use thiserror::Error;

/// Contract violations that fail a whole batch
#[derive(Error, Debug)]
pub enum ClassmapError {
    #[error("Unknown language variant: {variant}")]
    UnknownVariant { variant: String },

    #[error("Unknown extraction mode: {mode}")]
    UnknownMode { mode: String },

    #[error("Unknown output format: {format}")]
    UnknownFormat { format: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

impl ClassmapError {
    /// Create a new configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }
}

/// Non-fatal problem with one file of a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchWarning {
    #[error("{id}: source unavailable ({reason})")]
    Unavailable { id: String, reason: String },

    #[error("{id}: unsupported file extension")]
    UnsupportedExtension { id: String },

    #[error("{id}: source is {bytes} bytes, limit is {limit}")]
    TooLarge { id: String, bytes: usize, limit: usize },

    #[error("{id}: no class declaration recognized")]
    NoClassFound { id: String },

    #[error("{id}: class '{name}' already declared in {first}")]
    DuplicateClass {
        id: String,
        name: String,
        first: String,
    },
}

impl BatchWarning {
    /// Identifier of the source file the warning is about
    pub fn source_id(&self) -> &str {
        match self {
            BatchWarning::Unavailable { id, .. }
            | BatchWarning::UnsupportedExtension { id }
            | BatchWarning::TooLarge { id, .. }
            | BatchWarning::NoClassFound { id }
            | BatchWarning::DuplicateClass { id, .. } => id,
        }
    }
}
