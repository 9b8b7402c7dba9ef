//! Error types for job card parsing and pricing matrix editing.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of an error, used by callers to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input file does not exist.
    NotFound,
    /// Caller or user supplied an invalid value.
    InvalidInput,
    /// A stored table is corrupt; a programming or data error, not a user error.
    DataIntegrity,
    /// Underlying I/O or (de)serialization failure.
    Io,
}

/// Main error type for the job card core.
#[derive(Debug, Error)]
pub enum JobCardError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("End price must be a finite number, got {value}")]
    InvalidEndPrice { value: f64 },

    #[error("Maximum girth must be at least 2, got {max_girth}")]
    InvalidMaxGirth { max_girth: u32 },

    #[error("Fold increment must be a finite number, got {value}")]
    InvalidFoldIncrement { value: f64 },

    #[error("Target folds must include the flat fold 0")]
    MissingFlatFold,

    #[error("Percentage must be a finite number not below -100, got {value}")]
    InvalidPercent { value: f64 },

    #[error("Price must be a finite, non-negative number, got {value}")]
    InvalidPrice { value: f64 },

    #[error("Girth {girth} is not in the rate table")]
    UnknownGirth { girth: u32 },

    #[error("Fold {fold} is not defined for this material")]
    UnknownFold { fold: u32 },

    #[error("Cannot remove the last remaining fold")]
    LastFold,

    #[error("Material name must not be empty")]
    EmptyMaterialName,

    #[error("Material already exists: {name}")]
    DuplicateMaterial { name: String },

    #[error("Material not found: {name}")]
    UnknownMaterial { name: String },

    #[error("Data integrity error in {context}: non-numeric key '{key}'")]
    DataIntegrity { key: String, context: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JobCardError {
    /// Get the classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobCardError::FileNotFound { .. } => ErrorKind::NotFound,
            JobCardError::InvalidEndPrice { .. }
            | JobCardError::InvalidMaxGirth { .. }
            | JobCardError::InvalidFoldIncrement { .. }
            | JobCardError::MissingFlatFold
            | JobCardError::InvalidPercent { .. }
            | JobCardError::InvalidPrice { .. }
            | JobCardError::UnknownGirth { .. }
            | JobCardError::UnknownFold { .. }
            | JobCardError::LastFold
            | JobCardError::EmptyMaterialName
            | JobCardError::DuplicateMaterial { .. }
            | JobCardError::UnknownMaterial { .. } => ErrorKind::InvalidInput,
            JobCardError::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            JobCardError::Io(_) | JobCardError::Json(_) => ErrorKind::Io,
        }
    }

    /// True for the gradient parameter errors raised at the span generator boundary.
    pub fn is_invalid_gradient(&self) -> bool {
        matches!(
            self,
            JobCardError::InvalidEndPrice { .. } | JobCardError::InvalidMaxGirth { .. }
        )
    }

    /// True when the error points at corrupt stored data rather than bad input.
    pub fn is_data_integrity(&self) -> bool {
        self.kind() == ErrorKind::DataIntegrity
    }
}

/// Result type alias for job card operations.
pub type Result<T> = std::result::Result<T, JobCardError>;
