//! Error handling module for lunchset
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The two domain failures are catalog loading and composition rejection; the
//! remaining variants cover catalog records, the terminal and I/O. Config
//! file handling reports through `anyhow` instead.

use crate::validation::Rejection;
use thiserror::Error;

/// Main error type for lunchset
#[derive(Error, Debug)]
pub enum LunchError {
    /// The dish catalog could not be fetched or parsed
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// The selected dishes do not form a valid lunch set
    #[error("Order rejected: {0}")]
    CompositionRejected(Rejection),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors (catalog records, dish keywords)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for lunchset operations
pub type Result<T> = std::result::Result<T, LunchError>;

impl From<Rejection> for LunchError {
    fn from(rejection: Rejection) -> Self {
        Self::CompositionRejected(rejection)
    }
}

// Convenient error constructors
impl LunchError {
    /// Create a catalog load error
    pub fn catalog_load(msg: impl Into<String>) -> Self {
        Self::CatalogLoad(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
