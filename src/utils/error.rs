//! Error types for KidTube
//!
//! This module defines custom error types used throughout the application.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling.

use thiserror::Error;

/// Main error type for KidTube
#[derive(Error, Debug)]
pub enum KidTubeError {
    /// Catalog fetch or parse errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Embedded player errors
    #[error("Player error: {0}")]
    Player(String),

    /// Fullscreen capability errors
    #[error("Fullscreen error: {0}")]
    Fullscreen(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for KidTubeError {
    fn from(err: serde_json::Error) -> Self {
        KidTubeError::Catalog(format!("JSON error: {}", err))
    }
}

impl KidTubeError {
    /// Create a catalog error from string
    pub fn catalog_error<S: Into<String>>(msg: S) -> Self {
        KidTubeError::Catalog(msg.into())
    }
}

/// Convenience type alias for Results in KidTube
pub type Result<T> = std::result::Result<T, KidTubeError>;

/// Extension trait for converting other errors to KidTubeError
pub trait IntoKidTubeError<T> {
    /// Convert this error into a KidTubeError with the given context
    fn catalog_err(self, context: &str) -> Result<T>;
    fn player_err(self, context: &str) -> Result<T>;
    fn fullscreen_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoKidTubeError<T> for std::result::Result<T, E> {
    fn catalog_err(self, context: &str) -> Result<T> {
        self.map_err(|e| KidTubeError::Catalog(format!("{}: {}", context, e)))
    }

    fn player_err(self, context: &str) -> Result<T> {
        self.map_err(|e| KidTubeError::Player(format!("{}: {}", context, e)))
    }

    fn fullscreen_err(self, context: &str) -> Result<T> {
        self.map_err(|e| KidTubeError::Fullscreen(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| KidTubeError::Config(format!("{}: {}", context, e)))
    }
}
