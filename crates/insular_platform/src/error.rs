//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host cannot provide a drawing surface
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Environment values out of range
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
