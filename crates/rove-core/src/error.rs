//! Error types for Rove

use thiserror::Error;

/// The main error type for Rove operations
#[derive(Debug, Error)]
pub enum RoveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

/// Result type alias for Rove operations
pub type Result<T> = std::result::Result<T, RoveError>;

impl From<toml::de::Error> for RoveError {
    fn from(err: toml::de::Error) -> Self {
        RoveError::TomlParseError(err.to_string())
    }
}
