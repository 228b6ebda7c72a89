//! Core error types for zenwrite-core.
//!
//! Nothing in a writing session is fatal: tool failures are turned into
//! fallbacks at the assistant boundary and bad user input is ignored. The
//! errors below cover the remaining surfaces (configuration, settings keys,
//! the prompt service transport) and are reported by the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zenwrite-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prompt service / assistant errors
    #[error("Assistant error: {0}")]
    Assist(#[from] AssistError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not determine or create the config directory
    #[error("Config directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Errors raised by the prompt service boundary.
///
/// The tool layer ([`crate::assist::Assistant`]) converts every variant
/// except [`AssistError::TextRequired`] into a fallback payload.
#[derive(Error, Debug)]
pub enum AssistError {
    /// The tool needs some text to work on
    #[error("Please write some text before using the {tool} tool")]
    TextRequired { tool: &'static str },

    /// No API key found in the configured environment variable
    #[error("No API key found in ${0}")]
    MissingApiKey(String),

    /// Transport failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the model API
    #[error("Model API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// The response carried no candidate text
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// The candidate text did not match the expected schema
    #[error("Model returned malformed output: {0}")]
    Malformed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown focus setting name
    #[error("Unknown focus setting: {0}")]
    UnknownSetting(String),

    /// Value that cannot be coerced to a boolean
    #[error("Cannot interpret '{value}' as on/off for '{field}'")]
    NotABoolean { field: String, value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl AssistError {
    /// Whether the failure means "the model answered, but with nothing usable".
    pub fn is_empty_output(&self) -> bool {
        matches!(self, AssistError::EmptyResponse | AssistError::Malformed(_))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
