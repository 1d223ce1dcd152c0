use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(classmate::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(classmate::config))]
    Config(String),

    #[error("Google Classroom API error: {0}")]
    #[diagnostic(code(classmate::classroom))]
    Classroom(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(classmate::calendar))]
    Calendar(String),

    #[error("Token error: {0}")]
    #[diagnostic(code(classmate::token))]
    Token(String),

    #[error("Agent error: {0}")]
    #[diagnostic(code(classmate::agent))]
    Agent(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(classmate::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(classmate::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(classmate::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(classmate::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Classroom errors
pub fn classroom_error(message: &str) -> Error {
    Error::Classroom(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn calendar_error(message: &str) -> Error {
    Error::Calendar(message.to_string())
}

/// Helper to create token errors
pub fn token_error(message: &str) -> Error {
    Error::Token(message.to_string())
}

/// Helper to create agent errors
pub fn agent_error(message: &str) -> Error {
    Error::Agent(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
