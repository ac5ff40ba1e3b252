//! Error types for the agent.
//!
//! Two layers:
//!
//! - [`LineError`] classifies why a single protocol line could not be applied.
//!   It never leaves the dispatch loop; the loop logs it and moves on.
//! - [`CliError`] covers process-level failures (configuration, I/O on the
//!   protocol streams) that end the run with a non-zero exit code.

use std::fmt;

use deepgreen_ai::StrategyError;
use deepgreen_engine::errors::CardError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure to apply one input line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineError {
    /// Token count other than three. Dispatch is still attempted.
    #[error("Expected 3 tokens, got {tokens}")]
    MalformedLine { tokens: usize },

    #[error("Unrecognized leading token: {0}")]
    UnrecognizedLeadingToken(String),

    #[error("Missing token at position {index}")]
    MissingToken { index: usize },

    #[error("Invalid integer for {field}: {value:?}")]
    InvalidInteger { field: String, value: String },

    #[error("Invalid card: {0}")]
    InvalidCard(#[from] CardError),

    #[error("Invalid card payload: {0}")]
    InvalidPayload(String),

    /// Decision requested before `Match amount_to_call` was ever reported.
    #[error("Decision requested before amount_to_call was reported")]
    MissingAmountToCall,

    /// Decision requested before our hole cards were revealed.
    #[error("Decision requested with no known hand")]
    NoHoleCards,

    /// A strategy or ranker panicked while the line was handled.
    #[error("Internal failure: {0}")]
    Internal(String),
}

/// Custom error type for process-level operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error on the protocol streams or log sink
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<StrategyError> for CliError {
    fn from(error: StrategyError) -> Self {
        CliError::Config(error.to_string())
    }
}
