//! Error handling for name checking operations.
//!
//! Most failures in this library never reach the caller: availability adapters
//! fold their errors into `unknown`/conservative-default results. The variants
//! here cover the cases that do propagate — invalid input, generation and
//! credential failures, and persistence problems.

use std::fmt;

/// Main error type for name checking operations.
#[derive(Debug, Clone)]
pub enum NameCheckError {
    /// Invalid candidate name (empty, too long, etc.)
    InvalidName { name: String, reason: String },

    /// Network-related errors (connection, DNS setup, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Headless browser session errors (launch, navigation, CDP)
    BrowserError { message: String },

    /// Response parsing errors (JSON, scraped text)
    ParseError { message: String },

    /// AI name generation failures (upstream error, malformed response).
    /// Fatal to one generation round only.
    GenerationError { message: String },

    /// Missing or invalid API credential. Fatal to process start.
    CredentialError { message: String },

    /// Configuration errors (unreadable config dir, bad values)
    ConfigError { message: String },

    /// Session persistence errors
    SessionError { path: String, message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl NameCheckError {
    /// Create a new invalid name error.
    pub fn invalid_name<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new browser error.
    pub fn browser<M: Into<String>>(message: M) -> Self {
        Self::BrowserError {
            message: message.into(),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new generation error.
    pub fn generation<M: Into<String>>(message: M) -> Self {
        Self::GenerationError {
            message: message.into(),
        }
    }

    /// Create a new credential error.
    pub fn credential<M: Into<String>>(message: M) -> Self {
        Self::CredentialError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new session persistence error.
    pub fn session<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::SessionError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for NameCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name, reason } => {
                write!(f, "Invalid name '{}': {}", name, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::BrowserError { message } => {
                write!(f, "Browser error: {}", message)
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::GenerationError { message } => {
                write!(f, "Name generation failed: {}", message)
            }
            Self::CredentialError { message } => {
                write!(f, "Credential error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::SessionError { path, message } => {
                write!(f, "Session error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for NameCheckError {}

// From conversions for common error types

impl From<reqwest::Error> for NameCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for NameCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for NameCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for NameCheckError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::BrowserError {
            message: err.to_string(),
        }
    }
}

impl From<regex::Error> for NameCheckError {
    fn from(err: regex::Error) -> Self {
        Self::Internal {
            message: format!("Regex error: {}", err),
        }
    }
}
