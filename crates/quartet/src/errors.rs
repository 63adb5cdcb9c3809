use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error("Provider call failed: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl From<tera::Error> for AgentError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful part of the message in its source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message = format!("{}: {}", message, inner);
            source = inner.source();
        }
        AgentError::Prompt(message)
    }
}

/// Failures talking to a hosted model.
///
/// Only [`ProviderError::is_transient`] errors are worth retrying; everything
/// else will fail the same way on the next attempt.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Server error: {status} {body}")]
    Server { status: u16, body: String },

    #[error("Request failed: {status} {body}")]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Server { .. } => true,
            ProviderError::Network(err) => err.is_timeout() || err.is_connect(),
            ProviderError::Request { .. } | ProviderError::InvalidResponse(_) => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Dice must have at least 2 sides")]
    TooFewSides,

    #[error("Must roll at least 1 die")]
    NoDice,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse travel catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog entry for {destination}: {reason}")]
    InvalidEntry { destination: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_transient() {
        let err = ProviderError::Server {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_request_errors_are_permanent() {
        let err = ProviderError::Request {
            status: 401,
            body: "bad key".to_string(),
        };
        assert!(!err.is_transient());
        assert!(!ProviderError::InvalidResponse("empty".to_string()).is_transient());
    }

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::UnknownAgent("WeatherAgent".to_string());
        assert_eq!(err.to_string(), "Unknown agent: WeatherAgent");
    }
}
