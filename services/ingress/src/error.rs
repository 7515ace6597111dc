//! Ingress Gateway Errors
//!
//! Validation failures are raised before LiveKit is contacted and are kept
//! apart from failures reported by the LiveKit server API.

use serde::Serialize;
use thiserror::Error;

/// Failure reported by (or while talking to) the LiveKit server API
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("LiveKit request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LiveKit API error (status {status}): {code}: {msg}")]
    Twirp {
        status: u16,
        code: String,
        msg: String,
    },

    #[error("Failed to decode LiveKit response: {0}")]
    Decode(String),

    #[error("Failed to sign LiveKit access token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Wire name of the field (e.g. `roomSlug`)
    pub path: &'static str,
    pub message: String,
}

/// Every issue found while validating a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn push(&mut self, path: &'static str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path,
            message: message.into(),
        });
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.path, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Outcome of an ingress gateway operation
#[derive(Error, Debug)]
pub enum IngressError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IngressError {
    pub fn is_validation(&self) -> bool {
        matches!(self, IngressError::Validation(_))
    }
}

pub type IngressResult<T> = Result<T, IngressError>;
