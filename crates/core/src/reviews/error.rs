use std::{fmt, time::Duration};

use thiserror::Error;

use super::types::ReviewKey;

/// A single rule a write payload failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            field,
            rule: rule.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced while answering a review access pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Malformed parameter {field}: {reason}")]
    MalformedParameter {
        field: &'static str,
        reason: String,
    },
    #[error("Review not found: {0}")]
    NotFound(ReviewKey),
    #[error("Invalid review payload: {}", join_violations(.0))]
    ValidationFailure(Vec<FieldViolation>),
    #[error("Review already exists: {0}")]
    Conflict(ReviewKey),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Internal failure: {0}")]
    Internal(String),
}

impl ReviewError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedParameter {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures that originate server side rather than in the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Internal(_))
    }
}
