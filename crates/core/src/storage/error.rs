use thiserror::Error;

use crate::reviews::{ReviewError, ReviewKey};

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Review not found: {0}")]
    NotFound(ReviewKey),
    #[error("Review already exists: {0}")]
    AlreadyExists(ReviewKey),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<RepositoryError> for ReviewError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(key) => ReviewError::NotFound(key),
            RepositoryError::AlreadyExists(key) => ReviewError::Conflict(key),
            other => ReviewError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::MovieId;

    fn key() -> ReviewKey {
        ReviewKey::new(MovieId::new(998).unwrap(), "John Doe")
    }

    #[test]
    fn test_repository_error_not_found_display() {
        assert_eq!(
            RepositoryError::NotFound(key()).to_string(),
            "Review not found: 998/John Doe"
        );
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("invalid partition key".to_string());
        assert_eq!(error.to_string(), "Query failed: invalid partition key");
    }

    #[test]
    fn test_not_found_reclassified_as_not_found() {
        assert_eq!(
            ReviewError::from(RepositoryError::NotFound(key())),
            ReviewError::NotFound(key())
        );
    }

    #[test]
    fn test_already_exists_reclassified_as_conflict() {
        assert_eq!(
            ReviewError::from(RepositoryError::AlreadyExists(key())),
            ReviewError::Conflict(key())
        );
    }

    #[test]
    fn test_store_failures_reclassified_as_internal() {
        for error in [
            RepositoryError::ConnectionFailed("timeout after 30s".into()),
            RepositoryError::QueryFailed("throughput exceeded".into()),
            RepositoryError::Serialization("missing field".into()),
            RepositoryError::InvalidData("rating out of range".into()),
        ] {
            assert!(matches!(ReviewError::from(error), ReviewError::Internal(_)));
        }
    }
}
