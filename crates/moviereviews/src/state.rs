//! Application state.
//!
//! The state is built once at startup and cloned into every handler. It
//! holds the review dispatcher, which owns the shared repository handle.

use std::sync::Arc;

use moviereviews_core::storage::ReviewRepository;

use crate::{
    config::Config,
    service::{DispatchSettings, ReviewService},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dispatcher for the review access patterns.
    pub reviews: ReviewService,
}

impl AppState {
    /// Builds state around an existing repository.
    pub fn build(repo: Arc<dyn ReviewRepository>, config: &Config) -> Self {
        Self {
            reviews: ReviewService::new(repo, DispatchSettings::from(config)),
        }
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "dynamodb")]
mod dynamodb_backend {
    use super::*;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates state backed by the configured DynamoDB table.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(DynamoDbRepository::from_config(config).await);

            Ok(Self::build(repo, config))
        }
    }
}

#[cfg(all(feature = "inmemory", not(feature = "dynamodb")))]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates state backed by process-local storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Using in-memory storage; reviews are lost on restart");

            let repo = Arc::new(InMemoryRepository::new());

            Ok(Self::build(repo, config))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
