//! Repository whose calls fail, for exercising error paths in tests.

use std::time::Duration;

use async_trait::async_trait;

use moviereviews_core::reviews::{MovieId, MovieReview, ReviewFilter};
use moviereviews_core::storage::{RepositoryError, Result, ReviewRepository};

/// Every call fails with a connection error, after a long sleep when `hang` is set.
pub struct FailingRepository {
    pub hang: bool,
}

impl FailingRepository {
    async fn fail<T>(&self) -> Result<T> {
        if self.hang {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        Err(RepositoryError::ConnectionFailed(
            "dispatch failure: connection refused (10.0.0.1:443)".to_string(),
        ))
    }
}

#[async_trait]
impl ReviewRepository for FailingRepository {
    async fn get_review(&self, _: MovieId, _: &str) -> Result<Option<MovieReview>> {
        self.fail().await
    }

    async fn get_reviews_for_movie(
        &self,
        _: MovieId,
        _: &ReviewFilter,
    ) -> Result<Vec<MovieReview>> {
        self.fail().await
    }

    async fn get_reviews_by_reviewer(&self, _: &str) -> Result<Vec<MovieReview>> {
        self.fail().await
    }

    async fn put_review(&self, _: &MovieReview) -> Result<()> {
        self.fail().await
    }

    async fn insert_review(&self, _: &MovieReview) -> Result<()> {
        self.fail().await
    }

    async fn update_review_content(&self, _: MovieId, _: &str, _: &str) -> Result<MovieReview> {
        self.fail().await
    }
}
