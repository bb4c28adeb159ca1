//! Query dispatcher: the seven review access patterns.
//!
//! Every operation takes already-validated inputs, issues its store call
//! under the per-request timeout and reclassifies store failures into
//! [`ReviewError`]. No operation holds state between requests.

use std::{future::Future, sync::Arc, time::Duration};

use moviereviews_core::reviews::{
    MovieId, MovieReview, ReviewError, ReviewFilter, ReviewKey, UpdateReviewRequest, Year,
    YearMatch,
};
use moviereviews_core::storage::{RepositoryError, ReviewRepository};

use crate::config::Config;

/// Settings that shape how patterns are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    pub request_timeout: Duration,
    pub year_match: YearMatch,
    pub reject_duplicate_reviews: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for DispatchSettings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            year_match: config.year_match,
            reject_duplicate_reviews: config.reject_duplicate_reviews,
        }
    }
}

/// Answers review access patterns against a shared repository.
#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
    settings: DispatchSettings,
}

impl ReviewService {
    pub fn new(repo: Arc<dyn ReviewRepository>, settings: DispatchSettings) -> Self {
        Self { repo, settings }
    }

    /// Runs one store call under the request timeout.
    async fn run<T>(
        &self,
        pattern: &'static str,
        call: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, ReviewError> {
        match tokio::time::timeout(self.settings.request_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err @ (RepositoryError::NotFound(_) | RepositoryError::AlreadyExists(_)))) => {
                tracing::debug!(pattern, error = %err, "Store rejected request");
                Err(err.into())
            }
            Ok(Err(err)) => {
                tracing::error!(pattern, error = ?err, "Store call failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::error!(
                    pattern,
                    timeout = ?self.settings.request_timeout,
                    "Store call timed out"
                );
                Err(ReviewError::Timeout(self.settings.request_timeout))
            }
        }
    }

    /// All reviews of a movie. An empty result is a success.
    pub async fn get_by_id(&self, movie_id: MovieId) -> Result<Vec<MovieReview>, ReviewError> {
        self.run(
            "get_by_id",
            self.repo.get_reviews_for_movie(movie_id, &ReviewFilter::All),
        )
        .await
    }

    /// The review one reviewer wrote for a movie; absent is `NotFound`.
    pub async fn get_by_id_and_reviewer(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
    ) -> Result<MovieReview, ReviewError> {
        self.run(
            "get_by_id_and_reviewer",
            self.repo.get_review(movie_id, reviewer_name),
        )
        .await?
        .ok_or_else(|| ReviewError::NotFound(ReviewKey::new(movie_id, reviewer_name)))
    }

    /// Reviews of a movie whose date matches `year`.
    pub async fn get_by_id_and_year(
        &self,
        movie_id: MovieId,
        year: Year,
    ) -> Result<Vec<MovieReview>, ReviewError> {
        let filter = ReviewFilter::Year(year, self.settings.year_match);
        self.run(
            "get_by_id_and_year",
            self.repo.get_reviews_for_movie(movie_id, &filter),
        )
        .await
    }

    /// Reviews of a movie rated strictly above `min_rating`.
    pub async fn get_by_id_and_min_rating(
        &self,
        movie_id: MovieId,
        min_rating: i64,
    ) -> Result<Vec<MovieReview>, ReviewError> {
        let filter = ReviewFilter::MinRating(min_rating);
        self.run(
            "get_by_id_and_min_rating",
            self.repo.get_reviews_for_movie(movie_id, &filter),
        )
        .await
    }

    /// Every review by a reviewer, across movies.
    pub async fn get_by_reviewer(
        &self,
        reviewer_name: &str,
    ) -> Result<Vec<MovieReview>, ReviewError> {
        self.run(
            "get_by_reviewer",
            self.repo.get_reviews_by_reviewer(reviewer_name),
        )
        .await
    }

    /// Stores a review. Replaces an existing review with the same key unless
    /// duplicate rejection is enabled, in which case that is a `Conflict`.
    pub async fn create_review(&self, review: MovieReview) -> Result<MovieReview, ReviewError> {
        if self.settings.reject_duplicate_reviews {
            self.run("create_review", self.repo.insert_review(&review))
                .await?;
        } else {
            self.run("create_review", self.repo.put_review(&review))
                .await?;
        }

        tracing::info!(
            movie_id = %review.movie_id,
            reviewer = %review.reviewer_name,
            "Stored review"
        );

        Ok(review)
    }

    /// Replaces the content of an existing review; everything else is kept.
    pub async fn update_review(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
        request: UpdateReviewRequest,
    ) -> Result<MovieReview, ReviewError> {
        let review = self
            .run(
                "update_review",
                self.repo
                    .update_review_content(movie_id, reviewer_name, &request.content),
            )
            .await?;

        tracing::info!(
            movie_id = %movie_id,
            reviewer = %reviewer_name,
            "Updated review content"
        );

        Ok(review)
    }
}
