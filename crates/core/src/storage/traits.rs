use async_trait::async_trait;

use crate::reviews::{MovieId, MovieReview, ReviewFilter};

use super::Result;

/// Storage for movie reviews keyed by `(movieId, reviewerName)`.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Gets the review a reviewer wrote for a movie.
    async fn get_review(&self, movie_id: MovieId, reviewer_name: &str)
        -> Result<Option<MovieReview>>;

    /// Gets the reviews of a movie that pass `filter`.
    async fn get_reviews_for_movie(
        &self,
        movie_id: MovieId,
        filter: &ReviewFilter,
    ) -> Result<Vec<MovieReview>>;

    /// Gets every review written by a reviewer, across movies.
    async fn get_reviews_by_reviewer(&self, reviewer_name: &str) -> Result<Vec<MovieReview>>;

    /// Stores a review, replacing any review with the same key.
    async fn put_review(&self, review: &MovieReview) -> Result<()>;

    /// Stores a review, failing with `AlreadyExists` if the key is taken.
    async fn insert_review(&self, review: &MovieReview) -> Result<()>;

    /// Replaces the content of an existing review and returns the updated review.
    ///
    /// Fails with `NotFound` if no review has this key.
    async fn update_review_content(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
        content: &str,
    ) -> Result<MovieReview>;
}
