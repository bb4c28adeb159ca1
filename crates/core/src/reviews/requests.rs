//! Request payload types for the write patterns.

use serde::{Deserialize, Serialize};

use super::types::{MovieId, MovieReview, Rating};
use chrono::NaiveDate;

/// Payload for `POST /movies/reviews`. Shares the wire shape of [`MovieReview`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub movie_id: MovieId,
    pub reviewer_name: String,
    pub review_date: NaiveDate,
    pub content: String,
    pub rating: Rating,
}

impl CreateReviewRequest {
    pub fn into_review(self) -> MovieReview {
        MovieReview {
            movie_id: self.movie_id,
            reviewer_name: self.reviewer_name,
            review_date: self.review_date,
            content: self.content,
            rating: self.rating,
        }
    }
}

/// Payload for `PUT /movies/{movieId}/reviews/{reviewerName}`.
///
/// Only the content of an existing review can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReviewRequest {
    pub content: String,
}

impl UpdateReviewRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Raw, still percent-encoded path and query parameters of a request.
///
/// Handlers fill in whatever the route supplied; the validator decides
/// which fields a pattern needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReviewParams {
    pub movie_id: Option<String>,
    pub reviewer_name: Option<String>,
    pub year: Option<String>,
    pub min_rating: Option<String>,
}
