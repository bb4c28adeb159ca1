//! Review handlers.
//!
//! Each handler validates its parameters, runs one access pattern through
//! the [`ReviewService`](crate::service::ReviewService) and wraps the result
//! in `{"data": ...}`. Validation failures never reach the store.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use moviereviews_core::reviews::{
    validate_create_review, validate_update_review, DataEnvelope, ErrorBody, FieldViolation,
    MovieReview, ReviewError,
};

use crate::{
    handlers::{params::ReviewParams, ApiError},
    state::AppState,
};

type ApiResult<T> = Result<Json<DataEnvelope<T>>, ApiError>;

fn data<T>(value: T) -> ApiResult<T> {
    Ok(Json(DataEnvelope::new(value)))
}

fn body_violation(rule: String) -> ReviewError {
    ReviewError::ValidationFailure(vec![FieldViolation::new("body", rule)])
}

/// Parses a request body as JSON without assuming a content type.
///
/// A body the extractor could not buffer, such as one over the size limit,
/// is a validation failure like any other unusable body.
fn parse_body(body: Result<Bytes, BytesRejection>) -> Result<Value, ReviewError> {
    let body = body.map_err(|rejection| {
        body_violation(format!("could not be read ({})", rejection.body_text()))
    })?;

    serde_json::from_slice(&body).map_err(|e| body_violation(format!("must be valid JSON ({e})")))
}

// ============================================================================
// Reads
// ============================================================================

/// All reviews of a movie (GET /movies/{movieId}/reviews).
pub async fn get_movie_reviews(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
) -> ApiResult<Vec<MovieReview>> {
    let movie_id = params.movie_id()?;

    data(state.reviews.get_by_id(movie_id).await?)
}

/// The review a reviewer wrote for a movie (GET /movies/{movieId}/reviews/{reviewerName}).
pub async fn get_movie_review_by_reviewer(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
) -> ApiResult<Vec<MovieReview>> {
    let movie_id = params.movie_id()?;
    let reviewer_name = params.reviewer_name()?;

    let review = state
        .reviews
        .get_by_id_and_reviewer(movie_id, &reviewer_name)
        .await?;

    data(vec![review])
}

/// Reviews of a movie from a year (GET /movies/{movieId}/reviews/year/{year}).
pub async fn get_movie_reviews_by_year(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
) -> ApiResult<Vec<MovieReview>> {
    let movie_id = params.movie_id()?;
    let year = params.year()?;

    data(state.reviews.get_by_id_and_year(movie_id, year).await?)
}

/// Reviews of a movie rated above a threshold (GET /movies/{movieId}/review?minRating=N).
pub async fn get_movie_reviews_with_min_rating(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
) -> ApiResult<Vec<MovieReview>> {
    let movie_id = params.movie_id()?;
    let min_rating = params.min_rating()?;

    data(
        state
            .reviews
            .get_by_id_and_min_rating(movie_id, min_rating)
            .await?,
    )
}

/// Every review by a reviewer (GET /reviews/{reviewerName}).
pub async fn get_reviews_by_reviewer(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
) -> ApiResult<Vec<MovieReview>> {
    let reviewer_name = params.reviewer_name()?;

    data(state.reviews.get_by_reviewer(&reviewer_name).await?)
}

// ============================================================================
// Writes
// ============================================================================

/// Create or replace a review (POST /movies/reviews).
pub async fn create_review(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<MovieReview> {
    let review = validate_create_review(&parse_body(body)?)?;

    tracing::debug!(review = ?review, "Received create review request");

    data(state.reviews.create_review(review).await?)
}

/// Replace the content of a review (PUT /movies/{movieId}/reviews/{reviewerName}).
pub async fn update_review(
    State(state): State<AppState>,
    ReviewParams(params): ReviewParams,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<MovieReview> {
    let movie_id = params.movie_id()?;
    let reviewer_name = params.reviewer_name()?;
    let request = validate_update_review(&parse_body(body)?)?;

    data(
        state
            .reviews
            .update_review(movie_id, &reviewer_name, request)
            .await?,
    )
}

/// JSON 404 for routes that do not exist.
pub async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}

/// JSON 405 for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}
