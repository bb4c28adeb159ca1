use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moviereviews_core::reviews::{review_error_to_status_code, ErrorBody, ReviewError};

/// Handler error: a [`ReviewError`] rendered as `{"Message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ReviewError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = StatusCode::from_u16(review_error_to_status_code(&self.0))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_internal() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        (status_code, Json(ErrorBody::from(&self.0))).into_response()
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        Self(err)
    }
}
