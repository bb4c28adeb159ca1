//! Pure functions for mapping review errors to HTTP responses.
//!
//! Missing and malformed parameters answer 404, the same status used for an
//! absent review. Write payloads that fail validation answer 400.

use serde::{Deserialize, Serialize};

use super::ReviewError;

const INTERNAL_MESSAGE: &str = "Internal server error";
const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Maps a [`ReviewError`] to an HTTP status code.
///
/// - `MissingParameter` -> 404
/// - `MalformedParameter` -> 404
/// - `NotFound` -> 404
/// - `ValidationFailure` -> 400
/// - `Conflict` -> 409
/// - `Timeout` -> 500
/// - `Internal` -> 500
///
/// # Examples
///
/// ```
/// use moviereviews_core::reviews::{review_error_to_status_code, ReviewError};
///
/// let error = ReviewError::MissingParameter("movieId");
/// assert_eq!(review_error_to_status_code(&error), 404);
/// ```
pub fn review_error_to_status_code(error: &ReviewError) -> u16 {
    match error {
        ReviewError::MissingParameter(_) => 404,
        ReviewError::MalformedParameter { .. } => 404,
        ReviewError::NotFound(_) => 404,
        ReviewError::ValidationFailure(_) => 400,
        ReviewError::Conflict(_) => 409,
        ReviewError::Timeout(_) => 500,
        ReviewError::Internal(_) => 500,
    }
}

/// The message placed in the client-visible `Message` field.
///
/// Server-side failures collapse to a generic message so store details
/// never reach the response body.
pub fn client_message(error: &ReviewError) -> String {
    match error {
        ReviewError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        ReviewError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Success body: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error body: `{"Message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "Message")]
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&ReviewError> for ErrorBody {
    fn from(error: &ReviewError) -> Self {
        Self::new(client_message(error))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::reviews::{FieldViolation, MovieId, ReviewKey};

    fn key() -> ReviewKey {
        ReviewKey::new(MovieId::new(1).unwrap(), "Ann")
    }

    #[test]
    fn test_parameter_errors_map_to_404() {
        assert_eq!(
            review_error_to_status_code(&ReviewError::MissingParameter("movieId")),
            404
        );
        assert_eq!(
            review_error_to_status_code(&ReviewError::malformed("year", "bad")),
            404
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(review_error_to_status_code(&ReviewError::NotFound(key())), 404);
    }

    #[test]
    fn test_validation_failure_maps_to_400() {
        let error = ReviewError::ValidationFailure(vec![FieldViolation::new("content", "is required")]);
        assert_eq!(review_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(review_error_to_status_code(&ReviewError::Conflict(key())), 409);
    }

    #[test]
    fn test_server_errors_map_to_500() {
        assert_eq!(
            review_error_to_status_code(&ReviewError::Internal("x".into())),
            500
        );
        assert_eq!(
            review_error_to_status_code(&ReviewError::Timeout(Duration::from_secs(1))),
            500
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let error = ReviewError::Internal("ResourceNotFoundException: table MovieReviews".into());
        assert_eq!(client_message(&error), "Internal server error");
        assert_eq!(
            client_message(&ReviewError::Timeout(Duration::from_secs(10))),
            "Request timed out"
        );
    }

    #[test]
    fn test_envelopes_serialize_to_wire_shape() {
        let data = serde_json::to_value(DataEnvelope::new(Vec::<u8>::new())).unwrap();
        assert_eq!(data, serde_json::json!({ "data": [] }));

        let body = ErrorBody::from(&ReviewError::MissingParameter("year"));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "Message": "Missing parameter: year" })
        );
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        assert_eq!(
            client_message(&ReviewError::MissingParameter("reviewerName")),
            "Missing parameter: reviewerName"
        );
    }
}
