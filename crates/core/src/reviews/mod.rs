mod error;
mod filter;
mod http_mapping;
mod requests;
mod types;
mod validation;

pub use error::{FieldViolation, ReviewError};
pub use filter::{ReviewFilter, YearMatch};
pub use http_mapping::{client_message, review_error_to_status_code, DataEnvelope, ErrorBody};
pub use requests::{CreateReviewRequest, RawReviewParams, UpdateReviewRequest};
pub use types::{MovieId, MovieReview, Rating, ReviewKey, Year};
pub use validation::{
    validate_create_review, validate_min_rating, validate_movie_id, validate_reviewer_name,
    validate_update_review, validate_year,
};
