//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! [`MovieReview`]. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::NaiveDate;
use moviereviews_core::reviews::{MovieId, MovieReview, Rating};
use moviereviews_core::storage::RepositoryError;

// ============================================================================
// Attribute names
// ============================================================================

/// Partition key of the table and sort key of the reviewer index.
pub const ATTR_MOVIE_ID: &str = "movieId";
/// Sort key of the table and partition key of the reviewer index.
pub const ATTR_REVIEWER_NAME: &str = "reviewerName";
pub const ATTR_REVIEW_DATE: &str = "reviewDate";
pub const ATTR_CONTENT: &str = "content";
pub const ATTR_RATING: &str = "rating";

// ============================================================================
// Review conversions
// ============================================================================

/// Convert a MovieReview to a DynamoDB item.
pub fn review_to_item(review: &MovieReview) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        ATTR_MOVIE_ID.to_string(),
        AttributeValue::N(review.movie_id.to_string()),
    );
    item.insert(
        ATTR_REVIEWER_NAME.to_string(),
        AttributeValue::S(review.reviewer_name.clone()),
    );

    // Data
    item.insert(
        ATTR_REVIEW_DATE.to_string(),
        AttributeValue::S(review.review_date_iso()),
    );
    item.insert(
        ATTR_CONTENT.to_string(),
        AttributeValue::S(review.content.clone()),
    );
    item.insert(
        ATTR_RATING.to_string(),
        AttributeValue::N(review.rating.get().to_string()),
    );

    item
}

/// Convert a DynamoDB item to a MovieReview.
pub fn item_to_review(
    item: &HashMap<String, AttributeValue>,
) -> Result<MovieReview, RepositoryError> {
    let movie_id: u64 = get_number(item, ATTR_MOVIE_ID)?;
    let rating: u8 = get_number(item, ATTR_RATING)?;

    Ok(MovieReview {
        movie_id: MovieId::new(movie_id).ok_or_else(|| {
            RepositoryError::InvalidData(format!("{ATTR_MOVIE_ID} must be positive"))
        })?,
        reviewer_name: get_string(item, ATTR_REVIEWER_NAME)?,
        review_date: get_date(item, ATTR_REVIEW_DATE)?,
        content: get_string(item, ATTR_CONTENT)?,
        rating: Rating::new(rating).ok_or_else(|| {
            RepositoryError::InvalidData(format!("{ATTR_RATING} out of range: {rating}"))
        })?,
    })
}

// ============================================================================
// Attribute helpers
// ============================================================================

pub fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing string field: {key}")))
}

pub fn get_number<T: FromStr>(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<T, RepositoryError> {
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing number field: {key}")))?;

    raw.parse()
        .map_err(|_| RepositoryError::InvalidData(format!("Invalid number for {key}: {raw}")))
}

pub fn get_date(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<NaiveDate, RepositoryError> {
    let value = get_string(item, key)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid date for {key}: {e}")))
}
