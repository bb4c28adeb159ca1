//! DynamoDB query construction.
//!
//! Pure functions that turn an access pattern into the key condition, filter
//! expression and placeholders of a `Query` or the key of a single-item call.
//! Attribute names always go through `#name` placeholders.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use moviereviews_core::reviews::{MovieId, ReviewFilter, YearMatch};

use super::conversions::{ATTR_MOVIE_ID, ATTR_RATING, ATTR_REVIEWER_NAME, ATTR_REVIEW_DATE};

/// Everything needed to issue one `Query` request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub index_name: Option<String>,
    pub key_condition: String,
    pub filter_expression: Option<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
    /// `None` leaves the store default (eventually consistent).
    pub consistent_read: Option<bool>,
}

fn name_placeholder(attribute: &str) -> String {
    format!("#{attribute}")
}

/// Primary key of a review.
pub fn review_key(movie_id: MovieId, reviewer_name: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ATTR_MOVIE_ID.to_string(),
            AttributeValue::N(movie_id.to_string()),
        ),
        (
            ATTR_REVIEWER_NAME.to_string(),
            AttributeValue::S(reviewer_name.to_string()),
        ),
    ])
}

/// Query the partition of one movie, optionally narrowed by a post-filter.
///
/// Strongly consistent reads are only requested when `consistent_read` is set.
pub fn movie_reviews_query(
    movie_id: MovieId,
    filter: &ReviewFilter,
    consistent_read: bool,
) -> QuerySpec {
    let mut names = HashMap::from([(name_placeholder(ATTR_MOVIE_ID), ATTR_MOVIE_ID.to_string())]);
    let mut values = HashMap::from([(
        ":movieId".to_string(),
        AttributeValue::N(movie_id.to_string()),
    )]);

    let filter_expression = match filter {
        ReviewFilter::All => None,
        ReviewFilter::Year(year, mode) => {
            names.insert(
                name_placeholder(ATTR_REVIEW_DATE),
                ATTR_REVIEW_DATE.to_string(),
            );
            values.insert(":year".to_string(), AttributeValue::S(year.to_string()));
            Some(match mode {
                YearMatch::Contains => "contains(#reviewDate, :year)".to_string(),
                YearMatch::Prefix => "begins_with(#reviewDate, :year)".to_string(),
            })
        }
        ReviewFilter::MinRating(min) => {
            names.insert(name_placeholder(ATTR_RATING), ATTR_RATING.to_string());
            values.insert(":minRating".to_string(), AttributeValue::N(min.to_string()));
            Some("#rating > :minRating".to_string())
        }
    };

    QuerySpec {
        index_name: None,
        key_condition: "#movieId = :movieId".to_string(),
        filter_expression,
        names,
        values,
        consistent_read: consistent_read.then_some(true),
    }
}

/// Query the reviewer index for every review by one reviewer.
///
/// Global secondary indexes only support eventually consistent reads.
pub fn reviewer_reviews_query(reviewer_name: &str, index_name: &str) -> QuerySpec {
    QuerySpec {
        index_name: Some(index_name.to_string()),
        key_condition: "#reviewerName = :reviewerName".to_string(),
        filter_expression: None,
        names: HashMap::from([(
            name_placeholder(ATTR_REVIEWER_NAME),
            ATTR_REVIEWER_NAME.to_string(),
        )]),
        values: HashMap::from([(
            ":reviewerName".to_string(),
            AttributeValue::S(reviewer_name.to_string()),
        )]),
        consistent_read: None,
    }
}

/// Condition for writes that must not replace an existing review.
pub const CONDITION_ABSENT: &str = "attribute_not_exists(#movieId)";
/// Condition for writes that require an existing review.
pub const CONDITION_PRESENT: &str = "attribute_exists(#movieId)";
/// Update expression that touches only the content.
pub const UPDATE_CONTENT: &str = "SET #content = :content";
