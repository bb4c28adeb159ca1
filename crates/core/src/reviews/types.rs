use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a movie. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct MovieId(u64);

impl MovieId {
    /// Creates a movie id, returning `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for MovieId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "movieId must be a positive integer".to_string())
    }
}

impl From<MovieId> for u64 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review score between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, returning `None` when outside `1..=5`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "rating must be between 1 and 5".to_string())
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A four digit calendar year, as used by the year filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Year(String);

impl Year {
    /// Accepts exactly four ASCII digits.
    pub fn parse(value: &str) -> Option<Self> {
        (value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of a review: partition key `movieId`, sort key `reviewerName`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReviewKey {
    pub movie_id: MovieId,
    pub reviewer_name: String,
}

impl ReviewKey {
    pub fn new(movie_id: MovieId, reviewer_name: impl Into<String>) -> Self {
        Self {
            movie_id,
            reviewer_name: reviewer_name.into(),
        }
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.movie_id, self.reviewer_name)
    }
}

/// A single reviewer's review of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieReview {
    pub movie_id: MovieId,
    pub reviewer_name: String,
    /// Serialized as `YYYY-MM-DD`.
    pub review_date: NaiveDate,
    pub content: String,
    pub rating: Rating,
}

impl MovieReview {
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.movie_id, self.reviewer_name.clone())
    }

    /// The review date as stored, an ISO-8601 calendar date.
    pub fn review_date_iso(&self) -> String {
        self.review_date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review() -> MovieReview {
        MovieReview {
            movie_id: MovieId::new(998).unwrap(),
            reviewer_name: "John Doe".to_string(),
            review_date: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
            content: "Best movie to ever exist!".to_string(),
            rating: Rating::new(5).unwrap(),
        }
    }

    #[test]
    fn test_movie_id_rejects_zero() {
        assert!(MovieId::new(0).is_none());
        assert_eq!(MovieId::new(7).map(MovieId::get), Some(7));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(5).is_some());
        assert!(Rating::new(6).is_none());
    }

    #[test]
    fn test_year_requires_four_digits() {
        assert_eq!(Year::parse("2023").unwrap().as_str(), "2023");
        assert!(Year::parse("203").is_none());
        assert!(Year::parse("20234").is_none());
        assert!(Year::parse("20a3").is_none());
        assert!(Year::parse("").is_none());
    }

    #[test]
    fn test_review_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample_review()).unwrap();

        assert_eq!(json["movieId"], 998);
        assert_eq!(json["reviewerName"], "John Doe");
        assert_eq!(json["reviewDate"], "2023-10-20");
        assert_eq!(json["content"], "Best movie to ever exist!");
        assert_eq!(json["rating"], 5);
    }

    #[test]
    fn test_review_deserialize_rejects_out_of_range_rating() {
        let json = serde_json::json!({
            "movieId": 1,
            "reviewerName": "A",
            "reviewDate": "2024-01-01",
            "content": "ok",
            "rating": 9
        });

        assert!(serde_json::from_value::<MovieReview>(json).is_err());
    }

    #[test]
    fn test_review_key_display() {
        assert_eq!(sample_review().key().to_string(), "998/John Doe");
    }
}
