//! Read-filter semantics shared by every storage backend.

use std::str::FromStr;

use super::types::{MovieReview, Year};

/// How a year is matched against the stored `reviewDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearMatch {
    /// Substring containment anywhere in the ISO date string. This is not a
    /// range check: `"2023"` also matches `"+12023-01-01"`.
    #[default]
    Contains,
    /// The date starts with the year.
    Prefix,
}

impl FromStr for YearMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "prefix" => Ok(Self::Prefix),
            other => Err(format!("unknown year filter mode: {other}")),
        }
    }
}

/// Post-filter applied to the reviews of one movie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    Year(Year, YearMatch),
    /// Keeps reviews rated strictly above the threshold.
    MinRating(i64),
}

impl ReviewFilter {
    pub fn matches(&self, review: &MovieReview) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Year(year, YearMatch::Contains) => {
                review.review_date_iso().contains(year.as_str())
            }
            ReviewFilter::Year(year, YearMatch::Prefix) => {
                review.review_date_iso().starts_with(year.as_str())
            }
            ReviewFilter::MinRating(min) => i64::from(review.rating.get()) > *min,
        }
    }

    /// Applies the filter to a set of reviews.
    pub fn apply(&self, reviews: impl IntoIterator<Item = MovieReview>) -> Vec<MovieReview> {
        reviews.into_iter().filter(|r| self.matches(r)).collect()
    }
}
