//! Request validation.
//!
//! Parameter checks run before any store access. Write payloads are checked
//! against a fixed rule table per field instead of a runtime schema.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::error::{FieldViolation, ReviewError};
use super::requests::{CreateReviewRequest, RawReviewParams, UpdateReviewRequest};
use super::types::{MovieId, MovieReview, Rating, Year};

fn percent_decode(field: &'static str, raw: &str) -> Result<String, ReviewError> {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .map_err(|_| ReviewError::malformed(field, "is not valid UTF-8 after percent-decoding"))
}

/// `movieId` must be a positive integer. Absence and parse failures are both
/// reported as a missing parameter.
pub fn validate_movie_id(raw: Option<&str>) -> Result<MovieId, ReviewError> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .and_then(MovieId::new)
        .ok_or(ReviewError::MissingParameter("movieId"))
}

/// `reviewerName` must be non-empty once percent-decoded.
pub fn validate_reviewer_name(raw: Option<&str>) -> Result<String, ReviewError> {
    let raw = raw.ok_or(ReviewError::MissingParameter("reviewerName"))?;
    let name = percent_decode("reviewerName", raw)?;

    if name.trim().is_empty() {
        return Err(ReviewError::MissingParameter("reviewerName"));
    }

    Ok(name)
}

/// `year` must be exactly four digits.
pub fn validate_year(raw: Option<&str>) -> Result<Year, ReviewError> {
    let raw = raw
        .filter(|value| !value.is_empty())
        .ok_or(ReviewError::MissingParameter("year"))?;
    let decoded = percent_decode("year", raw)?;

    Year::parse(&decoded).ok_or_else(|| ReviewError::malformed("year", "must be a 4-digit year"))
}

/// `minRating` must be an integer. Any integer is accepted; the comparison
/// against stored ratings is strict.
pub fn validate_min_rating(raw: Option<&str>) -> Result<i64, ReviewError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ReviewError::MissingParameter("minRating"))?;

    raw.parse::<i64>()
        .map_err(|_| ReviewError::malformed("minRating", "must be an integer"))
}

impl RawReviewParams {
    pub fn movie_id(&self) -> Result<MovieId, ReviewError> {
        validate_movie_id(self.movie_id.as_deref())
    }

    pub fn reviewer_name(&self) -> Result<String, ReviewError> {
        validate_reviewer_name(self.reviewer_name.as_deref())
    }

    pub fn year(&self) -> Result<Year, ReviewError> {
        validate_year(self.year.as_deref())
    }

    pub fn min_rating(&self) -> Result<i64, ReviewError> {
        validate_min_rating(self.min_rating.as_deref())
    }
}

// ============================================================================
// Payload rules
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    PositiveInteger,
    NonEmptyString,
    Text,
    IsoDate,
    IntegerInRange(i64, i64),
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

const CREATE_REVIEW_RULES: &[FieldRule] = &[
    FieldRule {
        name: "movieId",
        kind: FieldKind::PositiveInteger,
        required: true,
    },
    FieldRule {
        name: "reviewerName",
        kind: FieldKind::NonEmptyString,
        required: true,
    },
    FieldRule {
        name: "reviewDate",
        kind: FieldKind::IsoDate,
        required: true,
    },
    FieldRule {
        name: "content",
        kind: FieldKind::Text,
        required: true,
    },
    FieldRule {
        name: "rating",
        kind: FieldKind::IntegerInRange(Rating::MIN as i64, Rating::MAX as i64),
        required: true,
    },
];

const UPDATE_REVIEW_RULES: &[FieldRule] = &[FieldRule {
    name: "content",
    kind: FieldKind::Text,
    required: true,
}];

fn check_kind(kind: FieldKind, value: &Value) -> Option<String> {
    match kind {
        FieldKind::PositiveInteger => match value.as_u64() {
            Some(n) if n > 0 => None,
            _ => Some("must be a positive integer".to_string()),
        },
        FieldKind::NonEmptyString => match value.as_str() {
            Some(s) if !s.trim().is_empty() => None,
            _ => Some("must be a non-empty string".to_string()),
        },
        FieldKind::Text => match value {
            Value::String(_) => None,
            _ => Some("must be a string".to_string()),
        },
        FieldKind::IsoDate => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => None,
            _ => Some("must be an ISO-8601 date (YYYY-MM-DD)".to_string()),
        },
        FieldKind::IntegerInRange(min, max) => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => None,
            _ => Some(format!("must be an integer between {min} and {max}")),
        },
    }
}

fn check_rules(body: &Value, rules: &[FieldRule]) -> Result<Map<String, Value>, ReviewError> {
    let Some(object) = body.as_object() else {
        return Err(ReviewError::ValidationFailure(vec![FieldViolation::new(
            "body",
            "must be a JSON object",
        )]));
    };

    let violations: Vec<FieldViolation> = rules
        .iter()
        .filter_map(|rule| match object.get(rule.name) {
            None | Some(Value::Null) if rule.required => {
                Some(FieldViolation::new(rule.name, "is required"))
            }
            None | Some(Value::Null) => None,
            Some(value) => {
                check_kind(rule.kind, value).map(|msg| FieldViolation::new(rule.name, msg))
            }
        })
        .collect();

    if violations.is_empty() {
        Ok(object.clone())
    } else {
        Err(ReviewError::ValidationFailure(violations))
    }
}

fn deserialize_checked<T: serde::de::DeserializeOwned>(
    object: Map<String, Value>,
) -> Result<T, ReviewError> {
    serde_json::from_value(Value::Object(object)).map_err(|e| {
        ReviewError::ValidationFailure(vec![FieldViolation::new("body", e.to_string())])
    })
}

/// Validates a create payload and returns the review to store.
pub fn validate_create_review(body: &Value) -> Result<MovieReview, ReviewError> {
    let object = check_rules(body, CREATE_REVIEW_RULES)?;
    let request: CreateReviewRequest = deserialize_checked(object)?;
    Ok(request.into_review())
}

/// Validates an update payload. Fields other than `content` are ignored.
pub fn validate_update_review(body: &Value) -> Result<UpdateReviewRequest, ReviewError> {
    let mut object = check_rules(body, UPDATE_REVIEW_RULES)?;
    object.retain(|key, _| key == "content");
    deserialize_checked(object)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn violations(error: ReviewError) -> Vec<FieldViolation> {
        match error {
            ReviewError::ValidationFailure(v) => v,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    #[test]
    fn test_movie_id_valid() {
        assert_eq!(validate_movie_id(Some("998")).unwrap().get(), 998);
    }

    #[test]
    fn test_movie_id_absent_or_unparsable_is_missing() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-4"), Some("1.5")] {
            assert_eq!(
                validate_movie_id(raw),
                Err(ReviewError::MissingParameter("movieId")),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_reviewer_name_is_percent_decoded() {
        assert_eq!(validate_reviewer_name(Some("John%20Doe")).unwrap(), "John Doe");
        assert_eq!(
            validate_reviewer_name(Some("Ren%C3%A9e")).unwrap(),
            "Renée"
        );
    }

    #[test]
    fn test_reviewer_name_empty_is_missing() {
        assert_eq!(
            validate_reviewer_name(None),
            Err(ReviewError::MissingParameter("reviewerName"))
        );
        assert_eq!(
            validate_reviewer_name(Some("")),
            Err(ReviewError::MissingParameter("reviewerName"))
        );
        assert_eq!(
            validate_reviewer_name(Some("%20%20")),
            Err(ReviewError::MissingParameter("reviewerName"))
        );
    }

    #[test]
    fn test_reviewer_name_invalid_utf8_is_malformed() {
        assert!(matches!(
            validate_reviewer_name(Some("%FF")),
            Err(ReviewError::MalformedParameter { field: "reviewerName", .. })
        ));
    }

    #[test]
    fn test_year_validation() {
        assert_eq!(validate_year(Some("2023")).unwrap().as_str(), "2023");
        assert_eq!(validate_year(None), Err(ReviewError::MissingParameter("year")));
        assert_eq!(validate_year(Some("")), Err(ReviewError::MissingParameter("year")));
        assert!(matches!(
            validate_year(Some("23")),
            Err(ReviewError::MalformedParameter { field: "year", .. })
        ));
    }

    #[test]
    fn test_min_rating_validation() {
        assert_eq!(validate_min_rating(Some("3")).unwrap(), 3);
        assert_eq!(validate_min_rating(Some("0")).unwrap(), 0);
        assert_eq!(
            validate_min_rating(None),
            Err(ReviewError::MissingParameter("minRating"))
        );
        assert!(matches!(
            validate_min_rating(Some("four")),
            Err(ReviewError::MalformedParameter { field: "minRating", .. })
        ));
    }

    #[test]
    fn test_raw_params_accessors() {
        let params = RawReviewParams {
            movie_id: Some("12".into()),
            reviewer_name: Some("Jane%20Roe".into()),
            ..Default::default()
        };

        assert_eq!(params.movie_id().unwrap().get(), 12);
        assert_eq!(params.reviewer_name().unwrap(), "Jane Roe");
        assert_eq!(params.year(), Err(ReviewError::MissingParameter("year")));
    }

    // ------------------------------------------------------------------------
    // Payloads
    // ------------------------------------------------------------------------

    fn valid_create_body() -> Value {
        json!({
            "movieId": 999,
            "reviewerName": "Michael Jackson",
            "reviewDate": "2023-11-22",
            "content": "It was a fun family movie, but nothing fancy.",
            "rating": 3
        })
    }

    #[test]
    fn test_create_review_valid() {
        let review = validate_create_review(&valid_create_body()).unwrap();

        assert_eq!(review.movie_id.get(), 999);
        assert_eq!(review.reviewer_name, "Michael Jackson");
        assert_eq!(review.review_date_iso(), "2023-11-22");
        assert_eq!(review.rating.get(), 3);
    }

    #[test]
    fn test_create_review_reports_all_violations() {
        let body = json!({
            "movieId": "999",
            "reviewDate": "22/11/2023",
            "content": 12,
            "rating": 6
        });

        let fields: Vec<&str> = violations(validate_create_review(&body).unwrap_err())
            .iter()
            .map(|v| v.field)
            .collect();

        assert_eq!(
            fields,
            vec!["movieId", "reviewerName", "reviewDate", "content", "rating"]
        );
    }

    #[test]
    fn test_create_review_rating_bounds() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let mut body = valid_create_body();
            body["rating"] = json!(rating);
            assert_eq!(validate_create_review(&body).is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn test_create_review_rejects_fractional_rating() {
        let mut body = valid_create_body();
        body["rating"] = json!(4.5);
        assert!(validate_create_review(&body).is_err());
    }

    #[test]
    fn test_create_review_rejects_non_object() {
        let error = validate_create_review(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(violations(error)[0].field, "body");
    }

    #[test]
    fn test_create_review_null_counts_as_missing() {
        let mut body = valid_create_body();
        body["content"] = Value::Null;

        let violations = violations(validate_create_review(&body).unwrap_err());
        assert_eq!(violations, vec![FieldViolation::new("content", "is required")]);
    }

    #[test]
    fn test_update_review_valid_ignores_other_fields() {
        let body = json!({ "content": "Changed my mind", "rating": 1 });
        assert_eq!(
            validate_update_review(&body).unwrap(),
            UpdateReviewRequest::new("Changed my mind")
        );
    }

    #[test]
    fn test_update_review_requires_string_content() {
        assert!(validate_update_review(&json!({})).is_err());
        assert!(validate_update_review(&json!({ "content": 5 })).is_err());
    }
}
