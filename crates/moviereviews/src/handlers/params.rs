//! Axum extractor for the raw review parameters of a request.
//!
//! Path values are taken from the request URI as sent, still
//! percent-encoded, so that decoding happens once, in the validator.

use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRequestParts, MatchedPath, Query},
    http::request::Parts,
};

use moviereviews_core::reviews::RawReviewParams;

/// Raw path and query parameters, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewParams(pub RawReviewParams);

/// Pairs each `{name}` segment of a route template with the raw segment of `path`.
fn raw_path_params<'a>(template: &'a str, path: &'a str) -> Vec<(&'a str, &'a str)> {
    template
        .split('/')
        .zip(path.split('/'))
        .filter_map(|(pattern, segment)| {
            pattern
                .strip_prefix('{')
                .and_then(|p| p.strip_suffix('}'))
                .map(|name| (name, segment))
        })
        .collect()
}

fn build_params(template: Option<&str>, path: &str, query: &HashMap<String, String>) -> RawReviewParams {
    let mut params = RawReviewParams::default();

    for (name, value) in template.map(|t| raw_path_params(t, path)).unwrap_or_default() {
        let value = Some(value.to_string());
        match name {
            "movieId" => params.movie_id = value,
            "reviewerName" => params.reviewer_name = value,
            "year" => params.year = value,
            _ => {}
        }
    }

    params.min_rating = query
        .get("minRating")
        .or_else(|| query.get("minRate"))
        .cloned();

    params
}

impl<S> FromRequestParts<S> for ReviewParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let template = parts.extensions.get::<MatchedPath>().map(MatchedPath::as_str);
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unparsable query string");
                HashMap::new()
            });

        Ok(ReviewParams(build_params(template, parts.uri.path(), &query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_path_params_keep_encoding() {
        let params = raw_path_params(
            "/movies/{movieId}/reviews/{reviewerName}",
            "/movies/998/reviews/John%20Doe",
        );

        assert_eq!(params, vec![("movieId", "998"), ("reviewerName", "John%20Doe")]);
    }

    #[test]
    fn test_build_params_for_year_route() {
        let params = build_params(
            Some("/movies/{movieId}/reviews/year/{year}"),
            "/movies/999/reviews/year/2023",
            &HashMap::new(),
        );

        assert_eq!(params.movie_id.as_deref(), Some("999"));
        assert_eq!(params.year.as_deref(), Some("2023"));
        assert_eq!(params.reviewer_name, None);
    }

    #[test]
    fn test_build_params_reads_min_rating_and_legacy_alias() {
        let template = Some("/movies/{movieId}/review");
        let path = "/movies/998/review";

        let current = HashMap::from([("minRating".to_string(), "4".to_string())]);
        assert_eq!(
            build_params(template, path, &current).min_rating.as_deref(),
            Some("4")
        );

        let legacy = HashMap::from([("minRate".to_string(), "2".to_string())]);
        assert_eq!(
            build_params(template, path, &legacy).min_rating.as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_build_params_without_matched_route() {
        let params = build_params(None, "/anything", &HashMap::new());
        assert_eq!(params, RawReviewParams::default());
    }
}
