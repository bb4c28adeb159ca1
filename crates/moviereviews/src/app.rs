use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::livez,
        reviews::{
            create_review, get_movie_review_by_reviewer, get_movie_reviews,
            get_movie_reviews_by_year, get_movie_reviews_with_min_rating, get_reviews_by_reviewer,
            method_not_allowed, route_not_found, update_review,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/livez", get(livez))
        // Review routes
        .route("/movies/reviews", post(create_review))
        .route("/movies/{movieId}/reviews", get(get_movie_reviews))
        .route(
            "/movies/{movieId}/reviews/year/{year}",
            get(get_movie_reviews_by_year),
        )
        .route(
            "/movies/{movieId}/reviews/{reviewerName}",
            get(get_movie_review_by_reviewer).put(update_review),
        )
        .route(
            "/movies/{movieId}/review",
            get(get_movie_reviews_with_min_rating),
        )
        .route("/reviews/{reviewerName}", get(get_reviews_by_reviewer))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
