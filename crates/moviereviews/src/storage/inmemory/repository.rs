//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use moviereviews_core::reviews::{MovieId, MovieReview, ReviewFilter, ReviewKey};
use moviereviews_core::storage::{RepositoryError, Result, ReviewRepository};

type StoreKey = (MovieId, String);

/// In-memory storage backend.
///
/// The map is ordered by movie id then reviewer name, so query results come
/// back in sort-key order like a partition query would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    reviews: Arc<RwLock<BTreeMap<StoreKey, MovieReview>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    #[cfg(feature = "inmemory")]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `reviews`.
    #[cfg(test)]
    pub fn with_reviews(reviews: impl IntoIterator<Item = MovieReview>) -> Self {
        let map = reviews
            .into_iter()
            .map(|r| ((r.movie_id, r.reviewer_name.clone()), r))
            .collect();
        Self {
            reviews: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository {
    async fn get_review(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
    ) -> Result<Option<MovieReview>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&(movie_id, reviewer_name.to_string())).cloned())
    }

    async fn get_reviews_for_movie(
        &self,
        movie_id: MovieId,
        filter: &ReviewFilter,
    ) -> Result<Vec<MovieReview>> {
        let reviews = self.reviews.read().await;
        let partition = reviews
            .range((movie_id, String::new())..)
            .take_while(|((id, _), _)| *id == movie_id)
            .map(|(_, review)| review.clone());

        Ok(filter.apply(partition))
    }

    async fn get_reviews_by_reviewer(&self, reviewer_name: &str) -> Result<Vec<MovieReview>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .filter(|r| r.reviewer_name == reviewer_name)
            .cloned()
            .collect())
    }

    async fn put_review(&self, review: &MovieReview) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        reviews.insert((review.movie_id, review.reviewer_name.clone()), review.clone());
        Ok(())
    }

    async fn insert_review(&self, review: &MovieReview) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        let key = (review.movie_id, review.reviewer_name.clone());
        if reviews.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists(review.key()));
        }
        reviews.insert(key, review.clone());
        Ok(())
    }

    async fn update_review_content(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
        content: &str,
    ) -> Result<MovieReview> {
        let mut reviews = self.reviews.write().await;
        let review = reviews
            .get_mut(&(movie_id, reviewer_name.to_string()))
            .ok_or_else(|| RepositoryError::NotFound(ReviewKey::new(movie_id, reviewer_name)))?;
        review.content = content.to_string();
        Ok(review.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use moviereviews_core::reviews::{Rating, Year, YearMatch};

    use super::*;

    fn review(movie_id: u64, name: &str, date: &str, rating: u8) -> MovieReview {
        MovieReview {
            movie_id: MovieId::new(movie_id).unwrap(),
            reviewer_name: name.to_string(),
            review_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            content: format!("{name} on {movie_id}"),
            rating: Rating::new(rating).unwrap(),
        }
    }

    fn id(n: u64) -> MovieId {
        MovieId::new(n).unwrap()
    }

    fn sample_repo() -> InMemoryRepository {
        InMemoryRepository::with_reviews([
            review(998, "John Doe", "2023-10-20", 5),
            review(999, "Michael Jackson", "2023-11-22", 3),
            review(999, "Ann Lee", "2022-03-01", 4),
            review(1000, "John Doe", "2024-01-05", 2),
        ])
    }

    #[tokio::test]
    async fn test_many_reviews_per_movie_do_not_collide() {
        let repo = sample_repo();

        let reviews = repo.get_reviews_for_movie(id(999), &ReviewFilter::All).await.unwrap();

        let names: Vec<&str> = reviews.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["Ann Lee", "Michael Jackson"]);
    }

    #[tokio::test]
    async fn test_movie_partition_stops_at_neighbours() {
        let repo = sample_repo();

        for (movie, expected) in [(997, 0), (998, 1), (1000, 1), (1001, 0)] {
            let reviews = repo.get_reviews_for_movie(id(movie), &ReviewFilter::All).await.unwrap();

            assert_eq!(reviews.len(), expected, "movie {movie}");
            assert!(reviews.iter().all(|r| r.movie_id == id(movie)));
        }
    }

    #[tokio::test]
    async fn test_get_review_by_key() {
        let repo = sample_repo();

        let found = repo.get_review(id(998), "John Doe").await.unwrap();
        assert_eq!(found.unwrap().rating.get(), 5);

        assert!(repo.get_review(id(998), "Ann Lee").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_year_and_rating_filters() {
        let repo = sample_repo();

        let by_year = repo
            .get_reviews_for_movie(
                id(999),
                &ReviewFilter::Year(Year::parse("2022").unwrap(), YearMatch::Contains),
            )
            .await
            .unwrap();
        assert_eq!(by_year.len(), 1);
        assert_eq!(by_year[0].reviewer_name, "Ann Lee");

        let above_three = repo
            .get_reviews_for_movie(id(999), &ReviewFilter::MinRating(3))
            .await
            .unwrap();
        assert_eq!(above_three.len(), 1);
        assert_eq!(above_three[0].reviewer_name, "Ann Lee");
    }

    #[tokio::test]
    async fn test_get_reviews_by_reviewer_spans_movies() {
        let repo = sample_repo();

        let reviews = repo.get_reviews_by_reviewer("John Doe").await.unwrap();

        let movies: Vec<u64> = reviews.iter().map(|r| r.movie_id.get()).collect();
        assert_eq!(movies, vec![998, 1000]);
    }

    #[tokio::test]
    async fn test_put_review_overwrites() {
        let repo = sample_repo();
        let mut replacement = review(998, "John Doe", "2023-10-21", 1);
        replacement.content = "Changed my mind".to_string();

        repo.put_review(&replacement).await.unwrap();

        let stored = repo.get_review(id(998), "John Doe").await.unwrap().unwrap();
        assert_eq!(stored, replacement);
    }

    #[tokio::test]
    async fn test_insert_review_rejects_existing_key() {
        let repo = sample_repo();

        let result = repo.insert_review(&review(998, "John Doe", "2023-10-21", 1)).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists(ReviewKey::new(id(998), "John Doe")))
        );
        assert!(repo.insert_review(&review(998, "New Person", "2023-10-21", 1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_content_only() {
        let repo = sample_repo();

        let updated = repo
            .update_review_content(id(999), "Michael Jackson", "Grew on me")
            .await
            .unwrap();

        assert_eq!(updated.content, "Grew on me");
        assert_eq!(updated.rating.get(), 3);
        assert_eq!(updated.review_date_iso(), "2023-11-22");
    }

    #[tokio::test]
    async fn test_update_missing_review_is_not_found() {
        let repo = sample_repo();

        let result = repo.update_review_content(id(1), "Nobody", "text").await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound(ReviewKey::new(id(1), "Nobody")))
        );
    }
}
