//! DynamoDB storage backend implementation.
//!
//! Table layout: partition key `movieId` (N), sort key `reviewerName` (S),
//! and a global secondary index keyed on `reviewerName` / `movieId` for
//! lookups across movies.

mod conversions;
mod error;
mod queries;
mod repository;

pub use repository::DynamoDbRepository;
