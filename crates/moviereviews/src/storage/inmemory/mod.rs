//! In-memory storage backend.
//!
//! Stores every review in a `BTreeMap` keyed by `(movieId, reviewerName)`
//! behind `Arc<RwLock<_>>`. Reads always observe completed writes. Data is
//! lost when the process exits.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
