//! Functional core for the movie reviews service.
//!
//! Everything in this crate is pure: domain types, parameter validation,
//! read-filter semantics, the error taxonomy and the repository contract.
//! I/O lives in the `moviereviews` binary crate.

pub mod reviews;
pub mod storage;
