pub mod error;
pub mod health;
pub mod params;
pub mod reviews;

pub use error::ApiError;
