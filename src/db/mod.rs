//! Activity directory storage.

pub mod db;
pub mod error;
pub mod seed;

// Re-export main types
pub use db::{Storage, DB};
pub use error::{DirectoryError, SeedError};
