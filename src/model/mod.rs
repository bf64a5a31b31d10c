// Package model provides activity records and the directory snapshot.

pub mod activity;
pub mod directory;

// Re-export main types
pub use activity::Activity;
pub use directory::{ActivityDirectory, ActivitySeed};
