// HTTP API controllers for the activity directory.

pub mod activities;
pub mod controller;
pub mod probe;
pub mod response;
pub mod root;
pub mod signup;
pub mod unregister;

// Re-export controller types for convenience
pub use activities::ActivitiesController;
pub use probe::LivenessProbeController;
pub use root::RootController;
pub use signup::SignupController;
pub use unregister::UnregisterController;
