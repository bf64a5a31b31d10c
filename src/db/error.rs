// Error definitions for the activity directory.

use axum::http::StatusCode;

/// Rejections of a directory operation. A rejected operation never
/// changes any roster.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student is already signed up")]
    AlreadySignedUp,

    #[error("Activity is full")]
    ActivityFull,

    #[error("Participant not found in this activity")]
    ParticipantNotFound,
}

impl DirectoryError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ActivityNotFound | Self::ParticipantNotFound => StatusCode::NOT_FOUND,
            Self::AlreadySignedUp | Self::ActivityFull => StatusCode::BAD_REQUEST,
        }
    }
}

/// Invalid seed data in the configured activity list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("activity name must not be empty")]
    EmptyName,

    #[error("activity {0:?} is defined more than once")]
    DuplicateActivity(String),

    #[error("activity {0:?} must allow at least one participant")]
    ZeroCapacity(String),

    #[error("activity {activity:?} lists {email:?} more than once")]
    DuplicateParticipant { activity: String, email: String },
}
