// Activity record and its roster.

use serde::{Deserialize, Serialize};

/// One extracurricular offering.
///
/// The activity name is not part of the record; it is the key the record
/// is stored under (see [`super::ActivityDirectory`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: usize,
        participants: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants,
        }
    }

    /// Returns true if the email is on the roster.
    pub fn is_enrolled(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Returns true once the roster has reached capacity.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    /// Number of free places left.
    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }

    /// Appends the email to the end of the roster.
    /// Returns false (roster untouched) if it is already present.
    pub fn enroll(&mut self, email: &str) -> bool {
        if self.is_enrolled(email) {
            return false;
        }
        self.participants.push(email.to_string());
        true
    }

    /// Removes the email from the roster keeping the order of the rest.
    /// Returns false (roster untouched) if it was not present.
    pub fn withdraw(&mut self, email: &str) -> bool {
        match self.participants.iter().position(|p| p == email) {
            Some(idx) => {
                self.participants.remove(idx);
                true
            }
            None => false,
        }
    }
}
