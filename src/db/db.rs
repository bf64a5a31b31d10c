// In-memory activity directory.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{Config, ConfigTrait};
use crate::model::{Activity, ActivityDirectory, ActivitySeed};

use super::error::DirectoryError;
use super::seed;

const COMP_STORAGE: &str = "storage";

/// Trait for activity directory backends.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns every activity keyed by name, in seed order.
    fn list(&self) -> ActivityDirectory;

    /// Returns a single activity by name.
    fn get(&self, name: &str) -> Result<Activity, DirectoryError>;

    /// Adds the email to the end of the activity roster and returns a
    /// confirmation message.
    fn enroll(&self, name: &str, email: &str) -> Result<String, DirectoryError>;

    /// Removes the email from the activity roster and returns a
    /// confirmation message.
    fn withdraw(&self, name: &str, email: &str) -> Result<String, DirectoryError>;

    /// Returns directory statistics: (activities, enrolled participants).
    fn stat(&self) -> (usize, usize);

    /// Gracefully closes storage.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Activity directory kept in process memory for the process lifetime.
///
/// The activity set is fixed on construction; only rosters change. Every
/// operation runs check and mutation under one lock acquisition, so a
/// rejected call leaves the directory untouched.
pub struct DB {
    activities: RwLock<Vec<(String, Activity)>>,
    enforce_capacity: bool,
}

impl DB {
    /// Builds the directory from the configured activity list, or from the
    /// built-in catalogue when the config has none.
    pub fn new(cfg: &Config) -> Result<Arc<Self>> {
        let seeds = match cfg.activities() {
            Some(list) => list.to_vec(),
            None => seed::default_activities(),
        };
        let db = Self::from_seeds(seeds, cfg.enforce_capacity())?;

        let (activities, participants) = db.stat();
        info!(
            component = COMP_STORAGE,
            event = "seeded",
            activities = activities,
            participants = participants,
            enforce_capacity = db.enforce_capacity,
            "activity directory initialized"
        );

        Ok(Arc::new(db))
    }

    /// Builds the directory from explicit seeds.
    pub fn from_seeds(seeds: Vec<ActivitySeed>, enforce_capacity: bool) -> Result<Self> {
        seed::validate(&seeds).context("invalid activity seed data")?;

        let activities = seeds
            .into_iter()
            .map(|s| (s.name, s.activity))
            .collect::<Vec<_>>();

        Ok(Self {
            activities: RwLock::new(activities),
            enforce_capacity,
        })
    }

    /// Returns true if enroll rejects full activities.
    pub fn enforces_capacity(&self) -> bool {
        self.enforce_capacity
    }

    fn reject(op: &'static str, name: &str, email: &str, err: DirectoryError) -> DirectoryError {
        debug!(
            component = COMP_STORAGE,
            event = "rejected",
            op = op,
            activity = name,
            email = email,
            reason = %err,
            "roster operation rejected"
        );
        err
    }
}

#[async_trait::async_trait]
impl Storage for DB {
    fn list(&self) -> ActivityDirectory {
        ActivityDirectory::new(self.activities.read().clone())
    }

    fn get(&self, name: &str) -> Result<Activity, DirectoryError> {
        self.activities
            .read()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a.clone())
            .ok_or(DirectoryError::ActivityNotFound)
    }

    fn enroll(&self, name: &str, email: &str) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write();

        let activity = match activities.iter_mut().find(|(n, _)| n == name) {
            Some((_, a)) => a,
            None => return Err(Self::reject("enroll", name, email, DirectoryError::ActivityNotFound)),
        };

        if activity.is_enrolled(email) {
            return Err(Self::reject("enroll", name, email, DirectoryError::AlreadySignedUp));
        }
        if self.enforce_capacity && activity.is_full() {
            return Err(Self::reject("enroll", name, email, DirectoryError::ActivityFull));
        }

        activity.enroll(email);

        info!(
            component = COMP_STORAGE,
            event = "enrolled",
            activity = name,
            email = email,
            participants = activity.participants.len(),
            max_participants = activity.max_participants,
            "participant signed up"
        );

        Ok(format!("Signed up {} for {}", email, name))
    }

    fn withdraw(&self, name: &str, email: &str) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write();

        let activity = match activities.iter_mut().find(|(n, _)| n == name) {
            Some((_, a)) => a,
            None => return Err(Self::reject("withdraw", name, email, DirectoryError::ActivityNotFound)),
        };

        if !activity.withdraw(email) {
            return Err(Self::reject("withdraw", name, email, DirectoryError::ParticipantNotFound));
        }

        info!(
            component = COMP_STORAGE,
            event = "withdrawn",
            activity = name,
            email = email,
            participants = activity.participants.len(),
            "participant unregistered"
        );

        Ok(format!("Unregistered {} from {}", email, name))
    }

    fn stat(&self) -> (usize, usize) {
        let activities = self.activities.read();
        let participants = activities.iter().map(|(_, a)| a.participants.len()).sum();
        (activities.len(), participants)
    }

    async fn close(&self) -> Result<()> {
        let (activities, participants) = self.stat();
        info!(
            component = COMP_STORAGE,
            event = "closed",
            activities = activities,
            participants = participants,
            "activity directory closed, rosters are not persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICHAEL: &str = "michael@mergington.edu";
    const DANIEL: &str = "daniel@mergington.edu";
    const JOHN: &str = "john@mergington.edu";

    fn seeds() -> Vec<ActivitySeed> {
        vec![
            ActivitySeed::new(
                "Chess Club",
                Activity::new(
                    "Learn strategies and compete in chess tournaments",
                    "Fridays, 3:30 PM - 5:00 PM",
                    12,
                    vec![MICHAEL.to_string(), DANIEL.to_string()],
                ),
            ),
            ActivitySeed::new(
                "Programming Class",
                Activity::new(
                    "Learn programming fundamentals and build software projects",
                    "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                    20,
                    vec!["emma@mergington.edu".to_string(), "sophia@mergington.edu".to_string()],
                ),
            ),
        ]
    }

    fn db() -> DB {
        DB::from_seeds(seeds(), true).unwrap()
    }

    fn roster(db: &DB, name: &str) -> Vec<String> {
        db.get(name).unwrap().participants
    }

    #[test]
    fn test_list_returns_all_activities_in_seed_order() {
        let dir = db().list();
        let names: Vec<&str> = dir.names().collect();
        assert_eq!(names, vec!["Chess Club", "Programming Class"]);
        let chess = dir.get("Chess Club").unwrap();
        assert_eq!(chess.max_participants, 12);
        assert_eq!(chess.participants.len(), 2);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let db = db();
        let before = db.list();
        db.enroll("Chess Club", JOHN).unwrap();
        assert_eq!(before.get("Chess Club").unwrap().participants.len(), 2);
        assert_eq!(db.list().get("Chess Club").unwrap().participants.len(), 3);
    }

    #[test]
    fn test_enroll_appends_and_confirms() {
        let db = db();
        let msg = db.enroll("Chess Club", JOHN).unwrap();
        assert!(msg.contains("Signed up"));
        assert!(msg.contains(JOHN));
        assert!(msg.contains("Chess Club"));
        assert_eq!(roster(&db, "Chess Club"), vec![MICHAEL, DANIEL, JOHN]);
    }

    #[test]
    fn test_enroll_duplicate_leaves_roster_unchanged() {
        let db = db();
        assert_eq!(
            db.enroll("Chess Club", MICHAEL),
            Err(DirectoryError::AlreadySignedUp)
        );
        assert_eq!(roster(&db, "Chess Club"), vec![MICHAEL, DANIEL]);
    }

    #[test]
    fn test_enroll_unknown_activity_changes_nothing() {
        let db = db();
        let before = db.list();
        assert_eq!(
            db.enroll("Fake Club", JOHN),
            Err(DirectoryError::ActivityNotFound)
        );
        assert_eq!(db.list(), before);
    }

    #[test]
    fn test_withdraw_removes_and_confirms() {
        let db = db();
        db.enroll("Chess Club", JOHN).unwrap();
        let msg = db.withdraw("Chess Club", MICHAEL).unwrap();
        assert!(msg.contains("Unregistered"));
        assert!(msg.contains(MICHAEL));
        assert_eq!(roster(&db, "Chess Club"), vec![DANIEL, JOHN]);
    }

    #[test]
    fn test_withdraw_absent_participant_changes_nothing() {
        let db = db();
        assert_eq!(
            db.withdraw("Chess Club", "notregistered@mergington.edu"),
            Err(DirectoryError::ParticipantNotFound)
        );
        assert_eq!(roster(&db, "Chess Club"), vec![MICHAEL, DANIEL]);
    }

    #[test]
    fn test_withdraw_unknown_activity() {
        let db = db();
        let before = db.list();
        assert_eq!(
            db.withdraw("Fake Club", MICHAEL),
            Err(DirectoryError::ActivityNotFound)
        );
        assert_eq!(db.list(), before);
    }

    #[test]
    fn test_operations_are_not_idempotent() {
        let db = db();
        db.enroll("Chess Club", JOHN).unwrap();
        assert!(db.enroll("Chess Club", JOHN).is_err());
        db.withdraw("Chess Club", JOHN).unwrap();
        assert!(db.withdraw("Chess Club", JOHN).is_err());
    }

    #[test]
    fn test_full_activity_rejects_when_enforced() {
        let seeds = vec![ActivitySeed::new(
            "Tiny",
            Activity::new("d", "s", 1, vec![MICHAEL.to_string()]),
        )];
        let db = DB::from_seeds(seeds.clone(), true).unwrap();
        assert_eq!(db.enroll("Tiny", JOHN), Err(DirectoryError::ActivityFull));
        assert_eq!(roster(&db, "Tiny"), vec![MICHAEL]);

        let db = DB::from_seeds(seeds, false).unwrap();
        assert!(db.enroll("Tiny", JOHN).is_ok());
        assert_eq!(roster(&db, "Tiny"), vec![MICHAEL, JOHN]);
    }

    #[test]
    fn test_duplicate_check_precedes_capacity_check() {
        let seeds = vec![ActivitySeed::new(
            "Tiny",
            Activity::new("d", "s", 1, vec![MICHAEL.to_string()]),
        )];
        let db = DB::from_seeds(seeds, true).unwrap();
        assert_eq!(
            db.enroll("Tiny", MICHAEL),
            Err(DirectoryError::AlreadySignedUp)
        );
    }

    #[test]
    fn test_stat_counts_participants() {
        let db = db();
        assert_eq!(db.stat(), (2, 4));
        db.enroll("Programming Class", JOHN).unwrap();
        assert_eq!(db.stat(), (2, 5));
    }

    #[test]
    fn test_invalid_seeds_are_rejected() {
        let mut s = seeds();
        s.push(s[0].clone());
        assert!(DB::from_seeds(s, true).is_err());
    }

    #[test]
    fn test_concurrent_enrollments_are_all_recorded() {
        let db = Arc::new(db());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                std::thread::spawn(move || {
                    db.enroll("Programming Class", &format!("student{}@mergington.edu", i))
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_ok());
        }
        assert_eq!(roster(&db, "Programming Class").len(), 10);
    }
}
