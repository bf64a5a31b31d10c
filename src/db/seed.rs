// Built-in activity catalogue loaded at startup.

use std::collections::HashSet;

use crate::model::{Activity, ActivitySeed};

use super::error::SeedError;

fn seed(
    name: &str,
    description: &str,
    schedule: &str,
    max_participants: usize,
    participants: &[&str],
) -> ActivitySeed {
    ActivitySeed::new(
        name,
        Activity::new(
            description,
            schedule,
            max_participants,
            participants.iter().map(|p| p.to_string()).collect(),
        ),
    )
}

/// Activities offered when the config does not list its own.
pub fn default_activities() -> Vec<ActivitySeed> {
    vec![
        seed(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        seed(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        seed(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
        seed(
            "Soccer Team",
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
            &["liam@mergington.edu", "noah@mergington.edu"],
        ),
        seed(
            "Basketball Team",
            "Practice and play basketball with the school team",
            "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
            15,
            &["ava@mergington.edu", "mia@mergington.edu"],
        ),
        seed(
            "Art Club",
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            &["amelia@mergington.edu", "harper@mergington.edu"],
        ),
        seed(
            "Drama Club",
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
            &["ella@mergington.edu", "scarlett@mergington.edu"],
        ),
        seed(
            "Math Club",
            "Solve challenging problems and participate in math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            10,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        ),
        seed(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
            &["charlotte@mergington.edu", "henry@mergington.edu"],
        ),
    ]
}

/// Checks that seeds can form a valid directory: unique non-empty names,
/// positive capacity and duplicate-free rosters.
pub fn validate(seeds: &[ActivitySeed]) -> Result<(), SeedError> {
    let mut names = HashSet::with_capacity(seeds.len());
    for s in seeds {
        if s.name.trim().is_empty() {
            return Err(SeedError::EmptyName);
        }
        if !names.insert(s.name.as_str()) {
            return Err(SeedError::DuplicateActivity(s.name.clone()));
        }
        if s.activity.max_participants == 0 {
            return Err(SeedError::ZeroCapacity(s.name.clone()));
        }
        let mut emails = HashSet::with_capacity(s.activity.participants.len());
        for email in &s.activity.participants {
            if !emails.insert(email.as_str()) {
                return Err(SeedError::DuplicateParticipant {
                    activity: s.name.clone(),
                    email: email.clone(),
                });
            }
        }
    }
    Ok(())
}
