// Ordered name -> activity mapping as exposed by GET /activities.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::Activity;

/// Snapshot of every activity keyed by name.
///
/// Entries keep their seed order, which is also the JSON key order the
/// front-end renders in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDirectory {
    entries: Vec<(String, Activity)>,
}

impl ActivityDirectory {
    pub fn new(entries: Vec<(String, Activity)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

impl Serialize for ActivityDirectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

/// Activity definition as it appears in the config `activities` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct ActivitySeed {
    pub name: String,
    #[serde(flatten)]
    pub activity: Activity,
}

impl ActivitySeed {
    pub fn new(name: impl Into<String>, activity: Activity) -> Self {
        Self {
            name: name.into(),
            activity,
        }
    }
}
