use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An extracurricular offering and its current roster.
///
/// The activity name is not stored here; it is the key under which the
/// activity lives in the [`Catalog`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    /// Free-text meeting time, e.g. "Fridays, 3:30 PM - 5:00 PM".
    pub schedule: String,
    /// Advertised capacity. Only enforced when the store runs with
    /// [`CapacityPolicy::Enforced`](crate::store::CapacityPolicy::Enforced).
    pub max_participants: u32,
    /// Participant emails in signup order. Never contains duplicates.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// All activities keyed by name.
pub type Catalog = BTreeMap<String, Activity>;

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    /// Open places left, zero when the roster is at or over capacity.
    pub fn spots_left(&self) -> usize {
        (self.max_participants as usize).saturating_sub(self.participants.len())
    }
}
