//! In-memory roster store.
//!
//! [`RosterStore`] owns the catalog for the lifetime of the process. Handlers
//! receive a clone of the handle as router state; tests build their own
//! instances so no state leaks between cases.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::RosterError;
use crate::models::{Catalog, MessageResponse};

/// Whether `max_participants` blocks new signups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Capacity is displayed but never enforced.
    #[default]
    Advisory,
    /// Signups are refused once the roster reaches capacity.
    Enforced,
}

/// A roster change that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    SignedUp { activity: String, email: String },
    Unregistered { activity: String, email: String },
}

impl Confirmation {
    pub fn activity(&self) -> &str {
        match self {
            Self::SignedUp { activity, .. } | Self::Unregistered { activity, .. } => activity,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::SignedUp { email, .. } | Self::Unregistered { email, .. } => email,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignedUp { activity, email } => write!(f, "Signed up {email} for {activity}"),
            Self::Unregistered { activity, email } => {
                write!(f, "Unregistered {email} from {activity}")
            }
        }
    }
}

impl From<Confirmation> for MessageResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            message: confirmation.message(),
        }
    }
}

/// Shared handle to the activity catalog.
///
/// Every operation holds the lock for its whole lookup-then-mutate sequence,
/// so concurrent requests cannot double-insert or lose an update.
#[derive(Debug, Clone)]
pub struct RosterStore {
    activities: Arc<Mutex<Catalog>>,
    policy: CapacityPolicy,
}

impl RosterStore {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_policy(catalog, CapacityPolicy::default())
    }

    pub fn with_policy(catalog: Catalog, policy: CapacityPolicy) -> Self {
        Self {
            activities: Arc::new(Mutex::new(catalog)),
            policy,
        }
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    // Each mutation is a single push or remove, so a panic elsewhere cannot
    // leave a roster half-updated and the poisoned guard is safe to reuse.
    fn roster(&self) -> MutexGuard<'_, Catalog> {
        self.activities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every activity and its current participants.
    pub fn list_activities(&self) -> Catalog {
        self.roster().clone()
    }

    /// Add `email` to the roster of `activity_name`.
    ///
    /// The name must match exactly, including case and whitespace. Any string
    /// is accepted as an email, including an empty one.
    pub fn sign_up(&self, activity_name: &str, email: &str) -> Result<Confirmation, RosterError> {
        let mut activities = self.roster();
        let activity =
            activities
                .get_mut(activity_name)
                .ok_or_else(|| RosterError::ActivityNotFound {
                    activity: activity_name.to_string(),
                })?;

        if activity.has_participant(email) {
            return Err(RosterError::AlreadyRegistered {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        if self.policy == CapacityPolicy::Enforced && activity.is_full() {
            return Err(RosterError::ActivityFull {
                activity: activity_name.to_string(),
                capacity: activity.max_participants,
            });
        }

        activity.participants.push(email.to_string());
        tracing::info!(
            activity = activity_name,
            email,
            spots_left = activity.spots_left(),
            "participant signed up"
        );

        Ok(Confirmation::SignedUp {
            activity: activity_name.to_string(),
            email: email.to_string(),
        })
    }

    /// Remove `email` from the roster of `activity_name`.
    pub fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Confirmation, RosterError> {
        let mut activities = self.roster();
        let activity =
            activities
                .get_mut(activity_name)
                .ok_or_else(|| RosterError::ActivityNotFound {
                    activity: activity_name.to_string(),
                })?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| RosterError::NotRegistered {
                activity: activity_name.to_string(),
                email: email.to_string(),
            })?;

        activity.participants.remove(position);
        tracing::info!(activity = activity_name, email, "participant unregistered");

        Ok(Confirmation::Unregistered {
            activity: activity_name.to_string(),
            email: email.to_string(),
        })
    }
}
