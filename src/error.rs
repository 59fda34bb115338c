use std::path::PathBuf;

use thiserror::Error;

/// Why a roster change was refused.
///
/// The `Display` text is the message returned to clients, so it stays fixed
/// regardless of which activity or student was involved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Activity not found")]
    ActivityNotFound { activity: String },

    #[error("Student already signed up")]
    AlreadyRegistered { activity: String, email: String },

    #[error("Student is not registered for this activity")]
    NotRegistered { activity: String, email: String },

    #[error("Activity is full")]
    ActivityFull { activity: String, capacity: u32 },
}

/// Catalog file could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("activity names must not be empty")]
    EmptyName,

    #[error("activity {activity:?} must allow at least one participant")]
    ZeroCapacity { activity: String },

    #[error("activity {activity:?} lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}
