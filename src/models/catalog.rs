use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;

use super::{Activity, Catalog};

/// The activities offered at Mergington High School at the start of term.
pub fn default_catalog() -> Catalog {
    [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Soccer Team",
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Wednesdays, 4:00 PM - 5:30 PM",
                18,
            )
            .with_participants(["lucas@mergington.edu", "mia@mergington.edu"]),
        ),
        (
            "Basketball Club",
            Activity::new(
                "Practice basketball skills and play friendly games",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["liam@mergington.edu", "ava@mergington.edu"]),
        ),
        (
            "Art Workshop",
            Activity::new(
                "Explore painting, drawing, and sculpture techniques",
                "Mondays, 4:00 PM - 5:30 PM",
                16,
            )
            .with_participants(["ella@mergington.edu", "noah@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Act, direct, and produce school plays and performances",
                "Tuesdays, 5:00 PM - 6:30 PM",
                20,
            )
            .with_participants(["jack@mergington.edu", "grace@mergington.edu"]),
        ),
        (
            "Mathletes",
            Activity::new(
                "Compete in math competitions and solve challenging problems",
                "Fridays, 4:00 PM - 5:00 PM",
                10,
            )
            .with_participants(["ben@mergington.edu", "chloe@mergington.edu"]),
        ),
        (
            "Science Club",
            Activity::new(
                "Conduct experiments and explore scientific concepts",
                "Wednesdays, 3:30 PM - 4:30 PM",
                14,
            )
            .with_participants(["ethan@mergington.edu", "zoe@mergington.edu"]),
        ),
    ]
    .into_iter()
    .map(|(name, activity)| (name.to_string(), activity))
    .collect()
}

/// Parse a catalog from the same JSON shape `GET /activities` returns.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Read and validate a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}

/// Check the invariants the store relies on.
///
/// Rosters larger than `max_participants` are accepted: capacity is a soft
/// limit that only applies to new signups.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    for (name, activity) in catalog {
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if activity.max_participants == 0 {
            return Err(CatalogError::ZeroCapacity {
                activity: name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for email in &activity.participants {
            if !seen.insert(email.as_str()) {
                return Err(CatalogError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }
    Ok(())
}
