use serde::{Deserialize, Serialize};

/// Query string for signup and unregister: `?email=...`.
///
/// The email is taken as-is; no format validation is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantQuery {
    pub email: String,
}

/// Success body for roster changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body shared by every failing request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}
