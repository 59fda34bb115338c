//! Domain models for the activity signup service.
//!
//! - [`Activity`]: one extracurricular offering with its capacity and roster.
//! - [`Catalog`]: every activity keyed by its name. Seeded once at startup,
//!   either from [`default_catalog`] or a JSON file via [`load_catalog`].
//! - [`ParticipantQuery`], [`MessageResponse`], [`ErrorResponse`]: the HTTP
//!   request and response bodies.

mod activity;
mod catalog;
mod response;

pub use activity::*;
pub use catalog::*;
pub use response::*;
