//! Activity signup service for Mergington High School.
//!
//! Students browse a fixed catalog of extracurricular activities and register
//! or withdraw by email address. All state lives in a [`store::RosterStore`]
//! that is seeded at startup and shared with the HTTP handlers in [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
