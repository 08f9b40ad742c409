//! Shared types and rule engines for the Agro Advisor platform.
//!
//! This crate contains the domain model plus the pure advisory logic
//! (soil scoring, crop advice, sustainability scoring, forecast
//! aggregation) shared between the backend and its auxiliary binaries.

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
