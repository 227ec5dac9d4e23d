//! Canonical, engine-agnostic metadata model.
//!
//! The types in this module represent database schema metadata after
//! normalization: every engine's catalog output is reduced to the same
//! descriptor structures so the diff engine can compare them directly.

pub mod identifier;
pub mod schema;
