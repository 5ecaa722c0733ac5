//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep catalog/output structs in one place.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — catalog entry and JSON envelope structs.
//!
//! ## Rule of thumb
//! Domain types are data-only: no filesystem side effects.

pub mod models;
