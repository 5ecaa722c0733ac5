//! Service layer containing output helpers.
//!
//! ## Service map
//! - `output.rs` — JSON/text output helpers for one-shot commands.
//! - `render.rs` — human-readable console rendering for the menu.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Keep command handlers thin; delegate to services.

pub mod output;
pub mod render;
