//! Command handler layer.
//!
//! ## Files
//! - `catalog.rs` — one-shot list/search/show/types/topics handlers.
//! - `menu.rs` — interactive menu loop.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate queries to the store, rendering to `services/*`.
//! - Keep behavior and `--json` output schema stable.

pub mod catalog;
pub mod menu;

pub use catalog::handle_catalog_command;
pub use menu::run_menu;
