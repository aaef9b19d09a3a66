//! CLI commands
//!
//! Command implementations for the `partsfinder` binary.

mod catalog;
mod inquire;
mod progress;
mod search;
pub mod style;

pub use catalog::{run_image, run_makes, run_models, run_parts};
pub use inquire::{InquireArgs, run_inquire};
pub use search::run_search;
