//! parts-finder - vehicle part search and inquiry client
//!
//! Cascading Year → Manufacturer → Model → Part search against the parts
//! catalog API, with single-flight inquiry (lead) submission.
//!
//! The library is front-end agnostic: progress and analytics are reported
//! through the [`inquiry::SubmitObserver`] and [`events::EventSink`] traits.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod inquiry;
pub mod resolver;
pub mod types;

#[doc(hidden)]
pub use serde_json;
