//! Structured event sink
//!
//! The resolver and the submission pipeline report what happens to an
//! injected [`EventSink`] instead of calling an analytics backend directly.
//! Recording is fire-and-forget: sinks must not block or fail the caller.

mod client_id;

pub use client_id::ClientId;

use serde_json::{Map, Value};
use tracing::info;

/// Event attributes (a JSON object)
pub type Attributes = Map<String, Value>;

/// A selection dropdown changed
pub const SEARCH_FILTER_CHANGE: &str = "search_filter_change";
/// A catalog collection failed to load
pub const CATALOG_FETCH_FAILED: &str = "catalog_fetch_failed";
/// A superseded models response was dropped
pub const STALE_RESPONSE_DISCARDED: &str = "stale_response_discarded";
/// An inquiry submission reached a terminal state
pub const FORM_SUBMIT: &str = "form_submit";
/// An API call failed
pub const API_ERROR: &str = "api_error";

/// Sink for structured events
pub trait EventSink: Send + Sync {
    /// Record one event
    fn record(&self, event: &str, attributes: Attributes);
}

/// Sink that drops every event
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &str, _attributes: Attributes) {}
}

/// Sink that writes events to the `analytics` tracing target
pub struct TracingSink {
    client_id: ClientId,
}

impl TracingSink {
    /// Create a sink that tags events with a client id
    pub const fn new(client_id: ClientId) -> Self {
        Self { client_id }
    }
}

impl EventSink for TracingSink {
    fn record(&self, event: &str, attributes: Attributes) {
        let attributes = Value::Object(attributes);
        info!(
            target: "analytics",
            client_id = %self.client_id,
            event,
            %attributes,
            "event"
        );
    }
}

/// Build an [`Attributes`] map from `key => value` pairs
///
/// ```
/// let attrs = parts_finder::attributes! { "filter_type" => "year", "filter_value" => 2015 };
/// assert_eq!(attrs["filter_value"], 2015);
/// ```
#[macro_export]
macro_rules! attributes {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::events::Attributes::new();
        $(map.insert(($key).to_string(), $crate::serde_json::json!($value));)*
        map
    }};
}
