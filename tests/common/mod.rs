//! Shared test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_api;

pub use fixtures::*;
pub use mock_api::{MockPartsApi, RecordingObserver, RecordingSink};

/// Yield to the runtime until `condition` holds
///
/// Panics after a bounded number of yields so a broken test cannot hang.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
