//! Application context
//!
//! Everything the search and inquiry components share is constructed once
//! here and handed down explicitly. [`AppContext::shutdown`] is the
//! teardown hook: it cancels every navigation still pending.

use crate::api::{PartsApi, create_parts_api};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::events::EventSink;
use crate::inquiry::{SubmissionPipeline, SubmitObserver};
use crate::resolver::CatalogResolver;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::debug;

/// Shared handles for one session
pub struct AppContext {
    config: ApiConfig,
    api: Arc<dyn PartsApi>,
    events: Arc<dyn EventSink>,
    pipelines: Mutex<Vec<Weak<SubmissionPipeline>>>,
}

impl AppContext {
    /// Build the HTTP client from `config`
    pub fn init(config: ApiConfig, events: Arc<dyn EventSink>) -> Result<Self> {
        let api = create_parts_api(&config)?;
        Ok(Self::with_api(config, api, events))
    }

    /// Use an existing API implementation
    pub fn with_api(config: ApiConfig, api: Arc<dyn PartsApi>, events: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            api,
            events,
            pipelines: Mutex::new(Vec::new()),
        }
    }

    /// Configuration in use
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The API client
    pub fn api(&self) -> Arc<dyn PartsApi> {
        Arc::clone(&self.api)
    }

    /// The event sink
    pub fn events(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.events)
    }

    /// A fresh resolver (empty selection, nothing loaded)
    pub fn resolver(&self) -> CatalogResolver {
        CatalogResolver::new(self.api(), self.events())
    }

    /// A fresh submission pipeline reporting to `observer`
    pub fn pipeline(&self, observer: Arc<dyn SubmitObserver>) -> Arc<SubmissionPipeline> {
        let pipeline = Arc::new(SubmissionPipeline::new(
            self.api(),
            self.events(),
            observer,
            self.config.redirect_delay,
        ));

        let mut pipelines = self.pipelines.lock().unwrap_or_else(PoisonError::into_inner);
        pipelines.retain(|p| p.strong_count() > 0);
        pipelines.push(Arc::downgrade(&pipeline));

        pipeline
    }

    /// Cancel pending navigations of every live pipeline
    ///
    /// Returns how many navigations were cancelled.
    pub fn shutdown(&self) -> usize {
        let pipelines = std::mem::take(
            &mut *self.pipelines.lock().unwrap_or_else(PoisonError::into_inner),
        );
        let cancelled = pipelines
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|p| p.cancel())
            .count();
        debug!(cancelled, "context shut down");
        cancelled
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
