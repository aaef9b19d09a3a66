//! Mock parts API, event sink and submit observer for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use parts_finder::api::PartsApi;
use parts_finder::config::ApiConfig;
use parts_finder::error::{Error, Result};
use parts_finder::events::{Attributes, EventSink};
use parts_finder::inquiry::{SubmitObserver, SubmitState};
use parts_finder::types::{
    ImageQuery, InquiryReply, InquiryRequest, InquiryResponse, Manufacturer, Model, PartCategory,
    ProductImage,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Simple mock parts API for testing
///
/// Features:
/// - Configurable catalog contents and inquiry responses
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - One-shot gates that hold the next response until the test releases it
pub struct MockPartsApi {
    config: ApiConfig,
    manufacturers: Mutex<Vec<Manufacturer>>,
    models: Mutex<HashMap<u64, Vec<Model>>>,
    part_categories: Mutex<Vec<PartCategory>>,
    inquiry_response: Mutex<InquiryResponse>,
    images: Mutex<HashMap<ImageQuery, ProductImage>>,
    // Call tracking
    manufacturer_calls: AtomicUsize,
    part_category_calls: AtomicUsize,
    model_calls: Mutex<Vec<u64>>,
    submit_calls: Mutex<Vec<InquiryRequest>>,
    image_calls: Mutex<Vec<ImageQuery>>,
    // Error injection
    error_on_manufacturers: Mutex<Option<String>>,
    error_on_models: Mutex<Option<String>>,
    error_on_submit: Mutex<Option<String>>,
    // Gates
    manufacturers_gate: Mutex<Option<Arc<Notify>>>,
    model_gates: Mutex<HashMap<u64, Arc<Notify>>>,
    submit_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockPartsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPartsApi {
    /// Create an empty mock that accepts every inquiry
    pub fn new() -> Self {
        Self {
            config: ApiConfig::new("http://localhost:8000/api").unwrap(),
            manufacturers: Mutex::new(Vec::new()),
            models: Mutex::new(HashMap::new()),
            part_categories: Mutex::new(Vec::new()),
            inquiry_response: Mutex::new(InquiryResponse {
                status: 201,
                reply: InquiryReply {
                    success: true,
                    ..InquiryReply::default()
                },
            }),
            images: Mutex::new(HashMap::new()),
            manufacturer_calls: AtomicUsize::new(0),
            part_category_calls: AtomicUsize::new(0),
            model_calls: Mutex::new(Vec::new()),
            submit_calls: Mutex::new(Vec::new()),
            image_calls: Mutex::new(Vec::new()),
            error_on_manufacturers: Mutex::new(None),
            error_on_models: Mutex::new(None),
            error_on_submit: Mutex::new(None),
            manufacturers_gate: Mutex::new(None),
            model_gates: Mutex::new(HashMap::new()),
            submit_gate: Mutex::new(None),
        }
    }

    /// A mock seeded with the sample catalog
    pub fn with_catalog() -> Self {
        let api = Self::new();
        api.set_manufacturers(crate::common::sample_manufacturers());
        api.set_models(crate::common::TOYOTA, crate::common::toyota_models());
        api.set_models(crate::common::HONDA, crate::common::honda_models());
        api.set_part_categories(crate::common::sample_parts());
        api
    }

    // === Response configuration ===

    pub fn set_manufacturers(&self, manufacturers: Vec<Manufacturer>) {
        *self.manufacturers.lock().unwrap() = manufacturers;
    }

    pub fn set_models(&self, manufacturer_id: u64, models: Vec<Model>) {
        self.models.lock().unwrap().insert(manufacturer_id, models);
    }

    pub fn set_part_categories(&self, parts: Vec<PartCategory>) {
        *self.part_categories.lock().unwrap() = parts;
    }

    pub fn set_inquiry_response(&self, response: InquiryResponse) {
        *self.inquiry_response.lock().unwrap() = response;
    }

    pub fn set_image(&self, query: ImageQuery, image: ProductImage) {
        self.images.lock().unwrap().insert(query, image);
    }

    // === Error injection methods ===

    /// Make `list_manufacturers` fail with a 500
    pub fn fail_manufacturers(&self, msg: &str) {
        *self.error_on_manufacturers.lock().unwrap() = Some(msg.to_string());
    }

    /// Let `list_manufacturers` succeed again
    pub fn recover_manufacturers(&self) {
        *self.error_on_manufacturers.lock().unwrap() = None;
    }

    /// Make `list_models` fail with a 500
    pub fn fail_models(&self, msg: &str) {
        *self.error_on_models.lock().unwrap() = Some(msg.to_string());
    }

    /// Let `list_models` succeed again
    pub fn recover_models(&self) {
        *self.error_on_models.lock().unwrap() = None;
    }

    /// Make `submit_inquiry` fail at the transport level
    pub fn fail_submit(&self, msg: &str) {
        *self.error_on_submit.lock().unwrap() = Some(msg.to_string());
    }

    // === Gates ===

    /// Hold `list_manufacturers` until the returned handle is notified
    pub fn hold_manufacturers(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.manufacturers_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Hold `list_models(manufacturer_id)` until the returned handle is notified
    pub fn hold_models(&self, manufacturer_id: u64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.model_gates
            .lock()
            .unwrap()
            .insert(manufacturer_id, Arc::clone(&gate));
        gate
    }

    /// Hold `submit_inquiry` until the returned handle is notified
    pub fn hold_submit(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.submit_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    // === Call verification methods ===

    pub fn manufacturer_calls(&self) -> usize {
        self.manufacturer_calls.load(Ordering::SeqCst)
    }

    pub fn part_category_calls(&self) -> usize {
        self.part_category_calls.load(Ordering::SeqCst)
    }

    pub fn model_calls(&self) -> Vec<u64> {
        self.model_calls.lock().unwrap().clone()
    }

    pub fn submit_calls(&self) -> Vec<InquiryRequest> {
        self.submit_calls.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<ImageQuery> {
        self.image_calls.lock().unwrap().clone()
    }
}

fn injected(error: &Mutex<Option<String>>) -> Result<()> {
    match error.lock().unwrap().as_ref() {
        Some(message) => Err(Error::Api {
            status: 500,
            message: message.clone(),
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl PartsApi for MockPartsApi {
    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>> {
        self.manufacturer_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.manufacturers_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        injected(&self.error_on_manufacturers)?;
        Ok(self.manufacturers.lock().unwrap().clone())
    }

    async fn list_models(&self, manufacturer_id: u64) -> Result<Vec<Model>> {
        self.model_calls.lock().unwrap().push(manufacturer_id);
        let gate = self.model_gates.lock().unwrap().remove(&manufacturer_id);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        injected(&self.error_on_models)?;
        Ok(self
            .models
            .lock()
            .unwrap()
            .get(&manufacturer_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_part_categories(&self) -> Result<Vec<PartCategory>> {
        self.part_category_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.part_categories.lock().unwrap().clone())
    }

    async fn submit_inquiry(&self, request: &InquiryRequest) -> Result<InquiryResponse> {
        self.submit_calls.lock().unwrap().push(request.clone());
        let gate = self.submit_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(msg) = self.error_on_submit.lock().unwrap().as_ref() {
            return Err(Error::Internal(msg.clone()));
        }
        Ok(self.inquiry_response.lock().unwrap().clone())
    }

    async fn product_image(&self, query: &ImageQuery) -> Result<Option<ProductImage>> {
        self.image_calls.lock().unwrap().push(*query);
        Ok(self.images.lock().unwrap().get(query).cloned())
    }

    fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Event sink that keeps every event for inspection
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Attributes)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events, in order
    pub fn events(&self) -> Vec<(String, Attributes)> {
        self.events.lock().unwrap().clone()
    }

    /// Attributes of every event named `name`
    pub fn named(&self, name: &str) -> Vec<Attributes> {
        self.events()
            .into_iter()
            .filter(|(event, _)| event == name)
            .map(|(_, attributes)| attributes)
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &str, attributes: Attributes) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), attributes));
    }
}

/// Submit observer that keeps every state and counts navigations
#[derive(Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<SubmitState>>,
    navigations: AtomicUsize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<SubmitState> {
        self.states.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> usize {
        self.navigations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmitObserver for RecordingObserver {
    async fn on_state(&self, state: &SubmitState) {
        self.states.lock().unwrap().push(state.clone());
    }

    async fn on_navigate(&self) {
        self.navigations.fetch_add(1, Ordering::SeqCst);
    }
}
