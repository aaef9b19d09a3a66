//! Catalog resolver
//!
//! Owns the [`Selection`] and the three catalog collections, and keeps the
//! Models collection consistent with the selected manufacturer:
//!
//! - Manufacturers and part categories are fetched once per session.
//!   Concurrent loads share one request; a load after a failure retries.
//! - Every Models fetch carries a request token. A response is applied
//!   only if its token is still the latest and its manufacturer is still
//!   selected when it arrives; anything else is discarded.

mod selection;
mod state;

pub use selection::Selection;
pub use state::LoadState;

use crate::api::PartsApi;
use crate::attributes;
use crate::error::{CatalogError, Collection, Error, ResolverError};
use crate::events::{self, EventSink};
use crate::types::{InquiryCandidate, Manufacturer, Model, PartCategory, VehicleDescription};
use chrono::Datelike;
use state::Slot;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Oldest model year offered
pub const FIRST_MODEL_YEAR: i32 = 1990;

/// Where selection events originate
const FILTER_LOCATION: &str = "vehicle_search";

/// Outcome of a Models fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelsFetch {
    /// The result was applied to resolver state
    Applied(Arc<[Model]>),
    /// A newer request or a manufacturer change superseded this one
    Superseded,
    /// Manufacturer was cleared; no request was made
    Cleared,
}

#[derive(Default)]
struct ResolverState {
    selection: Selection,
    manufacturers: Slot<Manufacturer>,
    part_categories: Slot<PartCategory>,
    models: LoadState<Model>,
    models_token: u64,
}

fn manufacturers_slot(state: &mut ResolverState) -> &mut Slot<Manufacturer> {
    &mut state.manufacturers
}

fn part_categories_slot(state: &mut ResolverState) -> &mut Slot<PartCategory> {
    &mut state.part_categories
}

/// Dependent Year → Manufacturer → Model → Part resolver
pub struct CatalogResolver {
    api: Arc<dyn PartsApi>,
    events: Arc<dyn EventSink>,
    state: Mutex<ResolverState>,
    manufacturers_gate: tokio::sync::Mutex<()>,
    part_categories_gate: tokio::sync::Mutex<()>,
    model_requests: AtomicU64,
}

impl CatalogResolver {
    /// Create a resolver with empty selection and unloaded collections
    pub fn new(api: Arc<dyn PartsApi>, events: Arc<dyn EventSink>) -> Self {
        Self {
            api,
            events,
            state: Mutex::new(ResolverState::default()),
            manufacturers_gate: tokio::sync::Mutex::new(()),
            part_categories_gate: tokio::sync::Mutex::new(()),
            model_requests: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Snapshots ===

    /// Current selection
    pub fn selection(&self) -> Selection {
        self.lock().selection
    }

    /// Manufacturers collection
    pub fn manufacturers(&self) -> LoadState<Manufacturer> {
        self.lock().manufacturers.state.clone()
    }

    /// Models collection (always for the selected manufacturer)
    pub fn models(&self) -> LoadState<Model> {
        self.lock().models.clone()
    }

    /// Part categories collection
    pub fn part_categories(&self) -> LoadState<PartCategory> {
        self.lock().part_categories.state.clone()
    }

    // === Loading ===

    /// Load manufacturers once per session
    ///
    /// On failure the collection is `Failed` and reads as empty.
    pub async fn load_manufacturers(&self) -> Result<Arc<[Manufacturer]>, CatalogError> {
        self.load_once(
            Collection::Manufacturers,
            &self.manufacturers_gate,
            manufacturers_slot,
            || self.api.list_manufacturers(),
        )
        .await
    }

    /// Load part categories once per session
    pub async fn load_part_categories(&self) -> Result<Arc<[PartCategory]>, CatalogError> {
        self.load_once(
            Collection::PartCategories,
            &self.part_categories_gate,
            part_categories_slot,
            || self.api.list_part_categories(),
        )
        .await
    }

    async fn load_once<T, F, Fut>(
        &self,
        collection: Collection,
        gate: &tokio::sync::Mutex<()>,
        slot: fn(&mut ResolverState) -> &mut Slot<T>,
        fetch: F,
    ) -> Result<Arc<[T]>, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = crate::error::Result<Vec<T>>>,
    {
        let seen = {
            let mut state = self.lock();
            let slot = slot(&mut state);
            if let LoadState::Loaded(items) = &slot.state {
                return Ok(Arc::clone(items));
            }
            slot.completed
        };

        let _in_flight = gate.lock().await;

        {
            let mut state = self.lock();
            let slot = slot(&mut state);
            match &slot.state {
                LoadState::Loaded(items) => return Ok(Arc::clone(items)),
                // A fetch finished while we waited; share its outcome
                LoadState::Failed(err) if slot.completed != seen => return Err(err.clone()),
                _ => {}
            }
            slot.state = LoadState::Loading;
        }

        debug!(%collection, "loading catalog collection");
        let outcome = fetch().await;

        let mut state = self.lock();
        let slot = slot(&mut state);
        slot.completed += 1;
        match outcome {
            Ok(items) => {
                let items: Arc<[T]> = Arc::from(items);
                slot.state = LoadState::Loaded(Arc::clone(&items));
                Ok(items)
            }
            Err(e) => {
                let err = CatalogError::fetch_failed(collection, &e);
                slot.state = LoadState::Failed(err.clone());
                drop(state);
                self.report_fetch_failure(collection, &e);
                Err(err)
            }
        }
    }

    /// Load the models of a manufacturer
    ///
    /// The result is applied only if `manufacturer_id` is still selected
    /// and no newer Models request was issued by the time it arrives.
    pub async fn load_models(&self, manufacturer_id: u64) -> Result<ModelsFetch, CatalogError> {
        let token = self.model_requests.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock();
            if state.selection.manufacturer_id() == Some(manufacturer_id) {
                state.models_token = token;
                state.models = LoadState::Loading;
            }
        }

        debug!(manufacturer_id, token, "loading models");
        let outcome = self.api.list_models(manufacturer_id).await;

        let mut state = self.lock();
        let current = state.models_token == token
            && state.selection.manufacturer_id() == Some(manufacturer_id);

        if !current {
            drop(state);
            warn!(manufacturer_id, token, "discarding superseded models response");
            self.events.record(
                events::STALE_RESPONSE_DISCARDED,
                attributes! {
                    "collection" => Collection::Models.as_str(),
                    "manufacturer_id" => manufacturer_id,
                },
            );
            return Ok(ModelsFetch::Superseded);
        }

        match outcome {
            Ok(models) => {
                let total = models.len();
                let models: Arc<[Model]> = models
                    .into_iter()
                    .filter(|m| m.manufacturer_id == manufacturer_id)
                    .collect();
                if models.len() != total {
                    warn!(
                        manufacturer_id,
                        dropped = total - models.len(),
                        "API returned models of another manufacturer"
                    );
                }
                state.models = LoadState::Loaded(Arc::clone(&models));
                Ok(ModelsFetch::Applied(models))
            }
            Err(e) => {
                let err = CatalogError::fetch_failed(Collection::Models, &e);
                state.models = LoadState::Failed(err.clone());
                drop(state);
                self.report_fetch_failure(Collection::Models, &e);
                Err(err)
            }
        }
    }

    fn report_fetch_failure(&self, collection: Collection, cause: &Error) {
        warn!(%collection, error = %cause, "catalog fetch failed");
        self.events.record(
            events::CATALOG_FETCH_FAILED,
            attributes! {
                "collection" => collection.as_str(),
                "status_code" => cause.status_code(),
                "error_message" => cause.to_string(),
            },
        );
    }

    // === Selection ===

    /// Select (or clear) the model year
    pub fn select_year(&self, year: Option<i32>) {
        self.lock().selection.set_year(year);
        self.record_filter_change("year", year);
    }

    /// Select (or clear) the part category
    pub fn select_part_category(&self, id: Option<u64>) {
        self.lock().selection.set_part_category(id);
        self.record_filter_change("part_category", id);
    }

    /// Select (or clear) the manufacturer
    ///
    /// Clears the model, drops the previous manufacturer's models and
    /// fetches the new ones.
    pub async fn select_manufacturer(&self, id: Option<u64>) -> Result<ModelsFetch, CatalogError> {
        {
            let mut state = self.lock();
            state.selection.set_manufacturer(id);
            // Invalidate whatever Models request is in flight
            state.models_token = self.model_requests.fetch_add(1, Ordering::SeqCst) + 1;
            state.models = if id.is_some() {
                LoadState::Loading
            } else {
                LoadState::Unloaded
            };
        }
        self.record_filter_change("manufacturer", id);

        match id {
            Some(id) => self.load_models(id).await,
            None => Ok(ModelsFetch::Cleared),
        }
    }

    /// Select a loaded manufacturer by name or slug, case-insensitively
    pub async fn select_manufacturer_by_name(&self, name: &str) -> crate::error::Result<ModelsFetch> {
        let wanted = name.trim();
        let id = self
            .lock()
            .manufacturers
            .state
            .items()
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(wanted) || m.slug.eq_ignore_ascii_case(wanted))
            .map(|m| m.id)
            .ok_or_else(|| ResolverError::UnknownManufacturer(wanted.to_string()))?;

        Ok(self.select_manufacturer(Some(id)).await?)
    }

    /// Select (or clear) the model
    ///
    /// Requires a selected manufacturer whose models are loaded and
    /// contain `id`.
    pub fn select_model(&self, id: Option<u64>) -> Result<(), ResolverError> {
        {
            let mut state = self.lock();
            if let (Some(model_id), Some(manufacturer_id)) = (id, state.selection.manufacturer_id()) {
                match &state.models {
                    LoadState::Loaded(models) if models.iter().any(|m| m.id == model_id) => {}
                    LoadState::Loaded(_) => {
                        return Err(ResolverError::InvalidState(format!(
                            "model {model_id} does not belong to manufacturer {manufacturer_id}"
                        )));
                    }
                    _ => {
                        return Err(ResolverError::InvalidState(format!(
                            "models for manufacturer {manufacturer_id} are not loaded"
                        )));
                    }
                }
            }
            state.selection.set_model(id)?;
        }
        self.record_filter_change("model", id);
        Ok(())
    }

    fn record_filter_change<V: serde::Serialize>(&self, filter: &str, value: Option<V>) {
        self.events.record(
            events::SEARCH_FILTER_CHANGE,
            attributes! {
                "filter_type" => filter,
                "filter_value" => value,
                "location" => FILTER_LOCATION,
            },
        );
    }

    // === Derived views ===

    /// Display names for a complete selection
    pub fn describe_selection(&self) -> Option<VehicleDescription> {
        let state = self.lock();
        let sel = state.selection;

        let year = sel.year()?;
        let manufacturer = find_name(state.manufacturers.state.items(), sel.manufacturer_id()?, |m| {
            (m.id, &m.name)
        })?;
        let model = find_name(state.models.items(), sel.model_id()?, |m| (m.id, &m.name))?;
        let part_category =
            find_name(state.part_categories.state.items(), sel.part_category_id()?, |p| {
                (p.id, &p.name)
            })?;

        Some(VehicleDescription {
            year,
            manufacturer,
            model,
            part_category,
        })
    }

    /// An inquiry candidate pre-filled with the current selection
    pub fn candidate(&self) -> InquiryCandidate {
        let sel = self.selection();
        InquiryCandidate {
            year: sel.year(),
            manufacturer_id: sel.manufacturer_id(),
            model_id: sel.model_id(),
            part_category_id: sel.part_category_id(),
            ..InquiryCandidate::default()
        }
    }
}

fn find_name<T>(items: &[T], id: u64, key: impl Fn(&T) -> (u64, &String)) -> Option<String> {
    items.iter().map(key).find(|(item_id, _)| *item_id == id).map(|(_, name)| name.clone())
}

/// Model years offered for `current_year`, newest first
///
/// Runs from next year's models down to [`FIRST_MODEL_YEAR`].
pub fn year_options(current_year: i32) -> Vec<i32> {
    (FIRST_MODEL_YEAR..=current_year + 1).rev().collect()
}

/// [`year_options`] for the local calendar year
pub fn current_year_options() -> Vec<i32> {
    year_options(chrono::Local::now().year())
}
