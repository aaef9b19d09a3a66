//! Load state of a catalog collection

use crate::error::CatalogError;
use std::sync::Arc;

/// `Unloaded → Loading → {Loaded | Failed}`; a new attempt re-enters `Loading`
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    /// Never requested
    Unloaded,
    /// Request in flight
    Loading,
    /// Last attempt succeeded
    Loaded(Arc<[T]>),
    /// Last attempt failed
    Failed(CatalogError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<T> LoadState<T> {
    /// Whether a request is in flight
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded items; empty in every other state
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items.as_ref(),
            _ => &[],
        }
    }

    /// Error of the last attempt, if it failed
    pub const fn error(&self) -> Option<&CatalogError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A collection plus the number of completed fetch attempts
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) state: LoadState<T>,
    pub(crate) completed: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Unloaded,
            completed: 0,
        }
    }
}
