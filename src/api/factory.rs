//! API client factory

use crate::api::{HttpPartsApi, PartsApi};
use crate::config::ApiConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the HTTP-backed API client from configuration
pub fn create_parts_api(config: &ApiConfig) -> Result<Arc<dyn PartsApi>> {
    Ok(Arc::new(HttpPartsApi::new(config.clone())?))
}
