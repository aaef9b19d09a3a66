//! Catalog and inquiry API
//!
//! [`PartsApi`] abstracts the REST collaborator so the resolver and the
//! submission pipeline can run against the real HTTP service or a mock.

mod factory;
mod http;

pub use factory::create_parts_api;
pub use http::HttpPartsApi;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::types::{
    ImageQuery, InquiryRequest, InquiryResponse, Manufacturer, Model, PartCategory, ProductImage,
};
use async_trait::async_trait;

/// Endpoint path of the inquiry intake
pub const INQUIRY_PATH: &str = "/parts-inquiry/";

/// Parts catalog service trait
#[async_trait]
pub trait PartsApi: Send + Sync {
    /// List all manufacturers
    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>>;

    /// List the models of one manufacturer
    async fn list_models(&self, manufacturer_id: u64) -> Result<Vec<Model>>;

    /// List all part categories
    async fn list_part_categories(&self) -> Result<Vec<PartCategory>>;

    /// POST an inquiry
    ///
    /// Application-level rejections (non-2xx, `success: false`) come back
    /// as `Ok` with the status and parsed reply; only transport failures
    /// are `Err`.
    async fn submit_inquiry(&self, request: &InquiryRequest) -> Result<InquiryResponse>;

    /// Look up a product image; `None` when the catalog has none
    async fn product_image(&self, query: &ImageQuery) -> Result<Option<ProductImage>>;

    /// Get the API configuration
    fn config(&self) -> &ApiConfig;
}
