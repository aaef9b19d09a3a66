//! HTTP implementation of the parts API

use crate::api::{INQUIRY_PATH, PartsApi};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{
    ApiEnvelope, ImageQuery, InquiryReply, InquiryRequest, InquiryResponse, Manufacturer, Model,
    ModelRecord, PartCategory, ProductImage,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Longest slice of a non-JSON body kept in error messages
const MAX_BODY_EXCERPT: usize = 200;

/// Parts API service using reqwest
pub struct HttpPartsApi {
    client: Client,
    config: ApiConfig,
}

impl HttpPartsApi {
    /// Create a new HTTP API client
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// GET a `{ success, data: [...] }` collection
    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.config.endpoint(path);
        debug!(%url, "fetching collection");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Option<ApiEnvelope<Vec<T>>> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: envelope
                    .and_then(|e| e.error)
                    .unwrap_or_else(|| excerpt(&body)),
            });
        }

        let envelope = match envelope {
            Some(envelope) => envelope,
            // Re-parse for the real serde error
            None => serde_json::from_str::<ApiEnvelope<Vec<T>>>(&body)?,
        };

        match envelope {
            ApiEnvelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ApiEnvelope { error, .. } => Err(Error::Api {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| "unsuccessful response".to_string()),
            }),
        }
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_BODY_EXCERPT).collect()
}

#[async_trait]
impl PartsApi for HttpPartsApi {
    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>> {
        self.get_collection("/manufacturers/").await
    }

    async fn list_models(&self, manufacturer_id: u64) -> Result<Vec<Model>> {
        let records: Vec<ModelRecord> = self
            .get_collection(&format!("/manufacturers/{manufacturer_id}/models/"))
            .await?;

        Ok(records
            .into_iter()
            .map(|record| record.into_model(manufacturer_id))
            .collect())
    }

    async fn list_part_categories(&self) -> Result<Vec<PartCategory>> {
        self.get_collection("/part-categories/").await
    }

    async fn submit_inquiry(&self, request: &InquiryRequest) -> Result<InquiryResponse> {
        let url = self.config.endpoint(INQUIRY_PATH);
        debug!(%url, "submitting inquiry");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        // Error pages are often HTML; treat them as an empty reply
        let reply: InquiryReply = serde_json::from_str(&body).unwrap_or_default();

        Ok(InquiryResponse { status, reply })
    }

    async fn product_image(&self, query: &ImageQuery) -> Result<Option<ProductImage>> {
        let url = self.config.endpoint("/product-images/by_vehicle/");
        debug!(%url, ?query, "looking up product image");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("manufacturerId", query.manufacturer_id.to_string()),
                ("modelId", query.model_id.to_string()),
                ("year", query.year.to_string()),
                ("partCategoryId", query.part_category_id.to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        Ok(Some(response.json().await?))
    }

    fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(500);
        assert_eq!(excerpt(&long).len(), MAX_BODY_EXCERPT);
        assert_eq!(excerpt("  "), "empty response body");
        assert_eq!(excerpt(" <h1>Bad Gateway</h1> "), "<h1>Bad Gateway</h1>");
    }
}
