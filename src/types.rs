//! Core types for parts-finder

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A vehicle manufacturer (make)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manufacturer {
    /// Catalog id
    pub id: u64,
    /// Display name, e.g. "Toyota"
    pub name: String,
    /// URL slug used by brand pages
    #[serde(default)]
    pub slug: String,
}

/// A vehicle model, always scoped to one manufacturer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    /// Catalog id
    pub id: u64,
    /// Display name, e.g. "Camry"
    pub name: String,
    /// Owning manufacturer
    #[serde(
        rename = "manufacturerId",
        alias = "manufacturer_id",
        alias = "manufacturer"
    )]
    pub manufacturer_id: u64,
}

/// A model as the models endpoint returns it; the owner may be omitted
#[derive(Debug, Clone, Deserialize)]
pub struct ModelRecord {
    /// Catalog id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Owning manufacturer, when the API includes it
    #[serde(
        rename = "manufacturerId",
        alias = "manufacturer_id",
        alias = "manufacturer",
        default
    )]
    pub manufacturer_id: Option<u64>,
}

impl ModelRecord {
    /// Resolve into a [`Model`], owned by `requested` unless the API said otherwise
    pub fn into_model(self, requested: u64) -> Model {
        Model {
            id: self.id,
            name: self.name,
            manufacturer_id: self.manufacturer_id.unwrap_or(requested),
        }
    }
}

/// A part category, e.g. "Engine" or "Transmission"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartCategory {
    /// Catalog id
    pub id: u64,
    /// Display name
    pub name: String,
}

/// Standard `{ success, data }` envelope of catalog endpoints
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the API considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success
    pub data: Option<T>,
    /// Error message, present on failure
    #[serde(default)]
    pub error: Option<String>,
}

/// Fields typed into the inquiry form plus the current selection
///
/// Everything is optional or raw text: the validator decides what is
/// acceptable and builds an [`InquiryRequest`] from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryCandidate {
    /// Selected model year
    pub year: Option<i32>,
    /// Selected manufacturer id
    pub manufacturer_id: Option<u64>,
    /// Selected model id
    pub model_id: Option<u64>,
    /// Selected part category id
    pub part_category_id: Option<u64>,
    /// Customer name
    pub name: String,
    /// Customer email
    pub email: String,
    /// Customer phone, any formatting
    pub phone: String,
    /// ZIP code
    pub zip_code: String,
    /// Free-form notes
    pub notes: String,
}

/// A validated inquiry, ready to be POSTed
///
/// Serializes to the wire names expected by `/parts-inquiry/`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InquiryRequest {
    /// Model year
    pub year: i32,
    /// Manufacturer id
    #[serde(rename = "manufacturer")]
    pub manufacturer_id: u64,
    /// Model id
    #[serde(rename = "model")]
    pub model_id: u64,
    /// Part category id
    #[serde(rename = "part_category")]
    pub part_category_id: u64,
    /// Customer name (trimmed)
    pub name: String,
    /// Customer email (trimmed)
    pub email: String,
    /// Customer phone (trimmed)
    pub phone: String,
    /// ZIP code (trimmed)
    #[serde(rename = "zipcode")]
    pub zip_code: String,
    /// Notes (trimmed, may be empty)
    #[serde(rename = "additional_notes")]
    pub notes: String,
}

/// One or many messages for a field, as returned by the inquiry endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorMessages {
    /// A single message
    One(String),
    /// A list of messages
    Many(Vec<String>),
}

impl ErrorMessages {
    /// Messages joined with ", "
    pub fn joined(&self) -> String {
        match self {
            Self::One(msg) => msg.clone(),
            Self::Many(msgs) => msgs.join(", "),
        }
    }
}

/// Body of a `/parts-inquiry/` response
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct InquiryReply {
    /// Whether the inquiry was accepted
    #[serde(default)]
    pub success: bool,
    /// Human-readable failure
    #[serde(default)]
    pub error: Option<String>,
    /// Field-level failures keyed by wire field name
    #[serde(default)]
    pub errors: Option<BTreeMap<String, ErrorMessages>>,
}

/// Status plus parsed body of an inquiry POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed body (default when the body was not JSON)
    pub reply: InquiryReply,
}

impl InquiryResponse {
    /// 2xx with `success: true`
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300 && self.reply.success
    }
}

/// Query for the product image lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageQuery {
    /// Manufacturer id
    pub manufacturer_id: u64,
    /// Model id
    pub model_id: u64,
    /// Model year
    pub year: i32,
    /// Part category id
    pub part_category_id: u64,
}

/// Product image metadata
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Absolute image URL
    pub image_url: String,
    /// Number of alternative specifications
    #[serde(default, deserialize_with = "string_or_number")]
    pub specification_number: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Display names of a complete vehicle/part selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDescription {
    /// Model year
    pub year: i32,
    /// Manufacturer name
    pub manufacturer: String,
    /// Model name
    pub model: String,
    /// Part category name
    pub part_category: String,
}

impl fmt::Display for VehicleDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for your {} {} {}",
            self.part_category, self.year, self.manufacturer, self.model
        )
    }
}
