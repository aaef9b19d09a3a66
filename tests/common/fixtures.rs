//! Test data factories for parts-finder types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use parts_finder::types::{InquiryCandidate, Manufacturer, Model, PartCategory};

pub const TOYOTA: u64 = 1;
pub const HONDA: u64 = 2;
pub const FORD: u64 = 3;

pub const CAMRY: u64 = 10;
pub const COROLLA: u64 = 11;
pub const CIVIC: u64 = 20;
pub const ACCORD: u64 = 21;

pub const ENGINE: u64 = 100;
pub const TRANSMISSION: u64 = 101;

/// Create a manufacturer whose slug is its lowercased name
pub fn make_manufacturer(id: u64, name: &str) -> Manufacturer {
    Manufacturer {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
    }
}

/// Create a model belonging to `manufacturer_id`
pub fn make_model(id: u64, name: &str, manufacturer_id: u64) -> Model {
    Model {
        id,
        name: name.to_string(),
        manufacturer_id,
    }
}

/// Create a part category
pub fn make_part(id: u64, name: &str) -> PartCategory {
    PartCategory {
        id,
        name: name.to_string(),
    }
}

/// Toyota, Honda, Ford
pub fn sample_manufacturers() -> Vec<Manufacturer> {
    vec![
        make_manufacturer(TOYOTA, "Toyota"),
        make_manufacturer(HONDA, "Honda"),
        make_manufacturer(FORD, "Ford"),
    ]
}

pub fn toyota_models() -> Vec<Model> {
    vec![
        make_model(CAMRY, "Camry", TOYOTA),
        make_model(COROLLA, "Corolla", TOYOTA),
    ]
}

pub fn honda_models() -> Vec<Model> {
    vec![
        make_model(CIVIC, "Civic", HONDA),
        make_model(ACCORD, "Accord", HONDA),
    ]
}

/// Engine, Transmission
pub fn sample_parts() -> Vec<PartCategory> {
    vec![make_part(ENGINE, "Engine"), make_part(TRANSMISSION, "Transmission")]
}

/// A candidate that passes validation: 2015 Toyota Camry engine
pub fn valid_candidate() -> InquiryCandidate {
    InquiryCandidate {
        year: Some(2015),
        manufacturer_id: Some(TOYOTA),
        model_id: Some(CAMRY),
        part_category_id: Some(ENGINE),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        zip_code: "90210".to_string(),
        notes: "Driver side".to_string(),
    }
}
