//! Vehicle/part selection state

use crate::error::ResolverError;

/// The user's current Year → Manufacturer → Model → Part choices
///
/// Invariant: no model without a manufacturer. Changing the manufacturer
/// always clears the model; nothing else is cleared implicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    year: Option<i32>,
    manufacturer_id: Option<u64>,
    model_id: Option<u64>,
    part_category_id: Option<u64>,
}

impl Selection {
    /// Selected model year
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Selected manufacturer
    pub const fn manufacturer_id(&self) -> Option<u64> {
        self.manufacturer_id
    }

    /// Selected model
    pub const fn model_id(&self) -> Option<u64> {
        self.model_id
    }

    /// Selected part category
    pub const fn part_category_id(&self) -> Option<u64> {
        self.part_category_id
    }

    /// Whether every field is chosen
    pub const fn is_complete(&self) -> bool {
        self.year.is_some()
            && self.manufacturer_id.is_some()
            && self.model_id.is_some()
            && self.part_category_id.is_some()
    }

    pub(crate) const fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
    }

    pub(crate) const fn set_part_category(&mut self, id: Option<u64>) {
        self.part_category_id = id;
    }

    pub(crate) const fn set_manufacturer(&mut self, id: Option<u64>) {
        self.manufacturer_id = id;
        self.model_id = None;
    }

    pub(crate) fn set_model(&mut self, id: Option<u64>) -> Result<(), ResolverError> {
        if id.is_some() && self.manufacturer_id.is_none() {
            return Err(ResolverError::InvalidState(
                "select a manufacturer before choosing a model".to_string(),
            ));
        }
        self.model_id = id;
        Ok(())
    }
}
