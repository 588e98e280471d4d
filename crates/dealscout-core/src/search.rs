use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Price bounds for a search, in whole currency units.
///
/// Deserialization goes through [`SearchFilters::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterBounds")]
pub struct SearchFilters {
    pub min: u32,
    pub max: u32,
}

#[derive(Deserialize)]
struct FilterBounds {
    min: u32,
    max: u32,
}

impl TryFrom<FilterBounds> for SearchFilters {
    type Error = CoreError;

    fn try_from(bounds: FilterBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.min, bounds.max)
    }
}

impl SearchFilters {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFilters`] when `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidFilters { min, max });
        }
        Ok(Self { min, max })
    }
}

/// Immutable parameters for a single scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub search_term: String,
    pub filters: SearchFilters,
    pub base_url: String,
    pub currency: String,
    /// Report title; also the stem of the persisted file name.
    pub output_name: String,
}

impl SearchRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySearchTerm`] for a blank search term.
    pub fn new(
        search_term: impl Into<String>,
        filters: SearchFilters,
        base_url: impl Into<String>,
        currency: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let search_term = search_term.into();
        if search_term.trim().is_empty() {
            return Err(CoreError::EmptySearchTerm);
        }
        Ok(Self {
            search_term,
            filters,
            base_url: base_url.into(),
            currency: currency.into(),
            output_name: output_name.into(),
        })
    }
}
