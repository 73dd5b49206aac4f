use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::FilterError;
use crate::filter::FilterInput;

/// A filter currently narrowing the result set, as reported by the backend
/// next to the products it returned.
///
/// ```json
/// {"label": "Pro-x", "filter": {"productVendor": "Pro-x"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawAppliedFilter")]
pub struct AppliedFilter {
    /// Display name of the filter value. Never empty.
    pub label: String,
    pub filter: FilterInput,
}

impl AppliedFilter {
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyLabel`] for a blank label.
    pub fn new(label: impl Into<String>, filter: FilterInput) -> Result<Self, FilterError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(FilterError::EmptyLabel);
        }
        Ok(Self { label, filter })
    }

    /// Key that identifies the chip among its siblings.
    #[must_use]
    pub fn chip_key(&self) -> String {
        format!("{}-{}", self.label, self.filter.to_canonical_json())
    }
}

#[derive(Deserialize)]
struct RawAppliedFilter {
    label: String,
    filter: FilterInput,
}

impl TryFrom<RawAppliedFilter> for AppliedFilter {
    type Error = FilterError;

    fn try_from(raw: RawAppliedFilter) -> Result<Self, Self::Error> {
        Self::new(raw.label, raw.filter)
    }
}

/// How a facet is presented in the filter drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    List,
    PriceRange,
    Boolean,
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilterValue {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub count: u32,
    /// JSON-encoded [`FilterInput`] selecting this value.
    pub input: String,
}

/// A facet offered by the backend for the current collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Filter {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_applied_filter_rejects_empty_label() {
        assert!(matches!(
            AppliedFilter::new("  ", FilterInput::single("productVendor", "Pro-x")),
            Err(FilterError::EmptyLabel)
        ));
    }

    #[test]
    fn test_applied_filter_deserialize_validates_label() {
        let ok: AppliedFilter =
            serde_json::from_value(json!({"label": "Pro-x", "filter": {"productVendor": "Pro-x"}}))
                .unwrap();
        assert_eq!(ok.chip_key(), r#"Pro-x-{"productVendor":"Pro-x"}"#);

        let err = serde_json::from_value::<AppliedFilter>(
            json!({"label": "", "filter": {"productVendor": "Pro-x"}}),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_filter_deserializes_backend_shape() {
        let facet: Filter = serde_json::from_value(json!({
            "id": "filter.p.price",
            "label": "Precio",
            "type": "PRICE_RANGE",
            "values": [{
                "id": "filter.p.price",
                "label": "Precio",
                "count": 0,
                "input": "{\"price\":{\"min\":0,\"max\":250000}}"
            }]
        }))
        .unwrap();
        assert_eq!(facet.filter_type, FilterType::PriceRange);
        assert_eq!(facet.values.len(), 1);
    }
}
