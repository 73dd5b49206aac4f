//! View models for the filter drawer: applied-filter chips with removal
//! links, and one group per backend facet.
//!
//! The decoded filters are always passed in; nothing here reads ambient
//! state.

use serde::Serialize;
use utoipa::ToSchema;

use crate::filter::{PriceRange, decode_price, encode_filter_str, remove_filter};
use crate::models::{AppliedFilter, Filter, FilterType};
use crate::params::ParamSet;

/// Link that drops `applied` from the current URL and keeps everything else.
#[must_use]
pub fn applied_filter_link(path: &str, params: &ParamSet, applied: &AppliedFilter) -> String {
    remove_filter(params, applied).to_link(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppliedFilterChip {
    pub key: String,
    pub label: String,
    pub link: String,
}

#[must_use]
pub fn applied_filter_chips(
    path: &str,
    params: &ParamSet,
    applied: &[AppliedFilter],
) -> Vec<AppliedFilterChip> {
    applied
        .iter()
        .map(|filter| AppliedFilterChip {
            key: filter.chip_key(),
            label: filter.label.clone(),
            link: applied_filter_link(path, params, filter),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FilterOptionLink {
    pub id: String,
    pub label: String,
    pub count: u32,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterControl {
    /// Numeric inputs seeded from the current `filter.price`.
    PriceRange { range: PriceRange },
    Options { options: Vec<FilterOptionLink> },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FilterGroup {
    pub id: String,
    pub label: String,
    pub control: FilterControl,
}

/// One group per facet. Facet values whose `input` cannot be decoded are
/// left out.
#[must_use]
pub fn filter_drawer(path: &str, params: &ParamSet, filters: &[Filter]) -> Vec<FilterGroup> {
    filters
        .iter()
        .map(|filter| FilterGroup {
            id: filter.id.clone(),
            label: filter.label.clone(),
            control: filter_control(path, params, filter),
        })
        .collect()
}

fn filter_control(path: &str, params: &ParamSet, filter: &Filter) -> FilterControl {
    if filter.filter_type == FilterType::PriceRange {
        return FilterControl::PriceRange {
            range: decode_price(params),
        };
    }

    let options = filter
        .values
        .iter()
        .filter_map(|value| match encode_filter_str(params, &value.input) {
            Ok(next) => Some(FilterOptionLink {
                id: value.id.clone(),
                label: value.label.clone(),
                count: value.count,
                link: next.to_link(path),
            }),
            Err(err) => {
                tracing::debug!(filter = %filter.id, value = %value.id, error = %err, "Skipping facet value");
                None
            }
        })
        .collect();
    FilterControl::Options { options }
}
