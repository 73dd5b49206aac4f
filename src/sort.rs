use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::config::SORT_PARAM_KEY;
use crate::params::ParamSet;

/// Ordering of a collection's products, carried in the `sort` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortParam {
    PriceLowHigh,
    PriceHighLow,
    BestSelling,
    Newest,
    #[default]
    Featured,
}

/// Sort keys accepted by the backend's collection product query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCollectionSortKey {
    Price,
    BestSelling,
    Created,
    Manual,
}

/// `sortKey` and `reverse` variables for the backend query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortValues {
    pub sort_key: ProductCollectionSortKey,
    pub reverse: bool,
}

impl SortParam {
    /// Menu order.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::BestSelling,
        Self::Newest,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::BestSelling => "best-selling",
            Self::Newest => "newest",
            Self::Featured => "featured",
        }
    }

    /// Label shown in the sort menu.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Featured => "Novedades",
            Self::PriceLowHigh => "$: Bajo - Alto",
            Self::PriceHighLow => "$: Alto - Bajo",
            Self::BestSelling => "Más vendidos",
            Self::Newest => "Nuevos",
        }
    }

    #[must_use]
    pub fn sort_values(self) -> SortValues {
        let (sort_key, reverse) = match self {
            Self::PriceHighLow => (ProductCollectionSortKey::Price, true),
            Self::PriceLowHigh => (ProductCollectionSortKey::Price, false),
            Self::BestSelling => (ProductCollectionSortKey::BestSelling, false),
            Self::Newest => (ProductCollectionSortKey::Created, true),
            Self::Featured => (ProductCollectionSortKey::Manual, false),
        };
        SortValues { sort_key, reverse }
    }
}

impl fmt::Display for SortParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortParam(pub String);

impl fmt::Display for UnknownSortParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort parameter '{}'", self.0)
    }
}

impl std::error::Error for UnknownSortParam {}

impl FromStr for SortParam {
    type Err = UnknownSortParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| UnknownSortParam(s.to_string()))
    }
}

/// Set `sort`, leaving every other parameter alone.
#[must_use]
pub fn encode_sort(sort: SortParam, params: &ParamSet) -> ParamSet {
    let mut next = params.clone();
    next.set(SORT_PARAM_KEY, sort.as_str());
    next
}

/// Read `sort`. Missing or unrecognised values fall back to `featured`.
#[must_use]
pub fn decode_sort(params: &ParamSet) -> SortParam {
    params
        .get(SORT_PARAM_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

#[must_use]
pub fn sort_link(path: &str, sort: SortParam, params: &ParamSet) -> String {
    encode_sort(sort, params).to_link(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortMenuItem {
    pub key: SortParam,
    pub label: String,
    pub link: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortMenu {
    /// Label of the active item, or of the first item when `sort` is not
    /// one of ours.
    pub current_label: String,
    pub items: Vec<SortMenuItem>,
}

/// Sort menu for the current URL. Only an explicit, recognised `sort` marks
/// an item active.
#[must_use]
pub fn sort_menu(path: &str, params: &ParamSet) -> SortMenu {
    let active = params
        .get(SORT_PARAM_KEY)
        .and_then(|raw| raw.parse::<SortParam>().ok());
    let items: Vec<SortMenuItem> = SortParam::ALL
        .into_iter()
        .map(|key| SortMenuItem {
            key,
            label: key.label().to_string(),
            link: sort_link(path, key, params),
            active: active == Some(key),
        })
        .collect();
    let current_label = active.unwrap_or(SortParam::ALL[0]).label().to_string();
    SortMenu {
        current_label,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_member() {
        for sort in SortParam::ALL {
            assert_eq!(sort.as_str().parse::<SortParam>(), Ok(sort));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Newest".parse::<SortParam>().is_err());
        assert!("".parse::<SortParam>().is_err());
    }

    #[test]
    fn test_serde_matches_url_literals() {
        assert_eq!(
            serde_json::to_string(&SortParam::PriceHighLow).unwrap(),
            r#""price-high-low""#
        );
        let values = SortParam::Newest.sort_values();
        assert_eq!(
            serde_json::to_value(values).unwrap(),
            serde_json::json!({"sortKey": "CREATED", "reverse": true})
        );
    }

    #[test]
    fn test_sort_values_table() {
        use super::ProductCollectionSortKey::{BestSelling, Created, Manual, Price};
        let table = [
            (SortParam::PriceHighLow, Price, true),
            (SortParam::PriceLowHigh, Price, false),
            (SortParam::BestSelling, BestSelling, false),
            (SortParam::Newest, Created, true),
            (SortParam::Featured, Manual, false),
        ];
        for (sort, key, reverse) in table {
            assert_eq!(sort.sort_values(), SortValues { sort_key: key, reverse });
        }
    }

    #[test]
    fn test_decode_first_occurrence_wins() {
        let params = ParamSet::parse("sort=newest&sort=best-selling");
        assert_eq!(decode_sort(&params), SortParam::Newest);
    }

    #[test]
    fn test_sort_menu_active_item() {
        let params = ParamSet::parse("sort=best-selling&q=casco");
        let menu = sort_menu("/collections/cascos", &params);
        assert_eq!(menu.current_label, "Más vendidos");
        let active: Vec<_> = menu.items.iter().filter(|i| i.active).map(|i| i.key).collect();
        assert_eq!(active, vec![SortParam::BestSelling]);
        assert_eq!(
            menu.items[1].link,
            "/collections/cascos?sort=price-low-high&q=casco"
        );
    }

    #[test]
    fn test_sort_menu_without_sort_uses_first_label() {
        let menu = sort_menu("/collections/all", &ParamSet::parse("sort=bogus"));
        assert_eq!(menu.current_label, "Novedades");
        assert!(menu.items.iter().all(|i| !i.active));
    }
}
