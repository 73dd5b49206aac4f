//! # Filter parameter codec
//!
//! Filters travel in the URL as `filter.<key>=<json>` pairs:
//!
//! ```text
//! /collections/all?filter.productVendor="Pro-x"&filter.price={"min":50000}
//! ```
//!
//! Every key except `price` may repeat (one entry per selected value). The
//! price range is single-valued, so encoding a new range replaces the old
//! one.
//!
//! Values are written in a canonical JSON form (object keys sorted, integral
//! numbers without a fractional part) and compared structurally, so an entry
//! written by hand as `{"max":10,"min":1}` is still found when removing
//! `{"min":1,"max":10}`.
//!
//! Nothing read from the URL is trusted: malformed JSON is skipped and logged
//! at debug level, never returned as an error.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::config::{FILTER_URL_PREFIX, PRICE_FILTER_KEY, filter_param_key};
use crate::errors::FilterError;
use crate::models::AppliedFilter;
use crate::params::ParamSet;

/// One filter criterion as the commerce backend understands it, e.g.
/// `{"productVendor":"Pro-x"}` or `{"price":{"min":100,"max":500}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct FilterInput(Map<String, Value>);

impl FilterInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter with a single criterion.
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = Map::new();
        map.insert(key.into(), value.into());
        Self(map)
    }

    /// Parse the JSON-string `input` the backend attaches to each facet value.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the string is not JSON or not an object.
    pub fn from_json_str(input: &str) -> Result<Self, FilterError> {
        let value: Value =
            serde_json::from_str(input).map_err(|source| FilterError::InvalidJson {
                input: input.to_string(),
                source,
            })?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(FilterError::NotAnObject {
                input: input.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical JSON of the whole filter.
    #[must_use]
    pub fn to_canonical_json(&self) -> String {
        canonical_json(&Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for FilterInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decoded `filter.price` bounds. A bound is present only when it is a finite
/// number. Bounds serialize the way they are written in the URL (`900`, not
/// `900.0`).
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    #[serde(serialize_with = "serialize_bound")]
    pub min: Option<f64>,
    #[serde(serialize_with = "serialize_bound")]
    pub max: Option<f64>,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.filter(|v| v.is_finite()),
            max: max.filter(|v| v.is_finite()),
        }
    }

    /// True when neither bound is a finite number.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        let finite = Self::new(self.min, self.max);
        finite.min.is_none() && finite.max.is_none()
    }

    /// `{"price": {...}}` with only the finite bounds, or `None` when there
    /// are none.
    #[must_use]
    pub fn to_filter_input(&self) -> Option<FilterInput> {
        let finite = Self::new(self.min, self.max);
        if finite.is_unbounded() {
            return None;
        }
        let mut range = Map::new();
        if let Some(min) = finite.min {
            range.insert("min".to_string(), js_number(min));
        }
        if let Some(max) = finite.max {
            range.insert("max".to_string(), js_number(max));
        }
        Some(FilterInput::single(PRICE_FILTER_KEY, Value::Object(range)))
    }
}

/// Write each criterion of `input` into a copy of `params`.
///
/// `price` replaces any existing range; other keys are appended unless the
/// same value is already present. Unrelated entries are left as they are.
#[must_use]
pub fn encode_filter(params: &ParamSet, input: &FilterInput) -> ParamSet {
    let mut next = params.clone();
    for (key, value) in input.iter() {
        let param_key = filter_param_key(key);
        let value = canonical(value);
        let json = value.to_string();

        let stored = next.get_all(&param_key);
        if key == PRICE_FILTER_KEY {
            // Several hand-written ranges collapse to the new one.
            let unchanged = matches!(
                stored.as_slice(),
                [only] if stored_value_matches(only, &value, &json)
            );
            if !unchanged {
                next.set(&param_key, json);
            }
        } else if !stored
            .into_iter()
            .any(|stored| stored_value_matches(stored, &value, &json))
        {
            next.append(param_key, json);
        }
    }
    next
}

/// [`encode_filter`] for the raw JSON `input` string of a facet value.
///
/// # Errors
///
/// Returns [`FilterError`] when `raw_input` is not a JSON object.
pub fn encode_filter_str(params: &ParamSet, raw_input: &str) -> Result<ParamSet, FilterError> {
    let input = FilterInput::from_json_str(raw_input)?;
    Ok(encode_filter(params, &input))
}

/// Remove every entry that `applied` would have written.
#[must_use]
pub fn remove_filter(params: &ParamSet, applied: &AppliedFilter) -> ParamSet {
    let mut next = params.clone();
    for (key, value) in applied.filter.iter() {
        let value = canonical(value);
        let json = value.to_string();
        next.delete_where(&filter_param_key(key), |stored| {
            stored_value_matches(stored, &value, &json)
        });
    }
    next
}

/// Bounds stored in `filter.price`, used to seed the price inputs.
#[must_use]
pub fn decode_price(params: &ParamSet) -> PriceRange {
    let Some(raw) = params.get(&filter_param_key(PRICE_FILTER_KEY)) else {
        return PriceRange::default();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(range)) => PriceRange {
            min: finite_bound(range.get("min")),
            max: finite_bound(range.get("max")),
        },
        Ok(other) => {
            tracing::debug!(value = %other, "Ignoring price filter that is not an object");
            PriceRange::default()
        }
        Err(err) => {
            tracing::debug!(raw = %raw, error = %err, "Ignoring malformed price filter");
            PriceRange::default()
        }
    }
}

/// Apply a committed price range: drop `filter.price` when both bounds are
/// empty, otherwise overwrite it with the new range.
#[must_use]
pub fn price_commit(params: &ParamSet, range: PriceRange) -> ParamSet {
    match range.to_filter_input() {
        Some(input) => encode_filter(params, &input),
        None => {
            let mut next = params.clone();
            next.delete(&filter_param_key(PRICE_FILTER_KEY));
            next
        }
    }
}

/// Every decodable `filter.*` entry as a single-key [`FilterInput`], in URL
/// order. This is what the collection query sends to the backend.
#[must_use]
pub fn collect_filters(params: &ParamSet) -> Vec<FilterInput> {
    params
        .iter()
        .filter_map(|(key, raw)| {
            let name = key.strip_prefix(FILTER_URL_PREFIX)?;
            if name.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(raw) {
                Ok(value) => Some(FilterInput::single(name, value)),
                Err(err) => {
                    tracing::debug!(key = %key, error = %err, "Skipping malformed filter parameter");
                    None
                }
            }
        })
        .collect()
}

/// Compact JSON with sorted object keys and integral numbers as integers.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    canonical(value).to_string()
}

fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => js_number(float),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonical(v)))
                    .collect(),
            )
        }
        _ => value.clone(),
    }
}

/// Numbers the way a browser prints them: `100`, not `100.0`.
#[allow(clippy::cast_possible_truncation)]
fn js_number(float: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER {
        Value::from(float as i64)
    } else {
        Value::from(float)
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn serialize_bound<S: Serializer>(bound: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match bound {
        Some(value) if value.is_finite() => js_number(*value).serialize(serializer),
        _ => serializer.serialize_none(),
    }
}

fn stored_value_matches(stored: &str, expected: &Value, expected_json: &str) -> bool {
    match serde_json::from_str::<Value>(stored) {
        Ok(parsed) => canonical(&parsed) == *expected,
        Err(_) => stored == expected_json,
    }
}

fn finite_bound(value: Option<&Value>) -> Option<f64> {
    let bound = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    bound.filter(|v| v.is_finite())
}
