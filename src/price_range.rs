//! State behind the price-range inputs of the filter drawer.
//!
//! Each keystroke updates the bounds immediately, but the navigation that
//! applies them is debounced: only the last edit inside the window is
//! committed, and nothing is committed once the control is dropped.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CodecConfig, PRICE_RANGE_FILTER_DEBOUNCE};
use crate::debounce::Debouncer;
use crate::filter::{PriceRange, decode_price, price_commit};
use crate::params::ParamSet;
use crate::traits::Navigator;

pub struct PriceRangeFilter<N: Navigator> {
    path: String,
    params: ParamSet,
    range: PriceRange,
    navigator: Arc<N>,
    debouncer: Debouncer,
}

impl<N: Navigator> PriceRangeFilter<N> {
    /// Control for the page at `path`, seeded from its `filter.price`.
    pub fn new(path: impl Into<String>, params: ParamSet, navigator: Arc<N>) -> Self {
        Self::with_window(path, params, navigator, PRICE_RANGE_FILTER_DEBOUNCE)
    }

    /// Control using the debounce window from `config`.
    pub fn from_config(
        path: impl Into<String>,
        params: ParamSet,
        navigator: Arc<N>,
        config: &CodecConfig,
    ) -> Self {
        Self::with_window(path, params, navigator, config.debounce())
    }

    pub fn with_window(
        path: impl Into<String>,
        params: ParamSet,
        navigator: Arc<N>,
        window: Duration,
    ) -> Self {
        let range = decode_price(&params);
        Self {
            path: path.into(),
            params,
            range,
            navigator,
            debouncer: Debouncer::new(window),
        }
    }

    #[must_use]
    pub fn range(&self) -> PriceRange {
        self.range
    }

    #[must_use]
    pub fn is_commit_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Raw text of the minimum input. Text without a leading number clears it.
    pub fn set_min_input(&mut self, text: &str) {
        self.range.min = parse_price_input(text);
        self.schedule_commit();
    }

    /// Raw text of the maximum input. Text without a leading number clears it.
    pub fn set_max_input(&mut self, text: &str) {
        self.range.max = parse_price_input(text);
        self.schedule_commit();
    }

    pub fn set_range(&mut self, range: PriceRange) {
        self.range = PriceRange::new(range.min, range.max);
        self.schedule_commit();
    }

    /// The page moved on (another filter, a new sort) while the control stayed
    /// mounted. Later commits build on the new query; the edited bounds are
    /// kept, and a pending commit is rescheduled against the new location.
    pub fn set_location(&mut self, path: impl Into<String>, params: ParamSet) {
        self.path = path.into();
        self.params = params;
        if self.debouncer.is_pending() {
            self.schedule_commit();
        }
    }

    /// Link the pending commit will navigate to.
    #[must_use]
    pub fn commit_link(&self) -> String {
        price_commit(&self.params, self.range).to_link(&self.path)
    }

    fn schedule_commit(&mut self) {
        let target = self.commit_link();
        let navigator = Arc::clone(&self.navigator);
        tracing::debug!(link = %target, "Scheduling price range commit");
        self.debouncer.schedule(async move {
            navigator.navigate(target).await;
        });
    }
}

/// Leading decimal number of `text`, the way a browser's `parseFloat` reads
/// it (`"120abc"` is 120, `"abc"` is nothing). Non-finite results are
/// discarded.
#[must_use]
pub fn parse_price_input(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
