//! Filter and sort URL codec for the storefront's collection pages.
//!
//! Catalog state lives in the query string: `filter.<key>` parameters carry
//! JSON-encoded filter inputs and `sort` carries one of five orderings. This
//! crate reads and rewrites that state, builds the links the filter drawer and
//! sort menu need, and debounces price edits before they navigate.

pub mod config;
pub mod debounce;
pub mod drawer;
pub mod errors;
pub mod filter;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod params;
pub mod price_range;
pub mod routes;
pub mod sort;
pub mod traits;

pub use config::CodecConfig;
pub use errors::{ApiError, FilterError};
pub use filter::{
    FilterInput, PriceRange, collect_filters, decode_price, encode_filter, price_commit,
    remove_filter,
};
pub use models::AppliedFilter;
pub use params::ParamSet;
pub use sort::{SortParam, decode_sort, encode_sort};
pub use traits::Navigator;
