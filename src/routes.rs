//! HTTP surface of the collection loader.
//!
//! - `GET /collections/{handle}` turns the collection URL into the variables
//!   of the backend products query.
//! - `POST /collections/{handle}/drawer` builds the filter drawer, applied
//!   filter chips and sort menu for the facets posted in the body.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::CodecConfig;
use crate::drawer::{AppliedFilterChip, FilterGroup, applied_filter_chips, filter_drawer};
use crate::errors::ApiError;
use crate::filter::{FilterInput, collect_filters};
use crate::models::{AppliedFilter, Filter};
use crate::pagination::{PaginationVariables, parse_pagination};
use crate::params::ParamSet;
use crate::sort::{ProductCollectionSortKey, SortMenu, SortParam, decode_sort, sort_menu};

pub type SharedConfig = Arc<CodecConfig>;

/// Variables for the backend collection products query.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    pub handle: String,
    pub filters: Vec<FilterInput>,
    pub sort: SortParam,
    pub sort_key: ProductCollectionSortKey,
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub pagination: PaginationVariables,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawerRequest {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub applied_filters: Vec<AppliedFilter>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawerResponse {
    pub groups: Vec<FilterGroup>,
    pub applied: Vec<AppliedFilterChip>,
    pub sort: SortMenu,
}

pub fn router(config: CodecConfig) -> Router {
    Router::new()
        .route("/collections/{handle}", get(collection_query))
        .route("/collections/{handle}/drawer", post(collection_drawer))
        .fallback(fallback)
        .with_state(Arc::new(config))
}

#[utoipa::path(
    get,
    path = "/collections/{handle}",
    params(("handle" = String, Path, description = "Collection handle")),
    responses(
        (status = 200, description = "Backend query variables", body = CollectionQuery),
        (status = 400, description = "Invalid collection handle")
    )
)]
pub async fn collection_query(
    State(config): State<SharedConfig>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<CollectionQuery>, ApiError> {
    validate_handle(&handle)?;
    let params = ParamSet::parse(query.as_deref().unwrap_or_default());

    let sort = decode_sort(&params);
    let sort_values = sort.sort_values();
    let search = params
        .get(&config.search_key)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);

    let collection = CollectionQuery {
        filters: collect_filters(&params),
        sort,
        sort_key: sort_values.sort_key,
        reverse: sort_values.reverse,
        search,
        pagination: parse_pagination(&params, config.page_by),
        handle,
    };
    tracing::debug!(
        handle = %collection.handle,
        filters = collection.filters.len(),
        sort = %collection.sort,
        "Decoded collection query"
    );
    Ok(Json(collection))
}

#[utoipa::path(
    post,
    path = "/collections/{handle}/drawer",
    params(("handle" = String, Path, description = "Collection handle")),
    request_body = DrawerRequest,
    responses(
        (status = 200, description = "Drawer view model", body = DrawerResponse),
        (status = 400, description = "Invalid handle or body")
    )
)]
pub async fn collection_drawer(
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
    body: Result<Json<DrawerRequest>, JsonRejection>,
) -> Result<Json<DrawerResponse>, ApiError> {
    validate_handle(&handle)?;
    let Json(request) = body?;
    let params = ParamSet::parse(query.as_deref().unwrap_or_default());
    let path = format!("/collections/{handle}");

    Ok(Json(DrawerResponse {
        groups: filter_drawer(&path, &params, &request.filters),
        applied: applied_filter_chips(&path, &params, &request.applied_filters),
        sort: sort_menu(&path, &params),
    }))
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route")
}

/// Handles are lowercase ASCII letters, digits and hyphens.
fn validate_handle(handle: &str) -> Result<(), ApiError> {
    let valid = !handle.is_empty()
        && handle
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Invalid collection handle '{handle}'"
        )))
    }
}
