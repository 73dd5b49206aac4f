use utoipa::OpenApi;

use crate::drawer::{AppliedFilterChip, FilterControl, FilterGroup, FilterOptionLink};
use crate::filter::{FilterInput, PriceRange};
use crate::models::{AppliedFilter, Filter, FilterType, FilterValue};
use crate::pagination::PaginationVariables;
use crate::routes::{CollectionQuery, DrawerRequest, DrawerResponse};
use crate::sort::{ProductCollectionSortKey, SortMenu, SortMenuItem, SortParam};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront collection loader",
        description = "Decodes collection URLs into backend query variables and filter drawer view models"
    ),
    paths(crate::routes::collection_query, crate::routes::collection_drawer),
    components(schemas(
        CollectionQuery,
        DrawerRequest,
        DrawerResponse,
        FilterInput,
        PriceRange,
        AppliedFilter,
        Filter,
        FilterType,
        FilterValue,
        AppliedFilterChip,
        FilterControl,
        FilterGroup,
        FilterOptionLink,
        PaginationVariables,
        ProductCollectionSortKey,
        SortMenu,
        SortMenuItem,
        SortParam,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_loader_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/collections/{handle}"));
        assert!(doc.paths.paths.contains_key("/collections/{handle}/drawer"));
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("SortParam"));
        assert!(schemas.contains_key("CollectionQuery"));
    }
}
