use serde::Serialize;
use utoipa::ToSchema;

use crate::params::ParamSet;

pub const CURSOR_PARAM_KEY: &str = "cursor";
pub const DIRECTION_PARAM_KEY: &str = "direction";

/// Cursor pagination variables for the collection products query.
///
/// `?cursor=abc` or `?cursor=abc&direction=next` pages forward,
/// `?cursor=abc&direction=previous` pages backward.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PaginationVariables {
    Forward { first: u32, after: Option<String> },
    Backward { last: u32, before: Option<String> },
}

#[must_use]
pub fn parse_pagination(params: &ParamSet, page_by: u32) -> PaginationVariables {
    let cursor = params
        .get(CURSOR_PARAM_KEY)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string);

    if params.get(DIRECTION_PARAM_KEY) == Some("previous") {
        PaginationVariables::Backward {
            last: page_by,
            before: cursor,
        }
    } else {
        PaginationVariables::Forward {
            first: page_by,
            after: cursor,
        }
    }
}
