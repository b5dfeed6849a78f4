//! Defines the endpoint for listing a page of expenses or incomes.
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    Error, ResourceState,
    pagination::Pagination,
    stores::{ListQuery, Page},
};

/// The query parameters of a list request.
///
/// The values are kept as raw text so that unusable values fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, PartialEq)]
pub struct ListParams {
    /// The maximum number of rows to return.
    pub limit: Option<String>,
    /// The index of the first row to return.
    pub offset: Option<String>,
    /// The field to sort by, either "description" or "amount".
    pub sort_by: Option<String>,
}

impl ListParams {
    /// Collect the known parameters from the decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "sortBy" => &mut params.sort_by,
                _ => continue,
            };

            slot.get_or_insert(value);
        }

        params
    }
}

/// A route handler that returns a page of transactions and the total row count.
///
/// A query string that cannot be decoded is treated as empty.
pub async fn list_transactions_endpoint(
    State(state): State<ResourceState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Page>, Error> {
    let params = match query {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!("Ignoring undecodable query string: {rejection}");
            ListParams::default()
        }
    };

    let query = ListQuery {
        pagination: Pagination::from_params(params.limit.as_deref(), params.offset.as_deref()),
        order: state.resource.sort_order(params.sort_by.as_deref()),
    };

    state
        .store
        .select_range(state.resource, query)
        .await
        .map(Json)
        .map_err(Error::from_listing)
}
