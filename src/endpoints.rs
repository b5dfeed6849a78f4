//! The API endpoints URIs.
//!
//! Resource routes are relative to the group they are nested in, e.g. [TOTAL]
//! is served at `/api/expenses/total` and `/api/incomes/total`.
//! For endpoints that take a parameter, e.g., '/api/expenses/{id}', use [format_endpoint].

/// The liveness check.
pub const HEALTH: &str = "/health";
/// The prefix shared by every resource group.
pub const API: &str = "/api";
/// The segment of the expense route group under [API].
pub const EXPENSES: &str = "/expenses";
/// The segment of the income route group under [API].
pub const INCOMES: &str = "/incomes";

/// The collection of a resource: create and list.
pub const COLLECTION: &str = "/";
/// The sum of a resource's amounts.
pub const TOTAL: &str = "/total";
/// A single row of a resource: get, update and delete.
pub const MEMBER: &str = "/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{id}', '{id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
