use crate::Error;

/// The fallback handler for requests that match no route.
pub async fn get_404_not_found() -> Error {
    Error::RouteNotFound
}

/// The fallback handler for requests whose path matches a route but whose method does not.
pub async fn get_405_method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
