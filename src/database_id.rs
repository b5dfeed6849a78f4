//! Database ID type definition.

use crate::stores::StoreError;

/// Alias for the integer type the store assigns to transactions.
pub type TransactionId = i64;

/// Parse the raw `{id}` path segment into a [TransactionId].
///
/// The raw text is accepted by the router so that a malformed ID is reported
/// the same way the store reports any other bad query.
///
/// # Errors
/// Returns [StoreError::InvalidId] if `raw` is not a base 10 integer.
pub fn parse_transaction_id(raw: &str) -> Result<TransactionId, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| StoreError::InvalidId(raw.to_owned()))
}
