//! Defines the core data models for transactions.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::database_id::TransactionId;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Rows of both resources share this shape; which table a row lives in is
/// decided by the [Resource](crate::Resource) it was stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// The mutable fields of a transaction after they have passed validation.
///
/// Use [TransactionForm::validate](crate::TransactionForm::validate) to create one
/// from a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A positive, finite amount of money.
    pub amount: f64,
    /// A non-empty description.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Create a new transaction without validating the fields.
    ///
    /// The caller must ensure `amount` is positive and `description` is not empty.
    #[cfg(test)]
    pub fn new_unchecked(amount: f64, description: &str, date: Date) -> Self {
        Self {
            amount,
            description: description.to_owned(),
            date,
        }
    }

    /// Attach a store-assigned ID.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}
