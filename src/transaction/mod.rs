//! Expenses and incomes.
//!
//! This module contains the `Transaction` model, validation of request bodies
//! and the route handlers shared by both resources.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod get_endpoint;
mod list_endpoint;
mod total_endpoint;

pub use core::{NewTransaction, Transaction};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use form::{TransactionForm, ValidationError};
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{ListParams, list_transactions_endpoint};
pub use total_endpoint::get_total_endpoint;
