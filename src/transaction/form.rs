//! Decoding and validation of the request body for creating or updating a transaction.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;
use serde_json::Value;
use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{Error, transaction::NewTransaction};

/// The reasons a transaction body can fail validation.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one of the fields is missing, null, zero, false or empty.
    #[error("Amount, description, and date are required!")]
    MissingFields,

    /// The amount is not a finite number greater than zero.
    #[error("Amount must be a positive number!")]
    InvalidAmount,

    /// The date could not be read as a calendar date.
    #[error("Invalid date format!")]
    InvalidDate,
}

/// The raw body of a create or update request.
///
/// The body may be sent as JSON or as a URL-encoded form. Any other content
/// type, or no body at all, decodes to an empty form which then fails
/// validation with [ValidationError::MissingFields].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction. Either a number or text holding a number.
    pub amount: Option<Value>,
    /// Text detailing the transaction.
    pub description: Option<Value>,
    /// When the transaction occurred, e.g. "2024-01-31".
    pub date: Option<Value>,
}

impl TransactionForm {
    fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            amount: fields.remove("amount").map(Value::String),
            description: fields.remove("description").map(Value::String),
            date: fields.remove("date").map(Value::String),
        }
    }

    /// Check the fields and convert them into a [NewTransaction].
    ///
    /// The checks run in order: presence of all three fields, then the
    /// amount, then the date.
    ///
    /// # Errors
    /// Returns the [ValidationError] for the first check that fails.
    pub fn validate(self) -> Result<NewTransaction, ValidationError> {
        let (Some(amount), Some(description), Some(date)) = (
            self.amount.filter(is_truthy),
            self.description.filter(is_truthy),
            self.date.filter(is_truthy),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let description = match description {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => return Err(ValidationError::MissingFields),
        };

        let amount = parse_amount(&amount).ok_or(ValidationError::InvalidAmount)?;
        let date = date
            .as_str()
            .and_then(parse_date)
            .ok_or(ValidationError::InvalidDate)?;

        Ok(NewTransaction {
            amount,
            description,
            date,
        })
    }
}

impl<S> FromRequest<S> for TransactionForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(form) = Json::<TransactionForm>::from_request(request, state)
                .await
                .map_err(|rejection| Error::MalformedBody(rejection.body_text()))?;

            Ok(form)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
                .await
                .map_err(|rejection| Error::MalformedBody(rejection.body_text()))?;

            Ok(Self::from_fields(fields))
        } else {
            Ok(Self::default())
        }
    }
}

/// Whether a JSON value counts as "provided".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Read a calendar date from either "YYYY-MM-DD" (month and day may drop the
/// leading zero) or an RFC 3339 date-time.
fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    Date::parse(text, format_description!("[year]-[month padding:none]-[day padding:none]"))
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(text, &Rfc3339)
                .ok()
                .map(|date_time| date_time.date())
        })
}
