//! This module defines how list requests are paged.
//!
//! Pages are selected by an inclusive, zero-based row range rather than by
//! page number. The `limit` and `offset` query parameters are parsed
//! leniently: anything that does not start with a positive integer falls back
//! to the default instead of failing the request.

use std::ops::RangeInclusive;

/// The number of rows returned when `limit` is absent or unusable.
pub const DEFAULT_LIMIT: u64 = 5;
/// The index of the first row returned when `offset` is absent or unusable.
pub const DEFAULT_OFFSET: u64 = 0;

/// A window of rows to fetch from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// The maximum number of rows to fetch. Always at least one.
    pub limit: u64,
    /// The index of the first row to fetch.
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Build a [Pagination] from the raw `limit` and `offset` query parameters.
    ///
    /// A value that is missing, does not start with an integer, is zero or is
    /// negative is replaced by [DEFAULT_LIMIT] or [DEFAULT_OFFSET]. Trailing
    /// characters after the leading integer are ignored, so `"10rows"` is read
    /// as `10`.
    pub fn from_params(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: positive_or(limit, DEFAULT_LIMIT),
            offset: positive_or(offset, DEFAULT_OFFSET),
        }
    }

    /// The inclusive range of row indices covered by this page.
    pub fn range(&self) -> RangeInclusive<u64> {
        self.offset..=self.offset.saturating_add(self.limit.saturating_sub(1))
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(parse_leading_integer)
        .and_then(|value| u64::try_from(value).ok())
        .filter(|&value| value > 0)
        .unwrap_or(default)
}

/// Read the integer at the start of `text`, skipping leading whitespace.
///
/// Returns `None` if there are no digits or the value does not fit in an `i64`.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };

    let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();

    if digit_count == 0 {
        return None;
    }

    format!("{sign}{}", &digits[..digit_count]).parse().ok()
}
