//! Domain DTOs for the book catalog API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch any schema drift between
//! the two. Field names are camelCase on the wire (`publishDate`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned book identifier.
///
/// The client never invents or edits ids, so the value is kept exactly as
/// the server sent it: any JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(serde_json::Number),
    Text(String),
}

impl BookId {
    /// Recover an id from its textual form, e.g. a control's `data-id`
    /// attribute or a command-line argument.
    ///
    /// Only text that is already the canonical rendering of a number becomes
    /// `Number`; `"007"` or `"+5"` stay text so they are sent back unchanged.
    pub fn from_attr(value: &str) -> Self {
        match value.parse::<serde_json::Number>() {
            Ok(n) if n.to_string() == value => BookId::Number(n),
            _ => BookId::Text(value.to_string()),
        }
    }
}

impl From<u64> for BookId {
    fn from(n: u64) -> Self {
        BookId::Number(n.into())
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId::Text(s.to_string())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(n) => write!(f, "{n}"),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

/// A single book record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publish_date: String,
}

/// Request payload for creating or replacing a book. Never carries an id.
///
/// A NaN price (unparseable form input) serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
    pub publish_date: String,
}

/// Format a price the way a browser stringifies a number: integral values
/// without a fractional part, infinities spelled out, exponent notation
/// below `1e-6` and from `1e21` up.
pub fn format_price(price: f64) -> String {
    if price.is_infinite() {
        return if price > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if price == 0.0 {
        return "0".to_string();
    }
    let magnitude = price.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{price:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    format!("{price}")
}
