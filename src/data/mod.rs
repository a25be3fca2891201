//! Core data models for the library API
//!
//! This module contains the records exchanged with the remote catalog and
//! order API, and the decoder used to read them.

pub mod decode;

pub use decode::decode_case_insensitive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A book in the remote catalog
///
/// Missing fields fall back to their defaults, since the API omits them
/// freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Catalog identifier
    pub id: i32,
    /// Title, if the catalog has one
    pub title: Option<String>,
    /// Unit price; exact for ordinary prices, rounded past ~15 significant digits
    pub price: f64,
    /// Bookstand the book is kept on
    pub bookstand: i32,
    /// Shelf within the bookstand
    pub shelf: i32,
    /// Authors in catalog order
    pub authors: Vec<Author>,
}

/// An author record attached to a book
///
/// Carried through as raw JSON with its original key casing; this client
/// never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Author(Value);

impl Author {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Looks up a field by name, ignoring case
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0
            .as_object()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A customer order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    /// Order identifier
    #[serde(rename(serialize = "orderId", deserialize = "orderid"), alias = "orderId")]
    pub order_id: Option<String>,
    /// Ordered lines, in the order the API returned them
    #[serde(rename(serialize = "orderLines", deserialize = "orderlines"), alias = "orderLines")]
    pub order_lines: Vec<OrderLine>,
}

/// A single line of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLine {
    #[serde(rename(serialize = "bookId", deserialize = "bookid"), alias = "bookId")]
    pub book_id: i32,
    pub quantity: i32,
}
