//! FILENAME: core/dataview/src/value.rs
//! PURPOSE: Defines the primitive values carried by category and value columns.
//! CONTEXT: Columns store one `PrimitiveValue` per row. The regrouping engine
//! never inspects them; they only travel along with the column references.

use serde::{Deserialize, Serialize};

/// A single row value within a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Default for PrimitiveValue {
    fn default() -> Self {
        PrimitiveValue::Empty
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Text(value.to_string())
    }
}
