//! Change feed event payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Kind of row change an event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeOp {
    Insert,
    Update,
}

/// A row-change notification carried over the feed.
///
/// The row is the full post-change state serialized as JSON, so
/// listeners never have to re-fetch what the event already tells them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// What happened to the row
    pub op: ChangeOp,
    /// Source table name (e.g. "messages", "conversations")
    pub table: String,
    /// Post-change row state
    pub row: serde_json::Value,
}

impl ChangeEvent {
    /// Create an insert event
    #[must_use]
    pub fn insert(table: impl Into<String>, row: serde_json::Value) -> Self {
        Self {
            op: ChangeOp::Insert,
            table: table.into(),
            row,
        }
    }

    /// Create an update event
    #[must_use]
    pub fn update(table: impl Into<String>, row: serde_json::Value) -> Self {
        Self {
            op: ChangeOp::Update,
            table: table.into(),
            row,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the row back into a typed value
    pub fn row_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.row.clone())
    }

    /// Check if this event describes the given table
    #[inline]
    #[must_use]
    pub fn is_table(&self, table: &str) -> bool {
        self.table == table
    }
}
