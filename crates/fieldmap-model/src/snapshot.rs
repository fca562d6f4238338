//! Export shapes consumed by persistence collaborators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::names::{PARTITION_KEY, ROW_KEY, row_key};

/// Canonical current state of a mapping.
///
/// Serializes flat: the tracked names and flag sit beside the extension keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSnapshot {
    pub field_name: String,
    pub property_name: String,
    pub object_name: String,
    pub active: bool,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

/// A snapshot keyed for a partition/row store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRow {
    /// Always the object name.
    #[serde(rename = "PartitionKey")]
    pub partition_key: String,
    /// `fieldName::propertyName`.
    #[serde(rename = "RowKey")]
    pub row_key: String,
    #[serde(flatten)]
    pub snapshot: MappingSnapshot,
}

impl From<MappingSnapshot> for MappingRow {
    fn from(mut snapshot: MappingSnapshot) -> Self {
        // Keys carried over from a previously exported row are stale.
        snapshot.extension.remove(PARTITION_KEY);
        snapshot.extension.remove(ROW_KEY);
        Self {
            partition_key: snapshot.object_name.clone(),
            row_key: row_key(&snapshot.field_name, &snapshot.property_name),
            snapshot,
        }
    }
}
