//! Raw mapping input as supplied by upstream schema exports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::names::{FIELD_NAME, OBJECT_NAME, PROPERTY_NAME, ROW_KEY_SEPARATOR};

/// A plain mapping record before it is turned into a [`MappingRecord`].
///
/// Missing names deserialize to empty strings; nothing is validated unless
/// [`RawMapping::validate`] is called explicitly.
///
/// [`MappingRecord`]: crate::MappingRecord
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMapping {
    /// External name (e.g. a CRM column).
    #[serde(default)]
    pub field_name: String,
    /// Internal application name.
    #[serde(default)]
    pub property_name: String,
    /// Object type the mapping belongs to.
    #[serde(default)]
    pub object_name: String,
    /// Initial activation flag; absent means inactive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Every other key of the input record.
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

impl RawMapping {
    pub fn new(
        field_name: impl Into<String>,
        property_name: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            property_name: property_name.into(),
            object_name: object_name.into(),
            active: None,
            extension: Map::new(),
        }
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extension.insert(key.into(), value.into());
        self
    }

    /// Check that every required name is present and usable in a row key.
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            (FIELD_NAME, &self.field_name),
            (PROPERTY_NAME, &self.property_name),
            (OBJECT_NAME, &self.object_name),
        ] {
            if name.trim().is_empty() {
                return Err(ModelError::MissingName(key));
            }
        }
        for name in [&self.field_name, &self.property_name] {
            if name.contains(ROW_KEY_SEPARATOR) {
                return Err(ModelError::RowKeySeparator { name: name.clone() });
            }
        }
        Ok(())
    }
}
