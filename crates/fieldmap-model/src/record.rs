//! A single field mapping with dirty-state tracking.
//!
//! A [`MappingRecord`] moves through three observable states:
//!
//! - inactive and clean, right after construction from an inactive raw record
//! - active and clean, when constructed with `active: true`
//! - active and dirty, once activated or once any tracked value changed
//!
//! There is no way back to clean; a fresh record has to be built instead.
//!
//! Reading a name through [`MappingRecord::field_name`],
//! [`MappingRecord::property_name`] or [`MappingRecord::object_name`]
//! activates the record. These accessors take `&mut self` so the side effect
//! stays visible at the call site. The `peek_*` accessors read without
//! touching the record.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::names::{ACTIVE, FIELD_NAME, MODIFIED, OBJECT_NAME, PROPERTY_NAME, is_reserved};
use crate::raw::RawMapping;
use crate::snapshot::{MappingRow, MappingSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub struct MappingRecord {
    field_name: String,
    property_name: String,
    object_name: String,
    active: bool,
    modified: bool,
    extension: Map<String, Value>,
    /// Extension keys present at construction; only these are dirty-tracked.
    known_extensions: HashSet<String>,
}

impl MappingRecord {
    /// Build a clean record from raw input.
    ///
    /// Reserved keys found among the extension data are dropped; the typed
    /// fields are the only source of truth for them.
    pub fn new(raw: RawMapping) -> Self {
        let RawMapping {
            field_name,
            property_name,
            object_name,
            active,
            mut extension,
        } = raw;
        extension.retain(|key, _| !is_reserved(key));
        let known_extensions = extension.keys().cloned().collect();
        Self {
            field_name,
            property_name,
            object_name,
            active: active.unwrap_or(false),
            modified: false,
            extension,
            known_extensions,
        }
    }

    /// Read the external field name, activating the record.
    pub fn field_name(&mut self) -> &str {
        self.activate();
        &self.field_name
    }

    /// Read the internal property name, activating the record.
    pub fn property_name(&mut self) -> &str {
        self.activate();
        &self.property_name
    }

    /// Read the object type, activating the record.
    pub fn object_name(&mut self) -> &str {
        self.activate();
        &self.object_name
    }

    pub fn peek_field_name(&self) -> &str {
        &self.field_name
    }

    pub fn peek_property_name(&self) -> &str {
        &self.property_name
    }

    pub fn peek_object_name(&self) -> &str {
        &self.object_name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the record as touched.
    ///
    /// Has the same effect as reading one of its names: the first activation
    /// of an inactive record makes it dirty, later calls do nothing.
    pub fn activate(&mut self) {
        self.set_active(true);
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.modified = true;
        }
    }

    pub fn set_field_name(&mut self, field_name: impl Into<String>) {
        let field_name = field_name.into();
        if self.field_name != field_name {
            self.field_name = field_name;
            self.modified = true;
        }
    }

    pub fn set_property_name(&mut self, property_name: impl Into<String>) {
        let property_name = property_name.into();
        if self.property_name != property_name {
            self.property_name = property_name;
            self.modified = true;
        }
    }

    /// Accepts and ignores the new value: the object type of a record is fixed
    /// at construction.
    pub fn set_object_name(&mut self, object_name: impl Into<String>) {
        let object_name = object_name.into();
        if object_name != self.object_name {
            tracing::trace!(
                object_name = %self.object_name,
                ignored = %object_name,
                "object name is immutable"
            );
        }
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extension.get(key)
    }

    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extension
    }

    /// Set an extension attribute.
    ///
    /// Only re-assigning a key known at construction to a different value
    /// dirties the record; keys introduced later are never tracked.
    pub fn set_extension(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if is_reserved(&key) {
            return Err(ModelError::ReservedKey(key));
        }
        let changed = self.extension.get(&key) != Some(&value);
        if changed && self.known_extensions.contains(&key) {
            self.modified = true;
        }
        self.extension.insert(key, value);
        Ok(())
    }

    /// Read any attribute by key.
    ///
    /// Name keys go through the activating accessors; `active`, `modified`
    /// and extension keys are read as-is.
    pub fn attribute(&mut self, key: &str) -> Option<Value> {
        match key {
            FIELD_NAME => Some(Value::from(self.field_name())),
            PROPERTY_NAME => Some(Value::from(self.property_name())),
            OBJECT_NAME => Some(Value::from(self.object_name())),
            ACTIVE => Some(Value::Bool(self.active)),
            MODIFIED => Some(Value::Bool(self.modified)),
            _ => self.extension.get(key).cloned(),
        }
    }

    /// Write any attribute by key, applying the same tracking rules as the
    /// typed setters.
    pub fn set_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        match key {
            FIELD_NAME => self.set_field_name(expect_string(key, value)?),
            PROPERTY_NAME => self.set_property_name(expect_string(key, value)?),
            OBJECT_NAME => {
                if let Value::String(object_name) = value {
                    self.set_object_name(object_name);
                }
            }
            ACTIVE => match value {
                Value::Bool(active) => self.set_active(active),
                _ => {
                    return Err(ModelError::AttributeType {
                        key: key.to_string(),
                        expected: "boolean",
                    });
                }
            },
            MODIFIED => return Err(ModelError::ReadOnly(MODIFIED)),
            _ => self.set_extension(key, value)?,
        }
        Ok(())
    }

    /// Current state merged over the extension data. Does not activate.
    pub fn to_snapshot(&self) -> MappingSnapshot {
        MappingSnapshot {
            field_name: self.field_name.clone(),
            property_name: self.property_name.clone(),
            object_name: self.object_name.clone(),
            active: self.active,
            extension: self.extension.clone(),
        }
    }

    /// Snapshot plus `PartitionKey` and `RowKey`. Does not activate.
    pub fn to_row(&self) -> MappingRow {
        MappingRow::from(self.to_snapshot())
    }
}

impl From<RawMapping> for MappingRecord {
    fn from(raw: RawMapping) -> Self {
        Self::new(raw)
    }
}

impl Serialize for MappingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_snapshot().serialize(serializer)
    }
}

fn expect_string(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(ModelError::AttributeType {
            key: key.to_string(),
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order() -> MappingRecord {
        MappingRecord::new(
            RawMapping::new("Order__c", "orderId", "ShippingDetail__c")
                .with_extension("additional", 1),
        )
    }

    #[test]
    fn new_record_is_clean() {
        let record = order();
        assert!(!record.is_active());
        assert!(!record.is_modified());

        let active = MappingRecord::new(RawMapping::new("A", "a", "Obj").with_active(true));
        assert!(active.is_active());
        assert!(!active.is_modified());
    }

    #[test]
    fn name_read_activates_once() {
        let mut record = order();
        assert_eq!(record.field_name(), "Order__c");
        assert!(record.is_active());
        assert!(record.is_modified());

        let mut active = MappingRecord::new(RawMapping::new("A", "a", "Obj").with_active(true));
        assert_eq!(active.property_name(), "a");
        assert!(!active.is_modified());
    }

    #[test]
    fn peek_does_not_activate() {
        let record = order();
        assert_eq!(record.peek_field_name(), "Order__c");
        assert_eq!(record.peek_property_name(), "orderId");
        assert_eq!(record.peek_object_name(), "ShippingDetail__c");
        assert!(!record.is_active());
        assert!(!record.is_modified());
    }

    #[test]
    fn object_name_cannot_change() {
        let mut record = order();
        record.set_object_name("Dummy");
        assert!(!record.is_modified());
        assert_eq!(record.object_name(), "ShippingDetail__c");
        record
            .set_attribute(OBJECT_NAME, json!("Other"))
            .expect("object name write is silent");
        assert_eq!(record.peek_object_name(), "ShippingDetail__c");
    }

    #[test]
    fn new_extension_key_is_not_a_modification() {
        let mut record = order();
        record
            .set_extension("label", json!("Order"))
            .expect("set new key");
        assert!(!record.is_modified());
        assert_eq!(record.extension("label"), Some(&json!("Order")));

        record
            .set_extension("label", json!("Shipment"))
            .expect("re-assign late key");
        assert!(!record.is_modified());
        assert_eq!(record.extension("label"), Some(&json!("Shipment")));

        record
            .set_extension("additional", json!(1))
            .expect("same value");
        assert!(!record.is_modified());

        record
            .set_extension("additional", json!(3))
            .expect("changed value");
        assert!(record.is_modified());
        assert_eq!(record.extension("additional"), Some(&json!(3)));
    }

    #[test]
    fn extension_rejects_reserved_keys() {
        let mut record = order();
        assert_eq!(
            record.set_extension(FIELD_NAME, json!("x")),
            Err(ModelError::ReservedKey(FIELD_NAME.to_string()))
        );
        assert_eq!(record.peek_field_name(), "Order__c");
    }

    #[test]
    fn attribute_routes_to_typed_accessors() {
        let mut record = order();
        assert_eq!(record.attribute("additional"), Some(json!(1)));
        assert_eq!(record.attribute(MODIFIED), Some(json!(false)));
        assert!(!record.is_active());

        assert_eq!(record.attribute(PROPERTY_NAME), Some(json!("orderId")));
        assert!(record.is_active());
        assert_eq!(record.attribute(MODIFIED), Some(json!(true)));
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn set_attribute_checks_types() {
        let mut record = order();
        assert_eq!(
            record.set_attribute(ACTIVE, json!("yes")),
            Err(ModelError::AttributeType {
                key: ACTIVE.to_string(),
                expected: "boolean"
            })
        );
        assert_eq!(
            record.set_attribute(FIELD_NAME, json!(7)),
            Err(ModelError::AttributeType {
                key: FIELD_NAME.to_string(),
                expected: "string"
            })
        );
        assert_eq!(
            record.set_attribute(MODIFIED, json!(false)),
            Err(ModelError::ReadOnly(MODIFIED))
        );
        assert!(!record.is_modified());

        record
            .set_attribute(FIELD_NAME, json!("Dummy1"))
            .expect("set field name");
        assert!(record.is_modified());
        assert_eq!(record.peek_field_name(), "Dummy1");
    }

    #[test]
    fn reserved_input_keys_do_not_become_extensions() {
        let raw: RawMapping = serde_json::from_value(json!({
            "fieldName": "Name",
            "propertyName": "name",
            "objectName": "Account",
            "modified": true
        }))
        .expect("parse raw mapping");
        let record = MappingRecord::new(raw);
        assert!(!record.is_modified());
        assert!(record.extensions().is_empty());
    }

    #[test]
    fn row_uses_current_names() {
        let mut record = order();
        record.set_field_name("Dummy1");
        record.set_property_name("Dummy2");

        let row = record.to_row();
        assert_eq!(row.partition_key, "ShippingDetail__c");
        assert_eq!(row.row_key, "Dummy1::Dummy2");
        assert_eq!(row.snapshot.extension.get("additional"), Some(&json!(1)));
    }

    #[test]
    fn serializes_as_snapshot() {
        let record = order();
        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(
            value,
            json!({
                "fieldName": "Order__c",
                "propertyName": "orderId",
                "objectName": "ShippingDetail__c",
                "active": false,
                "additional": 1
            })
        );
        assert!(!record.is_active());
    }
}
