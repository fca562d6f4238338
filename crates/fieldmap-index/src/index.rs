//! Two-level index of mapping records.
//!
//! The root index owns one child index per object type. Every record minted
//! at the root is registered under both of its names at the root and in the
//! child for its object type. Both levels hold the same [`SharedRecord`], so a
//! change made through one is visible through the other.
//!
//! Name lookups activate the record they hit. If the record is already
//! borrowed elsewhere, the lookup still answers but leaves it inactive.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use fieldmap_model::{MappingRecord, MappingRow, MappingSnapshot, RawMapping};
use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::options::{IndexOptions, ValidationMode};
use crate::paths::PathRegistry;

/// A mapping record shared between index levels.
pub type SharedRecord = Rc<RefCell<MappingRecord>>;

/// Input accepted by [`MappingIndex::ingest`].
#[derive(Debug, Clone)]
pub enum MappingInput {
    /// Plain input; only the root builds records from it.
    Raw(RawMapping),
    /// An existing record, registered as-is.
    Record(SharedRecord),
}

impl From<RawMapping> for MappingInput {
    fn from(raw: RawMapping) -> Self {
        Self::Raw(raw)
    }
}

impl From<SharedRecord> for MappingInput {
    fn from(record: SharedRecord) -> Self {
        Self::Record(record)
    }
}

impl From<&SharedRecord> for MappingInput {
    fn from(record: &SharedRecord) -> Self {
        Self::Record(Rc::clone(record))
    }
}

/// Position of an index in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexLevel {
    /// Entry point; builds records and fans them out to children.
    #[default]
    Root,
    /// Holds the records of exactly one object type.
    Child,
}

#[derive(Debug, Default)]
pub struct MappingIndex {
    level: IndexLevel,
    options: IndexOptions,
    /// Records keyed by field name and by property name.
    fields: IndexMap<String, SharedRecord>,
    /// Child indexes keyed by object type, in creation order.
    mappers: IndexMap<String, MappingIndex>,
    paths: PathRegistry,
}

impl MappingIndex {
    /// Create an empty root index.
    pub fn new() -> Self {
        Self::with_options(IndexOptions::default())
    }

    /// Create an empty root index with the given options.
    pub fn with_options(options: IndexOptions) -> Self {
        Self {
            level: IndexLevel::Root,
            options,
            fields: IndexMap::new(),
            mappers: IndexMap::new(),
            paths: PathRegistry::new(),
        }
    }

    fn child(options: IndexOptions) -> Self {
        Self {
            level: IndexLevel::Child,
            ..Self::with_options(options)
        }
    }

    /// Build a root index from raw records, in order.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawMapping>,
    {
        Self::from_records_with(IndexOptions::default(), records)
    }

    pub fn from_records_with<I>(options: IndexOptions, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawMapping>,
    {
        let mut index = Self::with_options(options);
        for raw in records {
            index.ingest(raw)?;
        }
        debug!(
            records = index.len(),
            objects = index.mappers.len(),
            "mapping index populated"
        );
        Ok(index)
    }

    /// Build a root index from a JSON array of raw records.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with(IndexOptions::default(), json)
    }

    pub fn from_json_with(options: IndexOptions, json: &str) -> Result<Self> {
        let records: Vec<RawMapping> = serde_json::from_str(json)?;
        Self::from_records_with(options, records)
    }

    pub fn level(&self) -> IndexLevel {
        self.level
    }

    pub fn is_child(&self) -> bool {
        self.level == IndexLevel::Child
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Field name mapped to `property_name`, activating the record.
    pub fn get_field_name(&self, property_name: &str) -> Option<String> {
        let record = self.fields.get(property_name)?;
        read_name(
            record,
            property_name,
            MappingRecord::field_name,
            MappingRecord::peek_field_name,
        )
    }

    /// Property name mapped to `field_name`, activating the record.
    pub fn get_property_name(&self, field_name: &str) -> Option<String> {
        let record = self.fields.get(field_name)?;
        read_name(
            record,
            field_name,
            MappingRecord::property_name,
            MappingRecord::peek_property_name,
        )
    }

    /// Record registered under a field name or a property name.
    pub fn get_mapping_record(&self, name: &str) -> Option<&SharedRecord> {
        self.fields.get(name)
    }

    /// Child index holding the records of `object_name`.
    pub fn get_object_index(&self, object_name: &str) -> Option<&MappingIndex> {
        self.mappers.get(object_name)
    }

    /// Field names of `object_name` that are paths; empty if none were seen.
    pub fn get_field_paths(&self, object_name: &str) -> IndexSet<String> {
        self.paths
            .field_paths(object_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Property names of `object_name` that are paths; empty if none were seen.
    pub fn get_property_paths(&self, object_name: &str) -> IndexSet<String> {
        self.paths
            .property_paths(object_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Object types with a child index, in creation order.
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    /// Add a mapping.
    ///
    /// - An existing record is registered at this level only.
    /// - Raw input given to a child is ignored and yields `None`.
    /// - Raw input given to the root becomes a new record, registered at the
    ///   root and handed to the child for its object type.
    ///
    /// Fails only when strict validation rejects raw input.
    pub fn ingest(&mut self, input: impl Into<MappingInput>) -> Result<Option<SharedRecord>> {
        match input.into() {
            MappingInput::Record(record) => {
                self.register(&record);
                Ok(Some(record))
            }
            MappingInput::Raw(_) if self.is_child() => {
                trace!("child index ignores raw mapping input");
                Ok(None)
            }
            MappingInput::Raw(raw) => {
                if self.options.validation == ValidationMode::Strict {
                    raw.validate()?;
                }
                let record: SharedRecord = Rc::new(RefCell::new(MappingRecord::new(raw)));
                self.register(&record);

                let object_name = record.borrow().peek_object_name().to_string();
                let options = &self.options;
                let child = self
                    .mappers
                    .entry(object_name)
                    .or_insert_with_key(|object_name| {
                        trace!(object_name = %object_name, "created object index");
                        Self::child(options.clone())
                    });
                child.register(&record);
                Ok(Some(record))
            }
        }
    }

    fn register(&mut self, record: &SharedRecord) {
        let mapping = record.borrow();
        let field_name = mapping.peek_field_name();
        let property_name = mapping.peek_property_name();
        trace!(
            level = ?self.level,
            field_name = %field_name,
            property_name = %property_name,
            object_name = %mapping.peek_object_name(),
            "registering mapping"
        );
        self.fields
            .insert(field_name.to_string(), Rc::clone(record));
        self.fields
            .insert(property_name.to_string(), Rc::clone(record));
        if self.options.track_paths {
            self.paths.record(
                mapping.peek_object_name(),
                field_name,
                property_name,
                self.options.path_separator,
            );
        }
    }

    /// Distinct records, in first-registration order.
    ///
    /// The root gathers them from its children, in child creation order.
    pub fn records(&self) -> Vec<SharedRecord> {
        match self.level {
            IndexLevel::Child => {
                let mut seen = HashSet::new();
                self.fields
                    .values()
                    .filter(|record| seen.insert(Rc::as_ptr(record)))
                    .cloned()
                    .collect()
            }
            IndexLevel::Root => self
                .mappers
                .values()
                .flat_map(MappingIndex::records)
                .collect(),
        }
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        match self.level {
            IndexLevel::Child => self.fields.is_empty(),
            IndexLevel::Root => self.mappers.values().all(MappingIndex::is_empty),
        }
    }

    /// Snapshot of every distinct record.
    pub fn to_snapshot_list(&self) -> Vec<MappingSnapshot> {
        self.records()
            .iter()
            .map(|record| record.borrow().to_snapshot())
            .collect()
    }

    /// Rows for dirty records, or for every record when `include_unmodified`
    /// is set.
    pub fn to_row_list(&self, include_unmodified: bool) -> Vec<MappingRow> {
        let rows: Vec<MappingRow> = self
            .records()
            .iter()
            .filter_map(|record| {
                let record = record.borrow();
                (include_unmodified || record.is_modified()).then(|| record.to_row())
            })
            .collect();
        if self.level == IndexLevel::Root {
            debug!(rows = rows.len(), include_unmodified, "exported mapping rows");
        }
        rows
    }
}

/// Read a name through `activating`, or through `peek` without activation
/// when the record is already borrowed.
fn read_name(
    record: &SharedRecord,
    key: &str,
    activating: fn(&mut MappingRecord) -> &str,
    peek: fn(&MappingRecord) -> &str,
) -> Option<String> {
    if let Ok(mut mapping) = record.try_borrow_mut() {
        return Some(activating(&mut mapping).to_string());
    }
    match record.try_borrow() {
        Ok(mapping) => {
            warn!(key = %key, "mapping record is borrowed; lookup did not activate it");
            Some(peek(&mapping).to_string())
        }
        Err(_) => {
            warn!(key = %key, "mapping record is mutably borrowed; lookup skipped");
            None
        }
    }
}

impl Serialize for MappingIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_snapshot_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> MappingIndex {
        MappingIndex::from_records([
            RawMapping::new("Order__c", "orderId", "ShippingDetail__c")
                .with_extension("additional", 1),
            RawMapping::new("Warehouse__c", "warehouseId", "ShippingDetail__c")
                .with_extension("additional", 2),
        ])
        .expect("build index")
    }

    #[test]
    fn root_registers_both_names() {
        let index = shipping();
        assert_eq!(index.level(), IndexLevel::Root);
        assert!(index.get_mapping_record("Order__c").is_some());
        assert!(index.get_mapping_record("orderId").is_some());
        assert!(index.get_mapping_record("Unknown").is_none());
        assert_eq!(index.object_names().collect::<Vec<_>>(), ["ShippingDetail__c"]);
    }

    #[test]
    fn lookups_activate_records() {
        let index = shipping();
        assert!(index.to_row_list(false).is_empty());
        assert_eq!(index.to_row_list(true).len(), 2);

        assert_eq!(index.get_field_name("orderId").as_deref(), Some("Order__c"));
        let rows = index.to_row_list(false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_key, "Order__c::orderId");

        assert_eq!(index.get_property_name("Unknown"), None);
        assert_eq!(index.to_row_list(false).len(), 1);
    }

    #[test]
    fn lookup_on_borrowed_record_does_not_activate() {
        let index = shipping();
        let record = index
            .get_mapping_record("orderId")
            .cloned()
            .expect("order record");

        let held = record.borrow();
        assert_eq!(index.get_field_name("orderId").as_deref(), Some("Order__c"));
        assert_eq!(index.get_property_name("Order__c").as_deref(), Some("orderId"));
        assert!(!held.is_active());
        drop(held);

        let held = record.borrow_mut();
        assert_eq!(index.get_field_name("orderId"), None);
        drop(held);

        assert_eq!(index.get_field_name("orderId").as_deref(), Some("Order__c"));
        assert!(record.borrow().is_active());
    }

    #[test]
    fn child_ignores_raw_input() {
        let mut index = shipping();
        let record = index
            .get_mapping_record("Order__c")
            .cloned()
            .expect("order record");

        let child = index
            .mappers
            .get_mut("ShippingDetail__c")
            .expect("shipping child");
        assert!(child.is_child());
        let ignored = child
            .ingest(RawMapping::new("Other__c", "other", "ShippingDetail__c"))
            .expect("raw input to child");
        assert!(ignored.is_none());
        assert!(child.get_mapping_record("Other__c").is_none());

        let registered = child.ingest(&record).expect("record input to child");
        assert!(registered.is_some_and(|registered| Rc::ptr_eq(&registered, &record)));
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn identical_names_occupy_one_key() {
        let index = MappingIndex::from_records([RawMapping::new("Name", "Name", "Account")])
            .expect("build index");
        let child = index.get_object_index("Account").expect("account child");
        assert_eq!(child.fields.len(), 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn empty_index() {
        let index = MappingIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.to_snapshot_list().is_empty());
        assert!(index.get_field_paths("Order").is_empty());
        assert!(index.get_object_index("Order").is_none());
    }
}
