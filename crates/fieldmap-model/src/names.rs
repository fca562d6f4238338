//! Attribute keys and separators shared by the record and its export shapes.

/// External field name key.
pub const FIELD_NAME: &str = "fieldName";
/// Internal property name key.
pub const PROPERTY_NAME: &str = "propertyName";
/// Object type key.
pub const OBJECT_NAME: &str = "objectName";
/// Activation flag key.
pub const ACTIVE: &str = "active";
/// Dirty flag key.
pub const MODIFIED: &str = "modified";

/// Partition key added to the row shape.
pub const PARTITION_KEY: &str = "PartitionKey";
/// Row key added to the row shape.
pub const ROW_KEY: &str = "RowKey";

/// Joins the field name and property name inside a row key.
///
/// Names containing this sequence produce ambiguous row keys.
pub const ROW_KEY_SEPARATOR: &str = "::";

/// Namespace separator marking a name as a path into a related object.
pub const PATH_SEPARATOR: char = '.';

/// Keys handled by typed accessors rather than the extension container.
pub const RESERVED_KEYS: [&str; 5] = [FIELD_NAME, PROPERTY_NAME, OBJECT_NAME, ACTIVE, MODIFIED];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Returns true if the name denotes a path (contains `separator`).
pub fn is_path(name: &str, separator: char) -> bool {
    name.contains(separator)
}

/// Builds the row key for a field/property pair.
pub fn row_key(field_name: &str, property_name: &str) -> String {
    format!("{field_name}{ROW_KEY_SEPARATOR}{property_name}")
}
