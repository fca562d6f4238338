//! Per-object sets of path names.
//!
//! A path name contains a namespace separator and refers into a related
//! object (`Account.Region`) rather than a flat attribute.

use fieldmap_model::names::is_path;
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    field_paths: IndexMap<String, IndexSet<String>>,
    property_paths: IndexMap<String, IndexSet<String>>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whichever of the two names is a path, under `object_name`.
    pub fn record(
        &mut self,
        object_name: &str,
        field_name: &str,
        property_name: &str,
        separator: char,
    ) {
        if is_path(field_name, separator) {
            insert(&mut self.field_paths, object_name, field_name);
        }
        if is_path(property_name, separator) {
            insert(&mut self.property_paths, object_name, property_name);
        }
    }

    pub fn field_paths(&self, object_name: &str) -> Option<&IndexSet<String>> {
        self.field_paths.get(object_name)
    }

    pub fn property_paths(&self, object_name: &str) -> Option<&IndexSet<String>> {
        self.property_paths.get(object_name)
    }
}

fn insert(sets: &mut IndexMap<String, IndexSet<String>>, object_name: &str, name: &str) {
    sets.entry(object_name.to_string())
        .or_default()
        .insert(name.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_only_dotted_names() {
        let mut paths = PathRegistry::new();
        paths.record("Order", "Account.Region", "region", '.');
        paths.record("Order", "Total", "pricing.total", '.');
        paths.record("Invoice", "Name", "name", '.');

        let fields = paths.field_paths("Order").expect("order field paths");
        assert!(fields.contains("Account.Region"));
        assert_eq!(fields.len(), 1);

        let properties = paths.property_paths("Order").expect("order property paths");
        assert!(properties.contains("pricing.total"));
        assert!(!properties.contains("region"));

        assert!(paths.field_paths("Invoice").is_none());
    }

    #[test]
    fn honors_custom_separator() {
        let mut paths = PathRegistry::new();
        paths.record("Order", "Account/Region", "account.region", '/');
        assert!(paths.field_paths("Order").is_some());
        assert!(paths.property_paths("Order").is_none());
    }
}
