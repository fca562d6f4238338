use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use fieldmap_index::{IndexOptions, MappingIndex};

use crate::types::{ObjectSummary, PathReport, TouchResult};

/// Read mapping input from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read mappings from stdin")?;
        return Ok(contents);
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read mappings from {}", path.display()))
}

pub fn load_index(path: &Path, options: IndexOptions) -> Result<MappingIndex> {
    let contents = read_input(path)?;
    let index = MappingIndex::from_json_with(options, &contents)
        .with_context(|| format!("Failed to load mappings from {}", path.display()))?;
    info!(
        input = %path.display(),
        records = index.len(),
        objects = index.object_names().count(),
        "mappings loaded"
    );
    Ok(index)
}

/// Activate the records registered under `names`.
pub fn touch(index: &MappingIndex, names: &[String]) -> TouchResult {
    let mut result = TouchResult::default();
    for name in names {
        match index.get_mapping_record(name) {
            Some(record) => {
                record.borrow_mut().activate();
                result.touched += 1;
                debug!(name = %name, "touched mapping");
            }
            None => {
                warn!(name = %name, "no mapping registered under name");
                result.unknown.push(name.clone());
            }
        }
    }
    result
}

pub fn snapshot_json(index: &MappingIndex) -> Result<String> {
    serde_json::to_string_pretty(index).context("Failed to serialize snapshots")
}

pub fn rows_json(index: &MappingIndex, include_unmodified: bool) -> Result<String> {
    let rows = index.to_row_list(include_unmodified);
    serde_json::to_string_pretty(&rows).context("Failed to serialize rows")
}

pub fn path_report(index: &MappingIndex, object_name: &str) -> PathReport {
    PathReport {
        object_name: object_name.to_string(),
        field_paths: index.get_field_paths(object_name).into_iter().collect(),
        property_paths: index.get_property_paths(object_name).into_iter().collect(),
    }
}

pub fn object_summaries(index: &MappingIndex) -> Vec<ObjectSummary> {
    index
        .object_names()
        .filter_map(|object_name| {
            let child = index.get_object_index(object_name)?;
            let records = child.records();
            Some(ObjectSummary {
                object_name: object_name.to_string(),
                records: records.len(),
                active: records.iter().filter(|r| r.borrow().is_active()).count(),
                modified: records.iter().filter(|r| r.borrow().is_modified()).count(),
                field_paths: index.get_field_paths(object_name).len(),
                property_paths: index.get_property_paths(object_name).len(),
            })
        })
        .collect()
}
