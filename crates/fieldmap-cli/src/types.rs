use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub object_name: String,
    pub field_paths: Vec<String>,
    pub property_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub object_name: String,
    pub records: usize,
    pub active: usize,
    pub modified: usize,
    pub field_paths: usize,
    pub property_paths: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchResult {
    pub touched: usize,
    pub unknown: Vec<String>,
}
