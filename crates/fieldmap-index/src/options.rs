//! Configuration options for mapping indexes.

use fieldmap_model::names::PATH_SEPARATOR;
use serde::{Deserialize, Serialize};

/// How raw input is checked before a record is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Accept anything; missing names become empty strings.
    #[default]
    Lenient,
    /// Reject input with empty names or names containing `::`.
    Strict,
}

/// Options controlling index behavior.
///
/// Child indexes inherit the options of the root that created them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Record field and property names containing `path_separator` per
    /// object type.
    pub track_paths: bool,

    /// Validation applied to raw input at the root.
    pub validation: ValidationMode,

    /// Namespace separator that marks a name as a path.
    pub path_separator: char,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            track_paths: true,
            validation: ValidationMode::default(),
            path_separator: PATH_SEPARATOR,
        }
    }
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject incomplete or ambiguous raw records.
    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_track_paths(mut self, enable: bool) -> Self {
        self.track_paths = enable;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn with_path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }
}
