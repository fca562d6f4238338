//! Dual-keyed index of field mapping records.
//!
//! [`MappingIndex`] looks records up by field name or property name and
//! groups them by object type, sharing each record between the root and the
//! child index for its object type. Row export only emits dirty records
//! unless a full resynchronization is requested.

#![deny(unsafe_code)]

pub mod error;
pub mod index;
pub mod options;
pub mod paths;

pub use error::{IndexError, Result};
pub use index::{IndexLevel, MappingIndex, MappingInput, SharedRecord};
pub use options::{IndexOptions, ValidationMode};
pub use paths::PathRegistry;
