//! Field mapping records.
//!
//! A [`MappingRecord`] ties one external field name to one internal property
//! name for a single object type and tracks whether it changed since load.

pub mod error;
pub mod names;
pub mod raw;
pub mod record;
pub mod snapshot;

pub use error::{ModelError, Result};
pub use raw::RawMapping;
pub use record::MappingRecord;
pub use snapshot::{MappingRow, MappingSnapshot};
