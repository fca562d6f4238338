//! Command-line front end for field mapping indexes.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
