//! Growth reference data loading.
//!
//! Reads LMS reference tables from a directory of tab-separated files into a
//! [`growth_model::ReferenceStore`].

#![deny(unsafe_code)]

pub mod csv_utils;
pub mod error;
pub mod loaders;
pub mod paths;

pub use crate::error::{Result, StandardsError};
pub use crate::loaders::{
    ReferenceFile, discover_reference_files, load_all_reference_tables,
    load_default_reference_store, load_reference_store, load_reference_table, parse_gender_code,
};
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root, table_file_name};
