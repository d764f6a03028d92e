//! Reference directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "GROWTH_REFERENCE_DIR";

/// Get the reference data root directory.
///
/// Resolution order:
/// 1. `GROWTH_REFERENCE_DIR` environment variable
/// 2. `data/` directory relative to the workspace root
///
/// # Example
///
/// ```rust,ignore
/// let root = growth_standards::reference_root();
/// let weights = root.join("weight_british_1990.csv");
/// ```
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// File name of a reference table, e.g. `height_UK_WHO_preterm.csv`.
pub fn table_file_name(measurement: &str, dataset: &str) -> String {
    format!("{measurement}_{dataset}.csv")
}
