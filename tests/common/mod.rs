//! Common test utilities and helpers.

#![allow(dead_code)]

pub mod test_utils;

use std::path::{Path, PathBuf};

/// Get the full path to a sample file
pub fn sample_file_path<P: AsRef<Path>>(relative_path: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(relative_path)
}

/// Common test data and constants
pub mod test_data {
    /// Sample catalog in the same shape as real ECU definition files
    pub const SAMPLE_DEFINITIONS: &str = "definitions/sample.json";

    pub const ROW: usize = 16;
    pub const KB32: usize = 32 * 1024;
    pub const KB64: usize = 64 * 1024;
}
