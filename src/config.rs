//! Configuration for the analysis pass.
//!
//! Every knob has a default matching the layout of the supported ECU
//! images, so `AnalysisConfig::default()` is what callers normally want.
//! JSON documents may set any subset of fields.

use crate::error::Result;
use crate::io::{IOLimits, SafeReader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Byte value used to fill unused ROM space.
pub const PADDING_BYTE: u8 = 0xFF;

/// Size of one tune region; a 64KB image carries two.
pub const TUNE_SIZE: usize = 32 * 1024;

/// Master configuration for an analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sentinel byte treated as unused space.
    pub padding_byte: u8,
    /// Length of each tune region in bytes.
    pub tune_size: usize,
    /// Table detection tolerances.
    pub tables: TableScanConfig,
    /// Value interpretation thresholds.
    pub interpret: InterpretConfig,
    /// Limits for reading image and catalog files.
    pub io: IOLimits,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            padding_byte: PADDING_BYTE,
            tune_size: TUNE_SIZE,
            tables: TableScanConfig::default(),
            interpret: InterpretConfig::default(),
            io: IOLimits::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = SafeReader::open(path, IOLimits::default())?;
        let data = reader.read_all()?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// Table detection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableScanConfig {
    /// Width of one scan row in bytes.
    pub row_size: usize,
    /// Consecutive padding rows tolerated inside a table before it closes.
    pub max_padding_rows: usize,
    /// Candidates shorter than this are discarded.
    pub min_table_size: usize,
}

impl Default for TableScanConfig {
    fn default() -> Self {
        Self {
            row_size: 16,
            max_padding_rows: 2,
            min_table_size: 16,
        }
    }
}

/// Thresholds for turning raw definition bytes into display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpretConfig {
    /// Single-byte value meaning "enabled".
    pub enabled_byte: u8,
    /// Single-byte value meaning "disabled".
    pub disabled_byte: u8,
    /// Fields at least this long are shown as grids.
    pub grid_min_len: usize,
    /// Fields at least this long wrap at `wide_grid_columns`.
    pub wide_grid_len: usize,
    /// Column count for wide grids.
    pub wide_grid_columns: usize,
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self {
            enabled_byte: 0xFF,
            disabled_byte: 0x00,
            grid_min_len: 10,
            wide_grid_len: 100,
            wide_grid_columns: 10,
        }
    }
}
