//! Used and leftover space inside a tune region.

use crate::config::PADDING_BYTE;
use crate::core::region::Region;
use serde::{Deserialize, Serialize};

/// Space accounting for one region.
///
/// `used_bytes + leftover_bytes` always equals the region length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceUsage {
    /// Bytes from the region start up to and including the last non-padding byte
    pub used_bytes: usize,
    /// Trailing padding bytes
    pub leftover_bytes: usize,
}

impl SpaceUsage {
    pub fn total(&self) -> usize {
        self.used_bytes + self.leftover_bytes
    }

    /// Share of the region in use, in percent. Zero for an empty region.
    pub fn used_percent(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.used_bytes as f64 * 100.0 / total as f64,
        }
    }
}

/// Measure used space in `region` with the standard `0xFF` padding byte.
pub fn analyze_space(buffer: &[u8], region: Region) -> SpaceUsage {
    analyze_space_with(buffer, region, PADDING_BYTE)
}

/// Measure used space in `region`, treating `padding_byte` as unused.
///
/// Positions of the region that lie past the end of `buffer` hold no data
/// and count as leftover space.
pub fn analyze_space_with(buffer: &[u8], region: Region, padding_byte: u8) -> SpaceUsage {
    let scan_end = region.end.min(buffer.len());
    let window = buffer.get(region.start..scan_end).unwrap_or(&[]);

    let used_bytes = window
        .iter()
        .rposition(|&b| b != padding_byte)
        .map_or(0, |last_used| last_used + 1);

    SpaceUsage {
        used_bytes,
        leftover_bytes: region.len() - used_bytes,
    }
}
