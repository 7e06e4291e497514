//! Half-open byte ranges within a ROM image.

use crate::error::{EcuError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open `[start, end)` byte range.
///
/// Regions are plain offsets and are not tied to a particular buffer;
/// [`Region::within`] additionally checks that the range fits a buffer of
/// a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RegionBounds")]
pub struct Region {
    /// First byte of the range (inclusive)
    pub start: usize,
    /// One past the last byte of the range (exclusive)
    pub end: usize,
}

impl Region {
    /// Create a region, rejecting `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(EcuError::InvalidRegion {
                start,
                end,
                len: end,
            });
        }
        Ok(Self { start, end })
    }

    /// Create a region that must lie inside a buffer of `len` bytes.
    pub fn within(start: usize, end: usize, len: usize) -> Result<Self> {
        if start > end || end > len {
            return Err(EcuError::InvalidRegion { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// Number of bytes covered by the region.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

#[derive(Deserialize)]
struct RegionBounds {
    start: usize,
    end: usize,
}

impl TryFrom<RegionBounds> for Region {
    type Error = EcuError;

    fn try_from(bounds: RegionBounds) -> Result<Self> {
        Region::new(bounds.start, bounds.end)
    }
}

impl fmt::Display for Region {
    /// Formats the inclusive byte span, e.g. `0x8000 - 0xFFFF`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "0x{:04X} (empty)", self.start)
        } else {
            write!(f, "0x{:04X} - 0x{:04X}", self.start, self.end - 1)
        }
    }
}
