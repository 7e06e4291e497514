//! Byte-level scans over a ROM image.
//!
//! Both scans are pure reads over a borrowed buffer:
//! - [`space`]: used versus padded bytes in a region, found by scanning
//!   backward for the last non-padding byte.
//! - [`tables`]: contiguous blocks of non-padding 16-byte rows, tolerating
//!   short padding gaps inside a block.

pub mod space;
pub mod tables;

pub use space::{analyze_space, analyze_space_with, SpaceUsage};
pub use tables::{find_tables, find_tables_with, TableCandidate};
