//! Core data types shared by the analysis components.
//!
//! - [`region::Region`]: half-open byte range inside an image.
//! - [`image::RomImage`]: owned, size-validated ROM dump with its tune layout.

pub mod image;
pub mod region;

pub use image::{RomImage, RomSize};
pub use region::Region;
