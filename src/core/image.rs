//! Size-validated ROM images and their tune layout.

use crate::core::region::Region;
use crate::error::{EcuError, Result};
use crate::io::{IOLimits, SafeReader};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// File extensions accepted for ROM dumps.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["bin", "rom"];

/// Supported image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomSize {
    /// 32KB image holding a single tune
    Kb32,
    /// 64KB image holding two tunes
    Kb64,
}

impl RomSize {
    pub const fn bytes(self) -> usize {
        match self {
            RomSize::Kb32 => 32 * 1024,
            RomSize::Kb64 => 64 * 1024,
        }
    }

    /// Classify a buffer length; anything but 32KB or 64KB is rejected.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            0x8000 => Ok(RomSize::Kb32),
            0x10000 => Ok(RomSize::Kb64),
            found => Err(EcuError::InvalidImageSize { found }),
        }
    }
}

impl fmt::Display for RomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomSize::Kb32 => write!(f, "32KB"),
            RomSize::Kb64 => write!(f, "64KB"),
        }
    }
}

/// An immutable ROM dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    data: Bytes,
    size: RomSize,
}

impl RomImage {
    /// Wrap raw bytes, validating the image size.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let size = RomSize::from_len(data.len())?;
        Ok(Self { data, size })
    }

    /// Read a `.bin`/`.rom` file through the bounded reader.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(EcuError::UnsupportedExtension(extension));
        }

        let mut reader = SafeReader::open(path, limits)?;
        debug!(path = %path.display(), size = reader.size(), "Loading ROM image");
        let image = Self::from_bytes(reader.read_all()?)?;
        info!(path = %path.display(), size = %image.size, "ROM image loaded");
        Ok(image)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size(&self) -> RomSize {
        self.size
    }

    /// Split the image into consecutive tune regions of `tune_size` bytes.
    ///
    /// With the default 32KB tune size a 32KB image yields one region and a
    /// 64KB image yields `[0x0000, 0x8000)` and `[0x8000, 0x10000)`. A zero
    /// tune size is treated as one region spanning the whole image.
    pub fn tune_regions(&self, tune_size: usize) -> Vec<Region> {
        let len = self.len();
        if tune_size == 0 {
            return vec![Region { start: 0, end: len }];
        }
        (0..len)
            .step_by(tune_size)
            .map(|start| Region {
                start,
                end: (start + tune_size).min(len),
            })
            .collect()
    }
}

impl AsRef<[u8]> for RomImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
