//! Bounded file reading for ROM images and definition catalogs.
//!
//! `SafeReader` memory-maps the file read-only and enforces a maximum file
//! size and a total read budget, so a mistyped path pointing at a large
//! file never gets pulled into memory whole.

pub mod error;

use crate::io::error::{IoError, Result};
use bytes::Bytes;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Defines the resource limits for I/O operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOLimits {
    /// The absolute maximum file size that can be opened.
    pub max_file_size: u64,
    /// The maximum total number of bytes that can be read from the file across all operations.
    pub max_read_bytes: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self {
            max_file_size: 4 * 1024 * 1024, // 4MB
            max_read_bytes: 4 * 1024 * 1024,
        }
    }
}

/// A safe, bounded file reader that uses memory-mapping for efficient access.
pub struct SafeReader {
    path: PathBuf,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
    limits: IOLimits,
    bytes_read: u64,
    file_size: u64,
}

impl SafeReader {
    /// Opens a file, memory-maps it, and wraps it in a `SafeReader`.
    ///
    /// This function will fail if the file size exceeds `limits.max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source: std::io::Error| IoError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        let file_size = file.metadata().map_err(open_err)?.len();

        debug!(
            path = %path.display(),
            size = file_size,
            limits.max_file_size = limits.max_file_size,
            "Opening file for safe reading"
        );

        if file_size > limits.max_file_size {
            warn!(
                path = %path.display(),
                size = file_size,
                limit = limits.max_file_size,
                "File is too large"
            );
            return Err(IoError::FileTooLarge {
                path: path.to_path_buf(),
                limit: limits.max_file_size,
                found: file_size,
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: read-only map of a regular file; the mapping is dropped with the reader.
            let map = unsafe { Mmap::map(&file) }.map_err(|source| IoError::Map {
                path: path.to_path_buf(),
                source,
            })?;
            Some(map)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            limits,
            bytes_read: 0,
            file_size,
        })
    }

    /// Returns the total size of the underlying file in bytes.
    pub fn size(&self) -> u64 {
        self.file_size
    }

    /// Returns the total number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn limits(&self) -> &IOLimits {
        &self.limits
    }

    /// Reads a slice of the file at a given offset.
    ///
    /// Reads that run past EOF are truncated; a read starting at or past EOF
    /// returns an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns `IoError::ReadLimitExceeded` if the requested read would cause the
    /// total number of bytes read to exceed `limits.max_read_bytes`.
    pub fn read_at(&mut self, offset: u64, len: u64) -> Result<Bytes> {
        if self.bytes_read.saturating_add(len) > self.limits.max_read_bytes {
            warn!(
                path = %self.path.display(),
                current_read = self.bytes_read,
                requested = len,
                limit = self.limits.max_read_bytes,
                "Read limit exceeded"
            );
            return Err(IoError::ReadLimitExceeded {
                path: self.path.clone(),
                limit: self.limits.max_read_bytes,
                current: self.bytes_read,
                requested: len,
            });
        }

        let map = match &self.mmap {
            Some(m) => m,
            None => return Ok(Bytes::new()),
        };

        let offset = offset as usize;
        if offset >= map.len() {
            return Ok(Bytes::new());
        }
        let end = offset.saturating_add(len as usize).min(map.len());
        let out = Bytes::copy_from_slice(&map[offset..end]);
        self.bytes_read += out.len() as u64;

        trace!(
            path = %self.path.display(),
            offset = offset,
            len = out.len(),
            total_read = self.bytes_read,
            "Performed read"
        );

        Ok(out)
    }

    /// Reads the whole file, subject to the read budget.
    pub fn read_all(&mut self) -> Result<Bytes> {
        self.read_at(0, self.file_size)
    }
}
