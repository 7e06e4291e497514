//! Errors raised while reading image and catalog files.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    /// The file could not be opened or its metadata read
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be memory-mapped
    #[error("cannot map {}: {source}", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {found} bytes, larger than the {limit} byte limit", path.display())]
    FileTooLarge { path: PathBuf, limit: u64, found: u64 },

    #[error(
        "reading {requested} more bytes from {} would pass the {limit} byte read budget \
         ({current} already read)",
        path.display()
    )]
    ReadLimitExceeded {
        path: PathBuf,
        limit: u64,
        current: u64,
        requested: u64,
    },
}

pub type Result<T> = std::result::Result<T, IoError>;
