//! Shared builders for synthetic ROM images and on-disk fixtures.

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// A fully padded image of `len` bytes.
pub fn blank_image(len: usize) -> Vec<u8> {
    vec![0xFF; len]
}

/// Fill `[start, end)` with `value`.
pub fn fill(data: &mut [u8], start: usize, end: usize, value: u8) {
    data[start..end].fill(value);
}

/// Build a buffer from a row pattern: `true` = data row, `false` = padding row.
pub fn row_pattern(pattern: &[bool], row: usize) -> Vec<u8> {
    pattern
        .iter()
        .flat_map(|&data| std::iter::repeat(if data { 0x5A } else { 0xFF }).take(row))
        .collect()
}

/// Creates a temporary file with the given content and extension.
///
/// # Panics
///
/// Panics if the temporary file cannot be created or written.
pub fn create_temp_file(content: &[u8], extension: &str) -> NamedTempFile {
    let mut temp_file = Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}
