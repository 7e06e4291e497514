//! Detection of contiguous table regions.
//!
//! The image is read as fixed-width rows (16 bytes by default). A row made
//! only of padding bytes is a padding row. A table opens at the first
//! non-padding row and stays open across at most `max_padding_rows`
//! consecutive padding rows; one more padding row closes it at the start of
//! the padding run.
//!
//! The column count is taken from the first row of a table (its count of
//! non-padding bytes) and never revised, so later rows with a different
//! shape are not reflected in it.

use crate::config::{TableScanConfig, PADDING_BYTE};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A contiguous run of non-padding rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCandidate {
    /// Offset of the first row (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Non-padding bytes in the table's first row
    pub column_count: usize,
}

impl TableCandidate {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Number of rows spanned, counting a trailing short row.
    pub fn row_count(&self, row_size: usize) -> usize {
        self.len().div_ceil(row_size.max(1))
    }

    /// Grid view of the table: one row per `row_size` step, `column_count`
    /// cells read from each row start, `None` for cells past the buffer end.
    pub fn rows(&self, buffer: &[u8], row_size: usize) -> Vec<Vec<Option<u8>>> {
        (self.start..self.end)
            .step_by(row_size.max(1))
            .map(|row_start| {
                (0..self.column_count)
                    .map(|col| buffer.get(row_start + col).copied())
                    .collect()
            })
            .collect()
    }
}

/// Find tables using the default 16-byte rows, a 2-row padding tolerance and
/// `0xFF` padding.
pub fn find_tables(buffer: &[u8]) -> Vec<TableCandidate> {
    find_tables_with(buffer, &TableScanConfig::default(), PADDING_BYTE)
}

/// Find tables with explicit tolerances.
///
/// Candidates are returned in ascending `start` order, never overlap and are
/// never shorter than `cfg.min_table_size`.
pub fn find_tables_with(
    buffer: &[u8],
    cfg: &TableScanConfig,
    padding_byte: u8,
) -> Vec<TableCandidate> {
    let row_size = cfg.row_size.max(1);
    let mut tables = Vec::new();
    // (start, column_count) of the table being built
    let mut open: Option<(usize, usize)> = None;
    let mut padding_run = 0usize;

    for (index, row) in buffer.chunks(row_size).enumerate() {
        let offset = index * row_size;
        let used = row.iter().filter(|&&b| b != padding_byte).count();

        if used == 0 {
            padding_run += 1;
            if padding_run > cfg.max_padding_rows {
                if let Some((start, column_count)) = open.take() {
                    let end = offset - cfg.max_padding_rows * row_size;
                    debug!(start, end, column_count, "Table closed by padding run");
                    tables.push(TableCandidate {
                        start,
                        end,
                        column_count,
                    });
                }
            }
        } else {
            padding_run = 0;
            if open.is_none() {
                trace!(offset, columns = used, "Table opened");
                open = Some((offset, used));
            }
        }
    }

    if let Some((start, column_count)) = open {
        debug!(start, end = buffer.len(), column_count, "Table closed at end of buffer");
        tables.push(TableCandidate {
            start,
            end: buffer.len(),
            column_count,
        });
    }

    tables.retain(|t| t.len() >= cfg.min_table_size);
    tables
}
