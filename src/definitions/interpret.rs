//! Turning resolved field bytes into typed values.
//!
//! The field length picks one of three readings:
//! - one byte: an on/off flag when it holds the enabled or disabled marker,
//!   otherwise a plain byte;
//! - ten bytes or more: a byte grid, ten columns wide from one hundred bytes on;
//! - anything else: one value per byte, scaled when the field carries a
//!   scaling factor and the byte is non-zero.

use crate::config::InterpretConfig;
use crate::definitions::resolve::ResolvedDefinition;
use serde::Serialize;
use std::fmt;

/// A display value derived from raw bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterpretedValue {
    Flag { enabled: bool },
    RawByte { value: u8 },
    ScaledValue { raw: u8, scaled: f64 },
    /// Rows of `columns` cells; `None` marks a position with no byte in the image
    ByteGrid {
        columns: usize,
        rows: Vec<Vec<Option<u8>>>,
    },
}

impl InterpretedValue {
    /// Count of grid cells with no backing byte.
    pub fn missing_cells(&self) -> usize {
        match self {
            InterpretedValue::ByteGrid { rows, .. } => {
                rows.iter().flatten().filter(|cell| cell.is_none()).count()
            }
            _ => 0,
        }
    }
}

impl fmt::Display for InterpretedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretedValue::Flag { enabled: true } => write!(f, "Enabled"),
            InterpretedValue::Flag { enabled: false } => write!(f, "Disabled"),
            InterpretedValue::RawByte { value } => write!(f, "0x{value:02X} ({value})"),
            InterpretedValue::ScaledValue { raw, scaled } => {
                write!(f, "0x{raw:02X} ({raw}) = {scaled}")
            }
            InterpretedValue::ByteGrid { rows, .. } => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    for (j, cell) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, " ")?;
                        }
                        match cell {
                            Some(b) => write!(f, "{b:3}")?,
                            None => write!(f, " --")?,
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// One per-byte value of a short field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    /// Absolute image offset of the byte
    pub address: usize,
    pub value: InterpretedValue,
}

/// Result of interpreting a resolved field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Interpretation {
    Value(InterpretedValue),
    Series(Vec<SeriesEntry>),
    /// Single-byte field whose address lies past the end of the image
    Absent,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpretation::Value(value) => write!(f, "{value}"),
            Interpretation::Absent => write!(f, "(no data)"),
            Interpretation::Series(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "0x{:04X}: {}", entry.address, entry.value)?;
                }
                Ok(())
            }
        }
    }
}

/// Interpret with the default thresholds.
pub fn interpret(resolved: &ResolvedDefinition) -> Interpretation {
    interpret_with(resolved, &InterpretConfig::default())
}

pub fn interpret_with(resolved: &ResolvedDefinition, cfg: &InterpretConfig) -> Interpretation {
    let byte_length = resolved.byte_length();
    let raw = resolved.raw_bytes.as_slice();

    if byte_length == 1 {
        return match raw.first() {
            None => Interpretation::Absent,
            Some(&b) if b == cfg.enabled_byte => {
                Interpretation::Value(InterpretedValue::Flag { enabled: true })
            }
            Some(&b) if b == cfg.disabled_byte => {
                Interpretation::Value(InterpretedValue::Flag { enabled: false })
            }
            Some(&value) => Interpretation::Value(InterpretedValue::RawByte { value }),
        };
    }

    if byte_length >= cfg.grid_min_len {
        let columns = if byte_length >= cfg.wide_grid_len {
            cfg.wide_grid_columns
        } else {
            byte_length
        };
        return Interpretation::Value(byte_grid(raw, byte_length, columns.max(1)));
    }

    // Zero or non-finite factors never scale
    let factor = resolved
        .fields
        .scaling_factor
        .filter(|f| f.is_finite() && *f != 0.0);
    let entries = raw
        .iter()
        .enumerate()
        .map(|(i, &byte)| SeriesEntry {
            address: resolved.offset + i,
            value: match factor {
                Some(factor) if byte != 0 => InterpretedValue::ScaledValue {
                    raw: byte,
                    scaled: round_half_up(byte as f64 * factor),
                },
                _ => InterpretedValue::RawByte { value: byte },
            },
        })
        .collect();
    Interpretation::Series(entries)
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Lay out `byte_length` positions (or more, if more bytes are present) as
/// full rows of `columns` cells.
fn byte_grid(raw: &[u8], byte_length: usize, columns: usize) -> InterpretedValue {
    let positions = byte_length.max(raw.len());
    let rows = (0..positions.div_ceil(columns))
        .map(|row| {
            (0..columns)
                .map(|col| raw.get(row * columns + col).copied())
                .collect()
        })
        .collect();
    InterpretedValue::ByteGrid { columns, rows }
}
