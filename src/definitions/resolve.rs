//! Resolution of catalog fields against image bytes.

use crate::definitions::schema::{DefinitionNode, DefinitionSchema, LeafDefinition};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

/// Separator between a group key and a field key in a route.
pub const ROUTE_SEPARATOR: char = ':';

/// Longest field accepted; no supported image is larger than 64KB.
pub const MAX_FIELD_LENGTH: usize = 64 * 1024;

/// A catalog field paired with the bytes found at its address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDefinition {
    /// `key` for top-level fields, `group:key` for grouped fields
    pub route: String,
    /// Address string as written in the catalog
    pub address: String,
    /// Parsed address
    pub offset: usize,
    /// Bytes at `offset`; shorter than `byte_length` when the field runs past the image end
    #[serde(serialize_with = "serialize_hex")]
    pub raw_bytes: Vec<u8>,
    pub fields: LeafDefinition,
}

impl ResolvedDefinition {
    pub fn byte_length(&self) -> usize {
        self.fields.byte_length
    }

    pub fn is_truncated(&self) -> bool {
        self.raw_bytes.len() < self.fields.byte_length
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

/// Why a catalog field produced no resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticReason {
    /// Address is not a hexadecimal number
    InvalidAddress,
    /// Byte length is missing, below 1, or longer than any image
    InvalidByteLength,
    /// Group nested inside a group; only one level of grouping is read
    NestedGroup,
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticReason::InvalidAddress => write!(f, "invalid address"),
            DiagnosticReason::InvalidByteLength => write!(f, "invalid byte length"),
            DiagnosticReason::NestedGroup => write!(f, "nested group not supported"),
        }
    }
}

/// A skipped catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveDiagnostic {
    pub route: String,
    pub reason: DiagnosticReason,
}

impl fmt::Display for ResolveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.route, self.reason)
    }
}

/// Resolved records and diagnostics for skipped entries, both in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub definitions: Vec<ResolvedDefinition>,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

/// Parse a catalog address: hexadecimal, case-insensitive, optional `0x`.
pub fn parse_address(address: &str) -> Option<usize> {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    usize::from_str_radix(digits, 16).ok()
}

/// Resolve every field in catalog order. Malformed fields are skipped and
/// logged; use [`resolve_with_diagnostics`] to collect them.
pub fn resolve(buffer: &[u8], schema: &DefinitionSchema) -> Vec<ResolvedDefinition> {
    resolve_with_diagnostics(buffer, schema).definitions
}

/// Resolve every field in catalog order, reporting skipped entries.
///
/// Top-level fields use their key as route; fields inside a group use
/// `group:key`. Groups nested deeper than one level are not descended into.
pub fn resolve_with_diagnostics(buffer: &[u8], schema: &DefinitionSchema) -> Resolution {
    let mut resolution = Resolution::default();

    for (key, node) in schema.iter() {
        match node {
            DefinitionNode::Leaf(leaf) => {
                resolve_leaf(buffer, key.to_string(), leaf, &mut resolution)
            }
            DefinitionNode::Group(group) => {
                for (sub_key, sub_node) in group.iter() {
                    let route = format!("{key}{ROUTE_SEPARATOR}{sub_key}");
                    match sub_node {
                        DefinitionNode::Leaf(leaf) => {
                            resolve_leaf(buffer, route, leaf, &mut resolution)
                        }
                        DefinitionNode::Group(_) => {
                            skip(&mut resolution, route, DiagnosticReason::NestedGroup)
                        }
                    }
                }
            }
        }
    }

    debug!(
        resolved = resolution.definitions.len(),
        skipped = resolution.diagnostics.len(),
        "Definitions resolved"
    );
    resolution
}

fn resolve_leaf(buffer: &[u8], route: String, leaf: &LeafDefinition, out: &mut Resolution) {
    let Some(offset) = parse_address(&leaf.address) else {
        return skip(out, route, DiagnosticReason::InvalidAddress);
    };
    if leaf.byte_length < 1 || leaf.byte_length > MAX_FIELD_LENGTH {
        return skip(out, route, DiagnosticReason::InvalidByteLength);
    }

    let end = offset.saturating_add(leaf.byte_length).min(buffer.len());
    let raw_bytes = buffer.get(offset..end).unwrap_or(&[]).to_vec();
    if raw_bytes.len() < leaf.byte_length {
        warn!(
            route = %route,
            offset,
            expected = leaf.byte_length,
            found = raw_bytes.len(),
            "Field extends past end of image"
        );
    }

    out.definitions.push(ResolvedDefinition {
        route,
        address: leaf.address.clone(),
        offset,
        raw_bytes,
        fields: leaf.clone(),
    });
}

fn skip(out: &mut Resolution, route: String, reason: DiagnosticReason) {
    warn!(route = %route, %reason, "Skipping definition");
    out.diagnostics.push(ResolveDiagnostic { route, reason });
}
