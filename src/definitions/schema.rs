//! Definition catalog: named ROM fields and the groups that hold them.
//!
//! Catalog documents are JSON objects. An object carrying an `address` key
//! is a leaf field; any other object is a group of further entries. That
//! distinction is made once, at load time, so the resolver only ever
//! branches on [`DefinitionNode`].

use crate::error::{EcuError, Result};
use crate::io::{IOLimits, SafeReader};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A single addressed field in the catalog.
///
/// Leaves are read leniently: a field of the wrong JSON type never fails
/// the catalog. It falls back to a value the resolver rejects for that
/// leaf alone, or to an empty/absent value for descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafDefinition {
    /// Hexadecimal offset into the image, without `0x` prefix
    #[serde(deserialize_with = "lenient_address")]
    pub address: String,
    /// Number of bytes the field occupies
    #[serde(rename = "bytes", default, deserialize_with = "lenient_usize")]
    pub byte_length: usize,
    /// Bit width hint for multi-bit values
    #[serde(
        rename = "bit",
        default,
        deserialize_with = "lenient_opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub bit_width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
    /// Multiplier applied to non-zero raw bytes for display
    #[serde(
        rename = "scalingFactor",
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub scaling_factor: Option<f64>,
}

impl LeafDefinition {
    pub fn new(address: impl Into<String>, byte_length: usize) -> Self {
        Self {
            address: address.into(),
            byte_length,
            bit_width: None,
            description: String::new(),
            notes: String::new(),
            scaling_factor: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_bit_width(mut self, bits: u32) -> Self {
        self.bit_width = Some(bits);
        self
    }

    pub fn with_scaling_factor(mut self, factor: f64) -> Self {
        self.scaling_factor = Some(factor);
        self
    }
}

/// Ordered mapping from key to node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionGroup {
    entries: Vec<(String, DefinitionNode)>,
}

impl DefinitionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, node: DefinitionNode) {
        self.entries.push((key.into(), node));
    }

    pub fn with_leaf(mut self, key: impl Into<String>, leaf: LeafDefinition) -> Self {
        self.push(key, DefinitionNode::Leaf(leaf));
        self
    }

    pub fn with_group(mut self, key: impl Into<String>, group: DefinitionGroup) -> Self {
        self.push(key, DefinitionNode::Group(group));
        self
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefinitionNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&DefinitionNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A catalog entry: either an addressed field or a group of entries.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionNode {
    Leaf(LeafDefinition),
    Group(DefinitionGroup),
}

impl DefinitionNode {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EcuError::Schema(format!("{path}: expected an object")))?;

        if object.contains_key("address") {
            let leaf = LeafDefinition::deserialize(value)
                .map_err(|e| EcuError::Schema(format!("{path}: {e}")))?;
            return Ok(DefinitionNode::Leaf(leaf));
        }

        let mut group = DefinitionGroup::new();
        for (key, child) in object {
            let child_path = format!("{path}.{key}");
            group.push(key.clone(), DefinitionNode::from_json(&child_path, child)?);
        }
        Ok(DefinitionNode::Group(group))
    }
}

/// The root of a definition catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionSchema {
    root: DefinitionGroup,
}

impl DefinitionSchema {
    pub fn new(root: DefinitionGroup) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &DefinitionGroup {
        &self.root
    }

    /// Top-level entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefinitionNode)> {
        self.root.iter()
    }

    /// Number of leaves reachable within one level of grouping.
    pub fn leaf_count(&self) -> usize {
        self.iter()
            .map(|(_, node)| match node {
                DefinitionNode::Leaf(_) => 1,
                DefinitionNode::Group(group) => group
                    .iter()
                    .filter(|(_, n)| matches!(n, DefinitionNode::Leaf(_)))
                    .count(),
            })
            .sum()
    }

    /// Build the tree from an already-parsed JSON document.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EcuError::Schema("catalog root must be an object".to_string()))?;

        let mut root = DefinitionGroup::new();
        for (key, node) in object {
            root.push(key.clone(), DefinitionNode::from_json(key, node)?);
        }
        debug!(entries = root.len(), "Definition catalog parsed");
        Ok(Self { root })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let mut reader = SafeReader::open(path, limits)?;
        let data = reader.read_all()?;
        let value: Value = serde_json::from_slice(&data)?;
        Self::from_json_value(&value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    /// Read any JSON value; anything but a number or a string is `None`.
    fn read<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Self>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(NumberOrText::deserialize(value).ok())
    }

    fn to_usize(&self) -> Option<usize> {
        match self {
            NumberOrText::Integer(n) => usize::try_from(*n).ok(),
            NumberOrText::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as usize),
            NumberOrText::Float(_) => None,
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Integer(n) => Some(*n as f64),
            NumberOrText::Float(f) => Some(*f),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

// A numeric address keeps its decimal digits, which the resolver then reads
// as hex (4096 names offset 0x4096). Other types become an empty address.
fn lenient_address<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match NumberOrText::read(deserializer)? {
        Some(NumberOrText::Text(s)) => s,
        Some(NumberOrText::Integer(n)) => n.to_string(),
        Some(NumberOrText::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

// Catalogs write counts both as numbers and as decimal strings. Values that
// cannot be read as a count become 0 and are rejected by the resolver for
// that field alone.
fn lenient_usize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<usize, D::Error> {
    let value = NumberOrText::read(deserializer)?;
    Ok(value.and_then(|v| v.to_usize()).unwrap_or(0))
}

fn lenient_opt_u32<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    let value = NumberOrText::read(deserializer)?;
    Ok(value
        .and_then(|v| v.to_usize())
        .and_then(|n| u32::try_from(n).ok()))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    let value = NumberOrText::read(deserializer)?;
    Ok(value.and_then(|v| v.to_f64()))
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
