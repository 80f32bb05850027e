//! Tag data model — the recursive value tree fed to the encoder.
//!
//! Leaves carry their own formatting class (integer width, decimal kind,
//! string quoting) so the encoder never has to guess from a runtime type.

use serde::{Deserialize, Serialize};

use crate::errors::{CombinerError, Result};

// ────────────────────────────────────────────────────────────────────────────
// Leaf formatting classes
// ────────────────────────────────────────────────────────────────────────────

/// Bit-width class of an integral leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    Byte,
    Short,
    Int,
    Long,
}

impl IntWidth {
    pub fn name(self) -> &'static str {
        match self {
            IntWidth::Byte => "Byte",
            IntWidth::Short => "Short",
            IntWidth::Int => "Int",
            IntWidth::Long => "Long",
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            IntWidth::Byte => 8,
            IntWidth::Short => 16,
            IntWidth::Int => 32,
            IntWidth::Long => 64,
        }
    }

    pub fn min(self) -> i128 {
        -(1i128 << (self.bits() - 1))
    }

    pub fn max(self) -> i128 {
        (1i128 << (self.bits() - 1)) - 1
    }

    /// Literal suffix appended after the digits.
    pub fn suffix(self) -> &'static str {
        match self {
            IntWidth::Byte => "b",
            IntWidth::Short => "s",
            IntWidth::Int => "",
            IntWidth::Long => "L",
        }
    }

    /// Fails with `EncodingRange` if `value` lies outside this width's signed range.
    pub fn check(self, value: i128) -> Result<i128> {
        if value < self.min() || value > self.max() {
            return Err(CombinerError::EncodingRange {
                kind: self.name(),
                min: self.min(),
                max: self.max(),
                value,
            });
        }
        Ok(value)
    }
}

/// Precision class of a decimal leaf. Both render with six fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecimalKind {
    Float,
    Double,
}

impl DecimalKind {
    pub fn suffix(self) -> &'static str {
        match self {
            DecimalKind::Float => "f",
            DecimalKind::Double => "",
        }
    }
}

/// How a text leaf is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quoting {
    /// Written verbatim.
    Raw,
    /// Wrapped in quotes with escapes, see [`crate::nbt::quote`].
    Quoted,
}

// ────────────────────────────────────────────────────────────────────────────
// Tag
// ────────────────────────────────────────────────────────────────────────────

/// A node in the structured-data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Compound(Compound),
    List(Vec<Tag>),
    Text(String, Quoting),
    Integer(i128, IntWidth),
    Decimal(f64, DecimalKind),
    Boolean(bool),
    Null,
    /// Pre-formatted text passed through unchanged.
    Raw(String),
    /// An embedded JSON structure, serialized compactly and optionally quoted.
    Json(serde_json::Value, Quoting),
}

impl Tag {
    pub fn integer(value: i128, width: IntWidth) -> Result<Tag> {
        Ok(Tag::Integer(width.check(value)?, width))
    }

    pub fn byte(value: i128) -> Result<Tag> {
        Tag::integer(value, IntWidth::Byte)
    }

    pub fn short(value: i128) -> Result<Tag> {
        Tag::integer(value, IntWidth::Short)
    }

    pub fn int(value: i128) -> Result<Tag> {
        Tag::integer(value, IntWidth::Int)
    }

    pub fn long(value: i128) -> Result<Tag> {
        Tag::integer(value, IntWidth::Long)
    }

    pub fn float(value: f64) -> Tag {
        Tag::Decimal(value, DecimalKind::Float)
    }

    pub fn double(value: f64) -> Tag {
        Tag::Decimal(value, DecimalKind::Double)
    }

    /// Unquoted text leaf.
    pub fn text(value: impl Into<String>) -> Tag {
        Tag::Text(value.into(), Quoting::Raw)
    }

    /// Quoted text leaf.
    pub fn quoted(value: impl Into<String>) -> Tag {
        Tag::Text(value.into(), Quoting::Quoted)
    }

    pub fn raw(value: impl Into<String>) -> Tag {
        Tag::Raw(value.into())
    }

    /// JSON text component; `as_string` wraps the serialized JSON in quotes.
    pub fn json(value: serde_json::Value, as_string: bool) -> Tag {
        let quoting = if as_string {
            Quoting::Quoted
        } else {
            Quoting::Raw
        };
        Tag::Json(value, quoting)
    }
}

impl From<Compound> for Tag {
    fn from(value: Compound) -> Self {
        Tag::Compound(value)
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(value: Vec<Tag>) -> Self {
        Tag::List(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::text(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::text(value)
    }
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Boolean(value)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Integer(value.into(), IntWidth::Int)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compound
// ────────────────────────────────────────────────────────────────────────────

/// Insertion-ordered map with unique keys.
///
/// Re-inserting an existing key replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Compound::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Tag>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (k, v) in iter {
            compound.insert(k, v);
        }
        compound
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
