//! Conversion from untyped JSON values into tags.
//!
//! Integral numbers become 32-bit `Int` leaves and fractional numbers become
//! `Float` leaves, matching how an untyped value would be written by hand.

use serde_json::Value;

use crate::errors::Result;
use crate::nbt::tag::{Compound, IntWidth, Quoting, Tag};

/// Builds a tag tree from a JSON value. Strings take the given quoting mode.
pub fn from_json(value: &Value, quoting: Quoting) -> Result<Tag> {
    Ok(match value {
        Value::Null => Tag::Null,
        Value::Bool(b) => Tag::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Tag::integer(i.into(), IntWidth::Int)?
            } else if let Some(u) = n.as_u64() {
                Tag::integer(u.into(), IntWidth::Int)?
            } else {
                Tag::float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Tag::Text(s.clone(), quoting),
        Value::Array(items) => Tag::List(
            items
                .iter()
                .map(|item| from_json(item, quoting))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(map) => {
            let mut compound = Compound::new();
            for (k, v) in map {
                compound.insert(k.as_str(), from_json(v, quoting)?);
            }
            Tag::Compound(compound)
        }
    })
}
