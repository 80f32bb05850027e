//! Tag encoder — renders a [`Tag`] tree as compact text.
//!
//! - Compound: `{k1:v1,k2:v2}`, empty `{}`; keys are written verbatim.
//! - List: `[v1,v2]`, empty `[]`.
//! - Integer: digits plus width suffix (`b`, `s`, none, `L`).
//! - Decimal: exactly six fractional digits plus kind suffix (`f`, none).
//! - Boolean: `true` / `false`; Null: `null`.

use crate::errors::{CombinerError, Result};
use crate::nbt::quote::quote;
use crate::nbt::tag::{Quoting, Tag};

/// Encodes a tag into a new string.
pub fn encode(tag: &Tag) -> Result<String> {
    let mut out = String::new();
    encode_into(tag, &mut out)?;
    Ok(out)
}

/// Length in characters of `encode(tag)`.
pub fn encoded_len(tag: &Tag) -> Result<usize> {
    Ok(encode(tag)?.chars().count())
}

/// Appends the encoding of `tag` to `out`.
pub fn encode_into(tag: &Tag, out: &mut String) -> Result<()> {
    match tag {
        Tag::Compound(compound) => {
            out.push('{');
            for (i, (key, value)) in compound.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(key);
                out.push(':');
                encode_into(value, out)?;
            }
            out.push('}');
        }

        Tag::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_into(item, out)?;
            }
            out.push(']');
        }

        Tag::Text(text, quoting) => write_text(text, *quoting, out),

        Tag::Integer(value, width) => {
            let value = width.check(*value)?;
            out.push_str(&value.to_string());
            out.push_str(width.suffix());
        }

        Tag::Decimal(value, kind) => {
            if !value.is_finite() {
                return Err(CombinerError::UnsupportedType {
                    value: value.to_string(),
                    type_name: "non-finite f64",
                });
            }
            out.push_str(&format!("{value:.6}"));
            out.push_str(kind.suffix());
        }

        Tag::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),

        Tag::Null => out.push_str("null"),

        Tag::Raw(text) => out.push_str(text),

        Tag::Json(value, quoting) => write_text(&value.to_string(), *quoting, out),
    }
    Ok(())
}

fn write_text(text: &str, quoting: Quoting, out: &mut String) {
    match quoting {
        Quoting::Raw => out.push_str(text),
        Quoting::Quoted => out.push_str(&quote(text)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt::tag::{Compound, DecimalKind, IntWidth};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn enc(tag: &Tag) -> String {
        encode(tag).expect("encodes")
    }

    // ── containers ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_containers() {
        assert_eq!(enc(&Tag::Compound(Compound::new())), "{}");
        assert_eq!(enc(&Tag::List(vec![])), "[]");
    }

    #[test]
    fn test_compound_keeps_key_order() {
        let tag = Tag::from(
            Compound::new()
                .with("id", "falling_block")
                .with("Time", 1)
                .with("BlockState", Compound::new().with("Name", "stone")),
        );
        assert_eq!(
            enc(&tag),
            "{id:falling_block,Time:1,BlockState:{Name:stone}}"
        );
    }

    #[test]
    fn test_nested_list() {
        let tag = Tag::List(vec![
            Tag::from(1),
            Tag::List(vec![Tag::Boolean(true), Tag::Null]),
            Tag::quoted("a"),
        ]);
        assert_eq!(enc(&tag), "[1,[true,null],'a']");
    }

    #[test]
    fn test_brackets_balanced() {
        let tag = Tag::from(
            Compound::new()
                .with("a", Tag::List(vec![Tag::from(Compound::new().with("b", 2))]))
                .with("c", Tag::List(vec![])),
        );
        let text = enc(&tag);
        assert_eq!(text.matches('{').count(), text.matches('}').count());
        assert_eq!(text.matches('[').count(), text.matches(']').count());
    }

    proptest! {
        #[test]
        fn prop_compound_keeps_order_and_balances(
            entries in proptest::collection::vec(
                ("[a-zA-Z]{1,8}", proptest::collection::vec(any::<i32>(), 0..4)),
                1..12,
            ),
        ) {
            let compound: Compound = entries
                .iter()
                .enumerate()
                .map(|(i, (key, values))| {
                    let list = values.iter().copied().map(Tag::from).collect::<Vec<_>>();
                    (format!("{key}_{i}"), Tag::List(list))
                })
                .collect();
            let text = enc(&Tag::from(compound));

            let fields: Vec<String> = entries
                .iter()
                .enumerate()
                .map(|(i, (key, values))| {
                    let items: Vec<String> = values.iter().map(i32::to_string).collect();
                    format!("{key}_{i}:[{}]", items.join(","))
                })
                .collect();
            prop_assert_eq!(&text, &format!("{{{}}}", fields.join(",")));
            prop_assert_eq!(text.matches('{').count(), text.matches('}').count());
            prop_assert_eq!(text.matches('[').count(), text.matches(']').count());
        }
    }

    // ── integers ────────────────────────────────────────────────────────────

    #[test]
    fn test_byte_127_encodes_with_suffix() {
        assert_eq!(enc(&Tag::byte(127).unwrap()), "127b");
    }

    #[test]
    fn test_integer_suffixes() {
        assert_eq!(enc(&Tag::short(-5).unwrap()), "-5s");
        assert_eq!(enc(&Tag::int(42).unwrap()), "42");
        assert_eq!(enc(&Tag::long(1 << 40).unwrap()), "1099511627776L");
    }

    #[test]
    fn test_out_of_range_byte_fails_at_encode() {
        let err = encode(&Tag::Integer(128, IntWidth::Byte)).unwrap_err();
        assert!(matches!(err, CombinerError::EncodingRange { value: 128, .. }));
        assert!(err.to_string().contains("127"));
    }

    // ── decimals ────────────────────────────────────────────────────────────

    #[test]
    fn test_double_has_six_digits() {
        assert_eq!(enc(&Tag::double(1.5)), "1.500000");
    }

    #[test]
    fn test_float_has_suffix() {
        assert_eq!(enc(&Tag::float(1.5)), "1.500000f");
        assert_eq!(enc(&Tag::Decimal(-0.25, DecimalKind::Float)), "-0.250000f");
    }

    #[test]
    fn test_non_finite_decimal_is_unsupported() {
        let err = encode(&Tag::double(f64::NAN)).unwrap_err();
        assert!(matches!(err, CombinerError::UnsupportedType { .. }));
        assert!(encode(&Tag::float(f64::INFINITY)).is_err());
    }

    // ── text ────────────────────────────────────────────────────────────────

    #[test]
    fn test_text_quoting_modes() {
        assert_eq!(enc(&Tag::text("say hi")), "say hi");
        assert_eq!(enc(&Tag::quoted("say hi")), "'say hi'");
        assert_eq!(enc(&Tag::raw("{already:1b}")), "{already:1b}");
    }

    #[test]
    fn test_json_component() {
        let value = json!({"text": "hi", "bold": true});
        assert_eq!(enc(&Tag::json(value.clone(), false)), r#"{"bold":true,"text":"hi"}"#);
        assert_eq!(enc(&Tag::json(value, true)), r#"'{"bold":true,"text":"hi"}'"#);
    }

    #[test]
    fn test_encoded_len_counts_chars() {
        assert_eq!(encoded_len(&Tag::quoted("café")).unwrap(), 6);
    }
}
