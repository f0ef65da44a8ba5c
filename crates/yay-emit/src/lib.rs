//! yay-emit - Canonical YAY Serializer
//!
//! ============================================================================
//! EMISSION MODEL
//! ============================================================================
//!
//! The emitter walks a `Value` tree and produces text that parses back to a
//! structurally equal tree. One flag controls the layout:
//!
//! - `indent: true` (the default) renders composites in block form, two
//!   spaces per level, and terminates the document with a newline.
//! - `indent: false` renders everything inline on one line.
//!
//! Scalars are independent of the flag: integers in plain decimal, floats
//! as the shortest round-trip decimal (with `.0` appended when nothing
//! marks them as floats), strings in whichever quoting form needs the
//! least escaping, bytes as lowercase hex.
//!
//! BLOCK LAYOUT:
//! -------------
//! ```text
//! [1, [2]]        ->  - 1
//!                     - [2]          (nested arrays stay inline)
//!
//! [{a: 1, b: 2}]  ->  - a: 1
//!                       b: 2        (object rides the dash line)
//!
//! {a: {b: 1}}     ->  a:
//!                       b: 1
//! ```
//!
//! Since `Value` is a closed enum, every tree is serializable and emission
//! cannot fail.

use yay_util::Value;

mod string;

/// Options for [`emit`].
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    /// Use block form for composites. Defaults to true.
    pub indent: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent: true }
    }
}

/// Serializes a value tree to YAY text.
///
/// Block-form output (`indent: true`) ends with a single newline; inline
/// output does not.
pub fn emit(value: &Value, options: &EmitOptions) -> String {
    let mut out = format_value(value, 0, !options.indent);
    if options.indent {
        out.push('\n');
    }
    out
}

/// Formats one value at the given block depth.
fn format_value(value: &Value, depth: usize, inline: bool) -> String {
    let prefix = "  ".repeat(depth);

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Str(s) => string::quote_string(s),
        Value::Bytes(b) => format_bytes(b),

        Value::Array(items) => {
            if inline || items.is_empty() {
                let parts: Vec<String> =
                    items.iter().map(|item| format_value(item, 0, true)).collect();
                return format!("[{}]", parts.join(", "));
            }

            let mut lines: Vec<String> = Vec::new();
            for item in items {
                match item {
                    Value::Object(entries) if !entries.is_empty() => {
                        // The object's first pair rides the dash line; the
                        // rest keep their own deeper indentation.
                        let nested = format_value(item, depth + 1, false);
                        for (i, line) in nested.split('\n').enumerate() {
                            if i == 0 {
                                lines.push(format!("{}- {}", prefix, line.trim_start()));
                            } else {
                                lines.push(line.to_string());
                            }
                        }
                    }
                    _ => {
                        // Scalars and nested arrays render inline after the
                        // dash.
                        lines.push(format!("{}- {}", prefix, format_value(item, 0, true)));
                    }
                }
            }
            lines.join("\n")
        }

        Value::Object(entries) => {
            if inline || entries.is_empty() {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(key, v)| {
                        format!("{}: {}", string::quote_key(key), format_value(v, 0, true))
                    })
                    .collect();
                return format!("{{{}}}", parts.join(", "));
            }

            let mut lines: Vec<String> = Vec::new();
            for (key, v) in entries {
                let key_text = string::quote_key(key);
                match v {
                    Value::Object(nested) if !nested.is_empty() => {
                        lines.push(format!("{}{}:", prefix, key_text));
                        lines.push(format_value(v, depth + 1, false));
                    }
                    Value::Array(nested) if !nested.is_empty() => {
                        lines.push(format!("{}{}:", prefix, key_text));
                        lines.push(format_value(v, depth + 1, false));
                    }
                    _ => {
                        lines.push(format!(
                            "{}{}: {}",
                            prefix,
                            key_text,
                            format_value(v, 0, true)
                        ));
                    }
                }
            }
            lines.join("\n")
        }
    }
}

/// Formats a float as its shortest round-trip decimal, with the keyword
/// forms for the non-finite values and a `.0` guard so the result re-parses
/// as a float.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-infinity" } else { "infinity" }.to_string();
    }
    let mut s = f.to_string();
    if !s.contains('.') && !s.contains('e') {
        s.push_str(".0");
    }
    s
}

fn format_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 2);
    out.push('<');
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out.push('>');
    out
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use yay_util::value::Object;
    use yay_util::Value;

    use crate::{emit, EmitOptions};

    fn block(value: &Value) -> String {
        emit(value, &EmitOptions::default())
    }

    fn inline(value: &Value) -> String {
        emit(value, &EmitOptions { indent: false })
    }

    fn obj(entries: &[(&str, Value)]) -> Value {
        let mut map = Object::new();
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        Value::Object(map)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(block(&Value::Null), "null\n");
        assert_eq!(block(&Value::Bool(true)), "true\n");
        assert_eq!(block(&Value::Bool(false)), "false\n");
        assert_eq!(block(&Value::Int(BigInt::from(42))), "42\n");
        assert_eq!(block(&Value::Int(BigInt::from(-7))), "-7\n");
    }

    #[test]
    fn test_floats() {
        assert_eq!(block(&Value::Float(3.14)), "3.14\n");
        assert_eq!(block(&Value::Float(1.0)), "1.0\n");
        assert_eq!(block(&Value::Float(-0.5)), "-0.5\n");
        assert_eq!(block(&Value::Float(f64::INFINITY)), "infinity\n");
        assert_eq!(block(&Value::Float(f64::NEG_INFINITY)), "-infinity\n");
        assert_eq!(block(&Value::Float(f64::NAN)), "nan\n");
    }

    #[test]
    fn test_strings() {
        assert_eq!(block(&Value::from("hello")), "'hello'\n");
        assert_eq!(block(&Value::from("it's")), "\"it's\"\n");
        assert_eq!(block(&Value::from("line\nbreak")), "\"line\\nbreak\"\n");
        assert_eq!(block(&Value::from("")), "''\n");
    }

    #[test]
    fn test_string_with_both_quotes() {
        assert_eq!(block(&Value::from("a'b\"c")), "'a''b\"c'\n");
    }

    #[test]
    fn test_bytes() {
        assert_eq!(
            block(&Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])),
            "<deadbeef>\n"
        );
        assert_eq!(block(&Value::Bytes(Vec::new())), "<>\n");
    }

    #[test]
    fn test_empty_composites() {
        assert_eq!(block(&Value::Array(Vec::new())), "[]\n");
        assert_eq!(block(&obj(&[])), "{}\n");
    }

    #[test]
    fn test_block_array() {
        let v = Value::Array(vec![Value::from(1i64), Value::from(2i64)]);
        assert_eq!(block(&v), "- 1\n- 2\n");
    }

    #[test]
    fn test_inline_array() {
        let v = Value::Array(vec![Value::from(1i64), Value::from(2i64)]);
        assert_eq!(inline(&v), "[1, 2]");
    }

    #[test]
    fn test_nested_array_inline_after_dash() {
        let v = Value::Array(vec![
            Value::from(1i64),
            Value::Array(vec![Value::from(2i64), Value::from(3i64)]),
        ]);
        assert_eq!(block(&v), "- 1\n- [2, 3]\n");
    }

    #[test]
    fn test_array_of_objects_rides_dash_line() {
        let v = Value::Array(vec![obj(&[
            ("a", Value::from(1i64)),
            ("b", Value::from(2i64)),
        ])]);
        assert_eq!(block(&v), "- a: 1\n  b: 2\n");
    }

    #[test]
    fn test_block_object() {
        let v = obj(&[
            ("name", Value::from("Ada")),
            ("age", Value::from(36i64)),
        ]);
        assert_eq!(block(&v), "name: 'Ada'\nage: 36\n");
    }

    #[test]
    fn test_inline_object() {
        let v = obj(&[("a", Value::from(1i64)), ("b", Value::from(2i64))]);
        assert_eq!(inline(&v), "{a: 1, b: 2}");
    }

    #[test]
    fn test_nested_object_block() {
        let v = obj(&[("outer", obj(&[("inner", Value::from(1i64))]))]);
        assert_eq!(block(&v), "outer:\n  inner: 1\n");
    }

    #[test]
    fn test_object_with_array_value() {
        let v = obj(&[("xs", Value::Array(vec![Value::from(1i64), Value::from(2i64)]))]);
        assert_eq!(block(&v), "xs:\n  - 1\n  - 2\n");
    }

    #[test]
    fn test_escaped_string_property() {
        let v = obj(&[("greeting", Value::from("hi\n"))]);
        assert_eq!(block(&v), "greeting: \"hi\\n\"\n");
    }

    #[test]
    fn test_quoted_keys() {
        let v = obj(&[("two words", Value::from(1i64))]);
        assert_eq!(block(&v), "'two words': 1\n");
        let v = obj(&[("dash-key", Value::from(1i64))]);
        assert_eq!(block(&v), "'dash-key': 1\n");
        let v = obj(&[("9lives", Value::from(1i64))]);
        assert_eq!(block(&v), "'9lives': 1\n");
    }

    #[test]
    fn test_control_character_key_double_quoted() {
        let v = obj(&[("a\nb", Value::from(1i64))]);
        assert_eq!(block(&v), "\"a\\nb\": 1\n");
    }

    #[test]
    fn test_large_float_gets_float_marker() {
        let text = block(&Value::Float(1e30));
        assert!(text.ends_with(".0\n"));
    }

    #[test]
    fn test_deep_structure() {
        let v = obj(&[(
            "servers",
            Value::Array(vec![
                obj(&[("host", Value::from("a")), ("port", Value::from(1i64))]),
                obj(&[("host", Value::from("b")), ("port", Value::from(2i64))]),
            ]),
        )]);
        assert_eq!(
            block(&v),
            "servers:\n  - host: 'a'\n    port: 1\n  - host: 'b'\n    port: 2\n"
        );
    }

    #[test]
    fn test_emitted_text_reparses() {
        let v = obj(&[
            ("a", Value::Array(vec![Value::from(1i64), Value::Null])),
            ("b", obj(&[("c", Value::from("text"))])),
            ("d", Value::Bytes(vec![0x00, 0xff])),
        ]);
        let text = block(&v);
        assert_eq!(yay_par::parse_str(&text).unwrap(), v);
    }
}
