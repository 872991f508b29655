use log::debug;

use crate::error::EncodeError;
use crate::value::{Map, Value};

/// Output settings for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// One element per line, indented by `indent` spaces per level
    pub pretty: bool,
    pub indent: usize,
    /// Emit object keys in lexicographic order instead of insertion order
    pub sort_keys: bool,
    /// Write `/` as `\/`
    pub escape_slash: bool,
}

impl EncodeOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn escape_slash(mut self, escape_slash: bool) -> Self {
        self.escape_slash = escape_slash;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            sort_keys: false,
            escape_slash: true,
        }
    }
}

/// Serialize `value` to JSON text.
///
/// Fails only for numbers without a JSON form (NaN and the infinities).
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    debug!("encoding {} with {:?}", value.type_name(), options);
    let mut serializer = Serializer {
        options,
        output: String::new(),
    };
    serializer.write_value(value, 0)?;
    debug!("encoded {} bytes", serializer.output.len());
    Ok(serializer.output)
}

/// Whether [`encode`] would succeed for `value`.
pub fn is_encodable(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_finite(),
        Value::Array(items) => items.iter().all(is_encodable),
        Value::Object(map) => map.values().all(is_encodable),
        Value::Null | Value::Bool(_) | Value::String(_) => true,
    }
}

/// Integral values print as plain digits with no decimal point (`2.0` -> `2`,
/// `1e21` -> `1000000000000000000000`). Fractions use the shortest round-trip
/// form, switching to exponent notation below `1e-6`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else if n.abs() < 1e-6 {
        format!("{n:e}")
    } else {
        format!("{n}")
    }
}

struct Serializer<'a> {
    options: &'a EncodeOptions,
    output: String,
}

impl Serializer<'_> {
    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(true) => self.output.push_str("true"),
            Value::Bool(false) => self.output.push_str("false"),
            Value::Number(n) => {
                if !n.is_finite() {
                    return Err(EncodeError::UnsupportedType(format!("number {n}")));
                }
                self.output.push_str(&format_number(*n));
            }
            Value::String(s) => self.write_string(s),
            Value::Array(items) => self.write_array(items, depth)?,
            Value::Object(map) => self.write_object(map, depth)?,
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '/' if self.options.escape_slash => self.output.push_str("\\/"),
                '\u{8}' => self.output.push_str("\\b"),
                '\u{c}' => self.output.push_str("\\f"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c < '\u{20}' => self.output.push_str(&format!("\\u{:04x}", c as u32)),
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), EncodeError> {
        if items.is_empty() {
            self.output.push_str("[]");
            return Ok(());
        }

        self.output.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(depth + 1);
            self.write_value(item, depth + 1)?;
        }
        self.newline(depth);
        self.output.push(']');
        Ok(())
    }

    fn write_object(&mut self, map: &Map, depth: usize) -> Result<(), EncodeError> {
        if map.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }

        let mut entries: Vec<_> = map.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }

        self.output.push('{');
        for (i, (key, item)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(depth + 1);
            self.write_string(key);
            self.output.push(':');
            if self.options.pretty {
                self.output.push(' ');
            }
            self.write_value(item, depth + 1)?;
        }
        self.newline(depth);
        self.output.push('}');
        Ok(())
    }

    fn newline(&mut self, depth: usize) {
        if self.options.pretty {
            self.output.push('\n');
            self.output.push_str(&" ".repeat(self.options.indent * depth));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn compact(value: &Value) -> String {
        encode(value, &EncodeOptions::default()).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(compact(&Value::Null), "null");
        assert_eq!(compact(&Value::Bool(true)), "true");
        assert_eq!(compact(&Value::Bool(false)), "false");
    }

    #[test_case(2.0, "2" ; "integral")]
    #[test_case(-2.0, "-2" ; "negative integral")]
    #[test_case(0.0, "0" ; "zero")]
    #[test_case(16.0, "16" ; "two digits")]
    #[test_case(1.5, "1.5" ; "fraction")]
    #[test_case(0.1, "0.1" ; "shortest round trip")]
    #[test_case(-123.456, "-123.456" ; "negative fraction")]
    #[test_case(1e20, "100000000000000000000" ; "large integral")]
    #[test_case(1e21, "1000000000000000000000" ; "integral beyond 1e21")]
    #[test_case(1.2345e45, "1234500000000000064928076353091080135047643136" ; "huge integral")]
    #[test_case(-1.23456e32, "-123455999999999994726699283513344" ; "huge negative integral")]
    #[test_case(-0.0, "-0" ; "negative zero")]
    #[test_case(0.000001, "0.000001" ; "small")]
    #[test_case(1e-7, "1e-7" ; "tiny")]
    fn test_format_number(n: f64, expected: &str) {
        assert_eq!(compact(&Value::Number(n)), expected);
    }

    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinity")]
    #[test_case(f64::NEG_INFINITY ; "negative infinity")]
    fn test_non_finite_unsupported(n: f64) {
        let value = Value::Array(vec![Value::Number(n)]);
        assert!(matches!(
            encode(&value, &EncodeOptions::default()),
            Err(EncodeError::UnsupportedType(_))
        ));
        assert!(!is_encodable(&value));
    }

    #[test]
    fn test_escapes() {
        let value = Value::from("\"\\/\u{8}\u{c}\n\r\t");
        assert_eq!(compact(&value), r#""\"\\\/\b\f\n\r\t""#);
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(compact(&Value::from("a\u{1}b\u{1f}")), r#""a\u0001b\u001f""#);
    }

    #[test]
    fn test_unescaped_slash() {
        let options = EncodeOptions::default().escape_slash(false);
        assert_eq!(encode(&Value::from("a/b"), &options).unwrap(), r#""a/b""#);
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(compact(&Value::from("é😀")), "\"é😀\"");
    }

    #[test]
    fn test_array() {
        let value = Value::from(vec![Value::Null, Value::from(16), Value::from("x")]);
        assert_eq!(compact(&value), r#"[null,16,"x"]"#);
    }

    #[test]
    fn test_empty_containers() {
        let pretty = EncodeOptions::default().pretty(true);
        for options in [EncodeOptions::default(), pretty] {
            assert_eq!(encode(&Value::Array(vec![]), &options).unwrap(), "[]");
            assert_eq!(encode(&Value::Object(Map::new()), &options).unwrap(), "{}");
        }
    }

    #[test]
    fn test_object_insertion_order() {
        let value: Value = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(compact(&value), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_sort_keys() {
        let value: Value = [("b", 1), ("a", 2), ("B", 3)].into_iter().collect();
        let options = EncodeOptions::default().sort_keys(true);
        assert_eq!(encode(&value, &options).unwrap(), r#"{"B":3,"a":2,"b":1}"#);
    }

    #[test]
    fn test_escaped_key() {
        let value: Value = [("a\"b", true)].into_iter().collect();
        assert_eq!(compact(&value), r#"{"a\"b":true}"#);
    }

    #[test]
    fn test_pretty() {
        let value: Value = [
            ("id", Value::from(2)),
            ("tags", Value::from(vec!["a", "b"])),
            ("empty", Value::Array(vec![])),
        ]
        .into_iter()
        .collect();
        let options = EncodeOptions::default().pretty(true);
        let expected = "{\n  \"id\": 2,\n  \"tags\": [\n    \"a\",\n    \"b\"\n  ],\n  \"empty\": []\n}";
        assert_eq!(encode(&value, &options).unwrap(), expected);
    }

    #[test]
    fn test_pretty_indent_width() {
        let value = Value::from(vec![vec![1]]);
        let options = EncodeOptions::default().pretty(true).indent(4);
        assert_eq!(
            encode(&value, &options).unwrap(),
            "[\n    [\n        1\n    ]\n]"
        );
    }
}
