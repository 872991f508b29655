//! Strict RFC 8259 JSON decoding and encoding.
//!
//! Decoding runs text through a [`Scanner`], a [`Tokenizer`] and a
//! recursive-descent [`Parser`] into a [`Value`]; encoding walks a [`Value`]
//! back into text.
//!
//! ```
//! use json_parser::{decode, encode, EncodeOptions};
//!
//! let value = decode(r#"{"b": 1, "a": [true, null, 2.5]}"#).unwrap();
//! let options = EncodeOptions::default().sort_keys(true);
//! assert_eq!(encode(&value, &options).unwrap(), r#"{"a":[true,null,2.5],"b":1}"#);
//! ```

use std::io::{Read, Write};

mod error;
mod parse;
mod scanner;
mod serialize;
mod token_list;
mod tokenize;
mod value;

pub use error::{EncodeError, Error, ErrorKind, ParseError};
pub use parse::{decode, decode_with, parse_tokens, DecodeOptions, Parser, DEFAULT_MAX_DEPTH};
pub use scanner::Scanner;
pub use serialize::{encode, format_number, is_encodable, EncodeOptions};
pub use token_list::TokenList;
pub use tokenize::{tokenize, Token, TokenSource, Tokenizer};
pub use value::{Map, Value};

/// Read all of `reader` as UTF-8 and decode it.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Value, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(decode(&text)?)
}

/// Encode `value` into `writer`, returning the number of bytes written.
pub fn to_writer<W: Write>(
    mut writer: W,
    value: &Value,
    options: &EncodeOptions,
) -> Result<usize, Error> {
    let text = encode(value, options)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_from_reader() {
        let value = from_reader(&b"[1, \"two\"]"[..]).unwrap();
        assert_eq!(value, Value::from(vec![Value::from(1), Value::from("two")]));
    }

    #[test]
    fn reader_surfaces_parse_errors() {
        let err = from_reader(&b"[1,"[..]).unwrap_err();
        assert!(matches!(err, Error::Parse(e) if e.kind == ErrorKind::UnexpectedEndOfInput));
    }

    #[test]
    fn reader_rejects_invalid_utf8() {
        let err = from_reader(&[b'"', 0xFF, b'"'][..]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn writes_to_writer() {
        let mut out = Vec::new();
        let value: Value = [("path", "a/b")].into_iter().collect();
        let written = to_writer(&mut out, &value, &EncodeOptions::default()).unwrap();
        assert_eq!(out, br#"{"path":"a\/b"}"#);
        assert_eq!(written, out.len());
    }

    #[test]
    fn writer_rejects_non_finite() {
        let mut out = Vec::new();
        let err = to_writer(&mut out, &Value::Number(f64::NAN), &EncodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Encode(EncodeError::UnsupportedType(_))));
        assert!(out.is_empty());
    }
}
