//! Dynamic host values crossing the bridge

use serde::{Deserialize, Serialize};

/// A dynamically-typed host value.
///
/// The host string channel is a byte sequence: descriptions and type tags
/// are text, but payloads travel through the same channel and may be opaque
/// binary with embedded NULs. There is no nil-as-failure sentinel; failure
/// is the `Err` arm of a dispatch result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean-like success sentinel for flag-returning operations
    True,
    /// Integer (key serials, uids, permission masks, timeouts)
    Int(i64),
    /// Host string channel; possibly opaque binary
    Str(Vec<u8>),
    /// Fixed-arity structured tuple
    Vector(Vec<Value>),
    /// Sequence of values
    List(Vec<Value>),
}

impl Value {
    /// Boxes text into the string channel
    pub fn text(value: &str) -> Self {
        Value::Str(value.as_bytes().to_vec())
    }

    /// Boxes opaque bytes into the string channel
    pub fn bytes(value: &[u8]) -> Self {
        Value::Str(value.to_vec())
    }

    /// The integer inside, if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The raw bytes inside, if this is a string value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The bytes inside as text, if this is a string value holding UTF-8
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_bytes_share_the_string_channel() {
        assert_eq!(Value::text("abc"), Value::Str(b"abc".to_vec()));
        assert_eq!(Value::bytes(b"a\0b"), Value::Str(b"a\0b".to_vec()));
    }

    #[test]
    fn test_as_text_requires_utf8() {
        assert_eq!(Value::text("abc").as_text(), Some("abc"));
        assert_eq!(Value::Str(vec![0xff, 0xfe]).as_text(), None);
        assert_eq!(Value::Str(vec![0xff, 0xfe]).as_bytes(), Some(&[0xff, 0xfe][..]));
    }

    #[test]
    fn test_value_serialization_round_trip() {
        let value = Value::Vector(vec![
            Value::text("user"),
            Value::Int(1000),
            Value::List(vec![Value::True]),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        assert_eq!(Value::True.as_int(), None);
        assert_eq!(Value::Int(1).as_bytes(), None);
        assert_eq!(Value::List(vec![]).as_text(), None);
    }
}
