/// Value Module
///
/// `RawValue` is what a driver hands back for one cell; `Value` is the closed
/// set of kinds a decoded record stores. Normalization turns the former into
/// the latter.
use chrono::NaiveDateTime;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{self, Serialize, Serializer};
use std::fmt;

/// Layout used when a timestamp is normalized to text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A cell value as returned by the database driver, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    /// Opaque byte sequence (text, blob and decimal columns usually arrive this way)
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
}

impl RawValue {
    /// Collapses the driver kind into a record value.
    ///
    /// Byte sequences become text (invalid UTF-8 is replaced lossily) and
    /// timestamps become text in [`TIMESTAMP_FORMAT`]. Every other kind keeps
    /// its native representation, and `Null` stays `Null`.
    pub fn normalize(self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::Text(text),
                Err(err) => Value::Text(String::from_utf8_lossy(err.as_bytes()).into_owned()),
            },
            RawValue::Integer(i) => Value::Integer(i),
            RawValue::Float(f) => Value::Float(f),
            RawValue::Boolean(b) => Value::Boolean(b),
            RawValue::Timestamp(ts) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Bytes(text.as_bytes().to_vec())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

/// A normalized cell value stored in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display text for a CSV cell, with `null_text` standing in for nulls.
    pub fn to_text(&self, null_text: &str) -> String {
        match self {
            Value::Null => null_text.to_string(),
            other => other.to_string(),
        }
    }
}

/// Nulls display as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            // serde_json would quietly write `null` for these
            Value::Float(x) if !x.is_finite() => Err(ser::Error::custom(format!(
                "float {} is not representable in JSON",
                x
            ))),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a string, a number or a boolean")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Value, E> {
        Ok(Value::Boolean(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> std::result::Result<Value, E> {
        Ok(Value::Integer(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(u).map_or(Value::Float(u as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<Value, E> {
        Ok(Value::Text(s))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bytes_normalize_to_text() {
        assert_eq!(RawValue::from("Alice").normalize(), Value::Text("Alice".to_string()));
        assert_eq!(RawValue::Bytes(Vec::new()).normalize(), Value::Text(String::new()));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let value = RawValue::Bytes(vec![b'a', 0xff, b'b']).normalize();
        assert_eq!(value, Value::Text("a\u{fffd}b".to_string()));
    }

    #[test]
    fn test_null_stays_null() {
        let value = RawValue::Null.normalize();
        assert!(value.is_null());
        assert_ne!(value, Value::Text(String::new()));
        assert_ne!(value, Value::Text("null".to_string()));
    }

    #[test]
    fn test_native_kinds_pass_through() {
        assert_eq!(RawValue::Integer(7).normalize(), Value::Integer(7));
        assert_eq!(RawValue::Float(1.5).normalize(), Value::Float(1.5));
        assert_eq!(RawValue::Boolean(true).normalize(), Value::Boolean(true));
    }

    #[test]
    fn test_timestamp_normalizes_to_text() {
        let ts = NaiveDate::from_ymd_opt(2019, 8, 16)
            .unwrap()
            .and_hms_opt(18, 7, 10)
            .unwrap();
        assert_eq!(
            RawValue::Timestamp(ts).normalize(),
            Value::Text("2019-08-16 18:07:10".to_string())
        );
    }

    #[test]
    fn test_display_text() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Null.to_text("NULL"), "NULL");
        assert_eq!(Value::Integer(-3).to_text("NULL"), "-3");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Boolean(false).to_string(), "false");
    }

    #[test]
    fn test_serialize_json() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::from("a\"b")).unwrap(), r#""a\"b""#);
        assert_eq!(serde_json::to_string(&Value::Float(1.0)).unwrap(), "1.0");
        assert!(serde_json::to_string(&Value::Float(f64::NAN)).is_err());
        assert!(serde_json::to_string(&Value::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_deserialize_json() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, "x", 3, 2.5, true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::from("x"),
                Value::Integer(3),
                Value::Float(2.5),
                Value::Boolean(true),
            ]
        );
    }
}
