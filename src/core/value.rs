use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::JsCode;
use crate::core::primitives::{decimal_to_number, format_date, format_datetime};
use crate::error::{LiteralError, LiteralResult};

pub type OptionMap = IndexMap<String, OptionValue>;

/// One node of a chart option structure.
///
/// Mirrors the JSON data model plus two extensions: calendar values, which
/// are rendered as ISO-8601 strings, and [`JsCode`] leaves, which are
/// rendered as raw script.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Array(Vec<OptionValue>),
    Object(OptionMap),
    Code(JsCode),
}

impl OptionValue {
    /// Empty object, the usual starting point for `with` chains.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(OptionMap::new())
    }

    /// Returns `self` with `key` set to `value`.
    ///
    /// Non-object receivers are replaced by a fresh object holding the entry.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let mut map = match self {
            Self::Object(map) => map,
            _ => OptionMap::new(),
        };
        map.insert(key.into(), value.into());
        Self::Object(map)
    }

    /// Converts any serde-serializable value through `serde_json`'s encoder.
    ///
    /// Strings carrying the code sentinel come back as [`OptionValue::Code`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> LiteralResult<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Self::from(json))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up a dotted path such as `"series.0.label.formatter"`.
    ///
    /// Numeric segments index into arrays.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&OptionValue> {
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Object(map) => map.get(segment),
            Self::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::UInt(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_code(&self) -> Option<&JsCode> {
        match self {
            Self::Code(code) => Some(code),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&OptionMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Number of [`JsCode`] leaves anywhere below this node.
    #[must_use]
    pub fn code_count(&self) -> usize {
        match self {
            Self::Code(_) => 1,
            Self::Array(items) => items.iter().map(Self::code_count).sum(),
            Self::Object(map) => map.values().map(Self::code_count).sum(),
            _ => 0,
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            // serde_json writes NaN and infinities as `null`.
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Date(date) => serializer.serialize_str(&format_date(*date)),
            Self::DateTime(time) => serializer.serialize_str(&format_datetime(*time)),
            Self::Code(code) => code.serialize(serializer),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OptionValueVisitor)
    }
}

struct OptionValueVisitor;

impl<'de> Visitor<'de> for OptionValueVisitor {
    type Value = OptionValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible option value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<OptionValue, E> {
        Ok(OptionValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<OptionValue, E> {
        Ok(OptionValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<OptionValue, E> {
        Ok(OptionValue::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<OptionValue, E> {
        Ok(OptionValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<OptionValue, E> {
        Ok(string_or_code(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<OptionValue, E> {
        Ok(string_or_code(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<OptionValue, E> {
        Ok(OptionValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<OptionValue, E> {
        Ok(OptionValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<OptionValue, D::Error> {
        OptionValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OptionValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(OptionValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OptionValue, A::Error> {
        let mut map = OptionMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
            map.insert(key, value);
        }
        Ok(OptionValue::Object(map))
    }
}

fn string_or_code(value: String) -> OptionValue {
    match JsCode::from_wrapped(&value) {
        Some(code) => OptionValue::Code(code),
        None => OptionValue::String(value),
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::Int(int)
                } else if let Some(uint) = number.as_u64() {
                    Self::UInt(uint)
                } else {
                    number.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            serde_json::Value::String(value) => string_or_code(value),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for OptionValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl From<isize> for OptionValue {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDate> for OptionValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for OptionValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for OptionValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_utc())
    }
}

impl TryFrom<Decimal> for OptionValue {
    type Error = LiteralError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        decimal_to_number(value, "decimal value")
    }
}

impl From<JsCode> for OptionValue {
    fn from(value: JsCode) -> Self {
        Self::Code(value)
    }
}

impl From<OptionMap> for OptionValue {
    fn from(value: OptionMap) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::OptionValue;
    use crate::core::{JS_CODE_SENTINEL, JsCode};

    #[test]
    fn with_chain_preserves_insertion_order() {
        let value = OptionValue::object()
            .with("z", 1)
            .with("a", 2)
            .with("m", 3);
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn get_path_walks_objects_and_arrays() {
        let value = OptionValue::object().with(
            "series",
            vec![OptionValue::object().with("label", OptionValue::object().with("show", true))],
        );
        assert_eq!(
            value.get_path("series.0.label.show"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(value.get_path("series.1.label"), None);
    }

    #[test]
    fn sentinel_strings_deserialize_as_code() {
        let raw = format!("{{\"f\": \"{JS_CODE_SENTINEL}x => x{JS_CODE_SENTINEL}\"}}");
        let value: OptionValue = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(
            value.get("f").and_then(OptionValue::as_code),
            Some(&JsCode::verbatim("x => x"))
        );
    }

    #[test]
    fn from_serialize_counts_nested_code() {
        let value = OptionValue::from_serialize(&vec![
            OptionValue::Code(JsCode::new("a")),
            OptionValue::object().with("b", JsCode::new("b")),
        ])
        .expect("serializable");
        assert_eq!(value.code_count(), 2);
    }

    #[test]
    fn large_unsigned_values_keep_precision() {
        assert_eq!(OptionValue::from(u64::MAX), OptionValue::UInt(u64::MAX));
        assert_eq!(OptionValue::from(7_u64), OptionValue::Int(7));
    }
}
