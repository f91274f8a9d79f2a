use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::fmt;

// ─── FieldNumber ────────────────────────────────────────────────────────────

/// Integers that fit in `i64` are always `I64`; `U64` only holds values
/// above `i64::MAX`. Every constructor goes through [`FieldNumber::from_u64`]
/// so a value reads back exactly as it was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl FieldNumber {
    #[inline]
    pub fn from_u64(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => FieldNumber::I64(i),
            Err(_) => FieldNumber::U64(u),
        }
    }
}

// ─── FieldValue ─────────────────────────────────────────────────────────────

/// Arbitrary JSON-like value held by a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(FieldNumber),
    Str(SmolStr),
    Array(Vec<FieldValue>),
    Object(BTreeMap<SmolStr, FieldValue>),
}

impl FieldValue {
    /// Read a value from free text, as sent in a query string.
    ///
    /// Valid JSON (`72`, `true`, `[1,2]`, `"quoted"`) keeps its type; anything
    /// else is stored verbatim as a string.
    pub fn parse_loose(text: &str) -> FieldValue {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(v) => FieldValue::from(v),
            Err(_) => FieldValue::Str(SmolStr::from(text)),
        }
    }
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => match n {
                FieldNumber::I64(i) => serializer.serialize_i64(*i),
                FieldNumber::U64(u) => serializer.serialize_u64(*u),
                FieldNumber::F64(f) => serializer.serialize_f64(*f),
            },
            FieldValue::Str(s) => serializer.serialize_str(s.as_str()),
            FieldValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            FieldValue::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
        }
    }
}

// ─── Deserialize ────────────────────────────────────────────────────────────

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(FieldNumber::I64(i)))
    }

    // Non-negative integers arrive here too.
    fn visit_u64<E: de::Error>(self, u: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(FieldNumber::from_u64(u)))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(FieldNumber::F64(f)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Str(SmolStr::from(s)))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Str(SmolStr::from(s)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<FieldValue, D::Error> {
        FieldValue::deserialize(d)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldValue, A::Error> {
        let mut arr = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element::<FieldValue>()? {
            arr.push(v);
        }
        Ok(FieldValue::Array(arr))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldValue, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((k, v)) = access.next_entry::<SmolStr, FieldValue>()? {
            map.insert(k, v);
        }
        Ok(FieldValue::Object(map))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(FieldNumber::F64(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(FieldNumber::I64(n))
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(FieldNumber::from_u64(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(SmolStr::from(s))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(SmolStr::from(s))
    }
}

// ─── From serde_json::Value ────────────────────────────────────────────

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Number(FieldNumber::I64(i))
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Number(FieldNumber::from_u64(u))
                } else {
                    FieldValue::Number(FieldNumber::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => FieldValue::Str(SmolStr::from(s)),
            serde_json::Value::Array(arr) => {
                FieldValue::Array(arr.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(obj) => FieldValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (SmolStr::from(k), FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}
