//! Resource data payloads and the merge policy.
//!
//! A resource's data is an `Option<Payload>`, where `None` means the resource
//! has no data at all (as opposed to [`Payload::Null`], which is an explicit null).
//!
//! # Merging
//!
//! [`merge_payload`] only recurses when both sides are [`Payload::Mapping`].
//! Every other pairing replaces the existing data outright, so an object never
//! gets coerced into an array, a string into an object, and so on.
//!
//! ```rust
//! use resource_router::rest::{merge_payload, Payload};
//! use serde_json::json;
//!
//! let mut data = Some(Payload::from(json!({"name": {"first": "John", "last": "Doe"}})));
//! merge_payload(&mut data, Some(Payload::from(json!({"name": {"first": "Jane"}, "age": 42}))));
//!
//! assert_eq!(
//!     data,
//!     Some(Payload::from(json!({"name": {"first": "Jane", "last": "Doe"}, "age": 42})))
//! );
//!
//! merge_payload(&mut data, Some(Payload::from(json!(["a", "b"]))));
//! assert_eq!(data, Some(Payload::from(json!(["a", "b"]))));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// An opaque resource data value.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// A point in time.
    Temporal(DateTime<Utc>),
    /// An ordered list of values.
    Sequence(Vec<Payload>),
    /// A plain key-value mapping.
    Mapping(BTreeMap<String, Payload>),
}

/// The merge-relevant classification of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// No data.
    Absent,
    /// A key-value mapping; the only kind that merges recursively.
    Mapping,
    /// A list.
    Sequence,
    /// Null, boolean, number, or string.
    Scalar,
    /// A point in time.
    Temporal,
}

impl PayloadKind {
    /// Classifies optional resource data.
    #[must_use]
    pub const fn of(data: Option<&Payload>) -> Self {
        match data {
            None => Self::Absent,
            Some(payload) => payload.kind(),
        }
    }
}

impl Payload {
    /// Returns the kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => PayloadKind::Scalar,
            Self::Temporal(_) => PayloadKind::Temporal,
            Self::Sequence(_) => PayloadKind::Sequence,
            Self::Mapping(_) => PayloadKind::Mapping,
        }
    }

    /// Returns `true` for a key-value mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the value stored under `key`, if this is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

/// Merges `incoming` into `target` in place.
///
/// Mapping into mapping merges key by key, recursing where both sides hold a
/// mapping under the same key and keeping keys only present in `target`. Any
/// other combination replaces `target` with `incoming`, including `None`.
pub fn merge_payload(target: &mut Option<Payload>, incoming: Option<Payload>) {
    match incoming {
        Some(Payload::Mapping(incoming)) => {
            if let Some(Payload::Mapping(existing)) = target {
                merge_mappings(existing, incoming);
            } else {
                *target = Some(Payload::Mapping(incoming));
            }
        }
        other => *target = other,
    }
}

fn merge_mappings(existing: &mut BTreeMap<String, Payload>, incoming: BTreeMap<String, Payload>) {
    for (key, value) in incoming {
        if let Payload::Mapping(nested) = value {
            if let Some(Payload::Mapping(current)) = existing.get_mut(&key) {
                merge_mappings(current, nested);
                continue;
            }
            existing.insert(key, Payload::Mapping(nested));
        } else {
            existing.insert(key, value);
        }
    }
}

/// Converts a value into optional resource data.
///
/// This is the single place where a [`Resource`](crate::Resource) handed over
/// as data gets unwrapped: only its inner data is taken, never its address or
/// timestamps.
pub trait IntoPayload {
    /// Extracts the payload.
    fn into_payload(self) -> Option<Payload>;
}

impl IntoPayload for Payload {
    fn into_payload(self) -> Option<Payload> {
        Some(self)
    }
}

impl IntoPayload for Option<Payload> {
    fn into_payload(self) -> Option<Payload> {
        self
    }
}

impl IntoPayload for Value {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::from(self))
    }
}

/// No data.
impl IntoPayload for () {
    fn into_payload(self) -> Option<Payload> {
        None
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Null => Self::Null,
            Payload::Bool(flag) => Self::Bool(flag),
            Payload::Number(number) => Self::Number(number),
            Payload::String(text) => Self::String(text),
            Payload::Temporal(at) => Self::String(format_temporal(&at)),
            Payload::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Payload::Mapping(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Payload {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Payload {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<u64> for Payload {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<f64> for Payload {
    /// Non-finite numbers have no JSON form and become [`Payload::Null`].
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<DateTime<Utc>> for Payload {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Temporal(at)
    }
}

impl From<Vec<Self>> for Payload {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<BTreeMap<String, Self>> for Payload {
    fn from(map: BTreeMap<String, Self>) -> Self {
        Self::Mapping(map)
    }
}

fn format_temporal(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => number.serialize(serializer),
            Self::String(text) => serializer.serialize_str(text),
            Self::Temporal(at) => serializer.serialize_str(&format_temporal(at)),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

// Verify Payload is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Payload>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn payload(value: Value) -> Option<Payload> {
        Some(Payload::from(value))
    }

    fn sample_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 2, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_merge_mappings_deep_union() {
        let mut data = payload(json!({"name": {"first": "John", "last": "Doe"}}));

        merge_payload(
            &mut data,
            payload(json!({"name": {"first": "Jane", "middle": "Alice"}, "age": 42})),
        );

        assert_eq!(
            data,
            payload(json!({
                "name": {"first": "Jane", "middle": "Alice", "last": "Doe"},
                "age": 42
            }))
        );
    }

    #[test]
    fn test_merge_nested_mapping_replaces_non_mapping_value() {
        let mut data = payload(json!({"name": "John Doe"}));
        merge_payload(&mut data, payload(json!({"name": {"first": "John"}})));
        assert_eq!(data, payload(json!({"name": {"first": "John"}})));

        let mut data = payload(json!({"name": {"first": "John"}}));
        merge_payload(&mut data, payload(json!({"name": ["John"]})));
        assert_eq!(data, payload(json!({"name": ["John"]})));
    }

    #[test]
    fn test_merge_is_idempotent_for_mappings() {
        let update = payload(json!({"a": {"b": 1}, "c": [1, 2]}));
        let mut once = payload(json!({"a": {"z": 0}, "d": true}));
        merge_payload(&mut once, update.clone());

        let mut twice = once.clone();
        merge_payload(&mut twice, update);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_array_replaces_mapping() {
        let mut data = payload(json!({"name": {"first": "John"}}));
        merge_payload(&mut data, payload(json!(["a", "b", "c"])));
        assert_eq!(data, payload(json!(["a", "b", "c"])));
    }

    #[test]
    fn test_merge_arrays_are_not_concatenated() {
        let mut data = payload(json!([1, 2, 3]));
        merge_payload(&mut data, payload(json!([4])));
        assert_eq!(data, payload(json!([4])));
    }

    #[test]
    fn test_merge_string_replaces_array() {
        let mut data = payload(json!(["a", "b", "c"]));
        merge_payload(&mut data, Some(Payload::from("hello world")));
        assert_eq!(data, Some(Payload::String("hello world".to_string())));
    }

    #[test]
    fn test_merge_date_replaces_mapping() {
        let mut data = payload(json!({"name": "John"}));
        merge_payload(&mut data, Some(Payload::from(sample_date())));
        assert_eq!(data, Some(Payload::Temporal(sample_date())));
        assert_eq!(PayloadKind::of(data.as_ref()), PayloadKind::Temporal);
    }

    #[test]
    fn test_merge_null_and_absent_replace() {
        let mut data = payload(json!({"name": "John"}));
        merge_payload(&mut data, Some(Payload::Null));
        assert_eq!(data, Some(Payload::Null));

        merge_payload(&mut data, None);
        assert_eq!(data, None);
    }

    #[test]
    fn test_merge_mapping_into_absent_or_null() {
        let mut data = None;
        merge_payload(&mut data, payload(json!({"a": 1})));
        assert_eq!(data, payload(json!({"a": 1})));

        let mut data = Some(Payload::Null);
        merge_payload(&mut data, payload(json!({"a": 1})));
        assert_eq!(data, payload(json!({"a": 1})));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(PayloadKind::of(None), PayloadKind::Absent);
        assert_eq!(Payload::Null.kind(), PayloadKind::Scalar);
        assert_eq!(Payload::from(12345_i64).kind(), PayloadKind::Scalar);
        assert_eq!(Payload::from("x").kind(), PayloadKind::Scalar);
        assert_eq!(Payload::from(json!([])).kind(), PayloadKind::Sequence);
        assert_eq!(Payload::from(json!({})).kind(), PayloadKind::Mapping);
        assert_eq!(Payload::from(sample_date()).kind(), PayloadKind::Temporal);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(Payload::from(f64::NAN), Payload::Null);
        assert_eq!(Payload::from(1.5_f64), Payload::Number(Number::from_f64(1.5).unwrap()));
    }

    #[test]
    fn test_serialize_temporal_as_rfc3339_millis() {
        let json = serde_json::to_value(Payload::from(sample_date())).unwrap();
        assert_eq!(json, json!("2000-02-02T03:04:05.000Z"));
    }

    #[test]
    fn test_deserialize_keeps_scalar_types() {
        let text: Payload = serde_json::from_str(r#""<h1>hello world</h1>""#).unwrap();
        assert_eq!(text.as_str(), Some("<h1>hello world</h1>"));

        let number: Payload = serde_json::from_str("12345").unwrap();
        assert_eq!(number, Payload::from(12345_u64));
    }

    #[test]
    fn test_value_conversion_preserves_structure() {
        let value = json!({"orderId": 12345, "items": [{"sku": "a"}, null], "paid": false});
        let payload = Payload::from(value.clone());

        assert_eq!(payload.get("orderId"), Some(&Payload::from(12345_u64)));
        assert_eq!(Value::from(payload), value);
    }
}
