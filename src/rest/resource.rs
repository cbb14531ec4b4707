//! The resource model.
//!
//! A [`Resource`] pairs a normalized address (`collection` + `name`) with an
//! optional data payload and two timestamps. It is built from path fragments,
//! updated in place with [`Resource::merge`], and rendered back into a route
//! string with [`Resource::value_of`].
//!
//! # Example
//!
//! ```rust
//! use resource_router::{Resource, RoutingConfig};
//! use serde_json::json;
//!
//! let mut resource = Resource::from_path_and_data(
//!     "/users/JDoe",
//!     json!({"name": {"first": "John", "last": "Doe"}}),
//! );
//! assert_eq!(resource.collection(), "/users");
//! assert_eq!(resource.name(), "/JDoe");
//!
//! resource.merge(json!({"name": {"first": "Jane"}, "age": 42}));
//! assert!(resource.modified_on.is_some());
//!
//! assert_eq!(resource.to_string(), "/users/jdoe");
//! assert_eq!(resource.to_route(Some(&RoutingConfig::EXACT)), "/users/JDoe");
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RoutingSettings;
use crate::rest::path::{canonicalize, normalize_collection, normalize_name, split_path, ROOT};
use crate::rest::{merge_payload, IntoPayload, Payload, PayloadKind, ResourceError};

/// A REST resource address with its data.
///
/// # Invariants
///
/// - `collection` is `""` or starts with `/`, and never ends with `/`.
/// - `name` starts with exactly one `/` and holds a single segment, optionally
///   followed by one trailing `/`.
///
/// Both hold for every constructor; [`Resource::parse`] trusts serialized
/// addresses as written.
///
/// # Timestamps
///
/// `created_on` is left for the owner to set when the resource is first
/// stored. `modified_on` is refreshed by every merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    collection: String,
    #[serde(default = "root_name")]
    name: String,
    /// The resource data. `None` means no data at all.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub data: Option<Payload>,
    /// When the resource was first stored.
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_on: Option<DateTime<Utc>>,
    /// When the resource data last changed.
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub modified_on: Option<DateTime<Utc>>,
}

fn root_name() -> String {
    ROOT.to_string()
}

// A present `null` is data; only a missing field means "no data".
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Payload>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Payload::deserialize(deserializer).map(Some)
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource {
    /// Creates the root resource (`collection = ""`, `name = "/"`) with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::with_address(String::new(), root_name(), None)
    }

    /// Creates a resource from a single combined path.
    ///
    /// The last segment becomes the name and the rest the collection. Any
    /// displayable value is accepted, so numeric ids work directly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::Resource;
    ///
    /// let resource = Resource::from_path("/users/jdoe/orders");
    /// assert_eq!(resource.collection(), "/users/jdoe");
    /// assert_eq!(resource.name(), "/orders");
    ///
    /// let resource = Resource::from_path(12345);
    /// assert_eq!(resource.collection(), "");
    /// assert_eq!(resource.name(), "/12345");
    /// ```
    #[must_use]
    pub fn from_path(path: impl fmt::Display) -> Self {
        Self::from_path_and_data(path, ())
    }

    /// Creates a resource from a combined path and data.
    ///
    /// If `data` is another [`Resource`], only its data is adopted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::Resource;
    /// use serde_json::json;
    ///
    /// let other = Resource::from_path_and_data("/foo/bar", json!({"orderId": 12345}));
    /// let resource = Resource::from_path_and_data("/users/jdoe/orders/12345", &other);
    ///
    /// assert_eq!(resource.collection(), "/users/jdoe/orders");
    /// assert_eq!(resource.data, other.data);
    /// ```
    #[must_use]
    pub fn from_path_and_data(path: impl fmt::Display, data: impl IntoPayload) -> Self {
        let path = path.to_string();
        let (collection, name) = split_path(&path);
        tracing::debug!("Resource {}{} created from path '{}'", collection, name, path);
        Self::with_address(collection, name, data.into_payload())
    }

    /// Creates a resource from a collection path, a name, and data.
    ///
    /// Pass `()` as `data` for a resource without data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `name` contains a slash
    /// other than a leading or trailing one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::Resource;
    ///
    /// let resource = Resource::from_collection_and_name("users/jdoe/orders/", "12345/", ()).unwrap();
    /// assert_eq!(resource.collection(), "/users/jdoe/orders");
    /// assert_eq!(resource.name(), "/12345/");
    ///
    /// assert!(Resource::from_collection_and_name("/users", "/jdoe/orders", ()).is_err());
    /// ```
    pub fn from_collection_and_name(
        collection: impl fmt::Display,
        name: impl fmt::Display,
        data: impl IntoPayload,
    ) -> Result<Self, ResourceError> {
        let name = normalize_name(&name.to_string())?;
        let collection = normalize_collection(&collection.to_string());
        Ok(Self::with_address(collection, name, data.into_payload()))
    }

    const fn with_address(collection: String, name: String, data: Option<Payload>) -> Self {
        Self {
            collection,
            name,
            data,
            created_on: None,
            modified_on: None,
        }
    }

    /// Returns the collection path (`""` for the root collection).
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the resource name, always starting with `/`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw address, `collection + name`, without any routing rules applied.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.collection, self.name)
    }

    /// Returns `true` if the name keeps a trailing slash (e.g. `/users/`).
    #[must_use]
    pub fn is_collection_like(&self) -> bool {
        self.name.len() > 1 && self.name.ends_with('/')
    }

    /// Returns the kind of the current data.
    #[must_use]
    pub fn data_kind(&self) -> PayloadKind {
        PayloadKind::of(self.data.as_ref())
    }

    /// Merges new data into this resource and sets `modified_on` to now.
    ///
    /// Two mappings merge recursively; anything else replaces the current
    /// data, `()` included. A [`Resource`] contributes only its data, and the
    /// address of `self` never changes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::{Payload, Resource};
    /// use serde_json::json;
    ///
    /// let mut resource = Resource::from_path_and_data("/users/JDoe", json!({"a": {"b": 1}}));
    /// resource.merge(json!({"a": {"c": 2}}));
    /// assert_eq!(resource.data, Some(Payload::from(json!({"a": {"b": 1, "c": 2}}))));
    ///
    /// resource.merge(());
    /// assert_eq!(resource.data, None);
    /// ```
    pub fn merge(&mut self, new_data: impl IntoPayload) {
        self.merge_at(new_data, Utc::now());
    }

    /// Like [`merge`](Self::merge), stamping `modified_on` with `now`.
    pub fn merge_at(&mut self, new_data: impl IntoPayload, now: DateTime<Utc>) {
        let incoming = new_data.into_payload();
        let before = self.data_kind();
        let after = PayloadKind::of(incoming.as_ref());

        merge_payload(&mut self.data, incoming);
        self.modified_on = Some(now);

        if before == PayloadKind::Mapping && after == PayloadKind::Mapping {
            tracing::debug!("Merged data into resource {}", self.path());
        } else {
            tracing::debug!(
                "Replaced {:?} data of resource {} with {:?}",
                before,
                self.path(),
                after
            );
        }
    }

    /// Renders this resource as a route string.
    ///
    /// Uses the given routing settings, or case-insensitive non-strict routing
    /// when `None`.
    #[must_use]
    pub fn to_route(&self, routing: Option<&dyn RoutingSettings>) -> String {
        self.value_of(routing, false)
    }

    /// Renders this resource, or only its collection, as a route string.
    ///
    /// With `collection_only` the name is dropped entirely. Without strict
    /// routing the trailing slash is removed (the root stays `/`), and without
    /// case sensitivity the route is lower-cased.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::{Resource, RoutingConfig};
    ///
    /// let resource = Resource::from_collection_and_name("/Users", "/JDoe/", ()).unwrap();
    ///
    /// assert_eq!(resource.value_of(None, false), "/users/jdoe");
    /// assert_eq!(resource.value_of(Some(&RoutingConfig::new().with_strict(true)), false), "/users/jdoe/");
    /// assert_eq!(resource.value_of(Some(&RoutingConfig::EXACT), true), "/Users");
    /// ```
    #[must_use]
    pub fn value_of(&self, routing: Option<&dyn RoutingSettings>, collection_only: bool) -> String {
        let (case_sensitive, strict) =
            routing.map_or((false, false), |r| (r.case_sensitive(), r.strict()));

        let raw = if collection_only {
            self.collection.clone()
        } else {
            self.path()
        };

        let route = canonicalize(&raw, case_sensitive, strict);
        tracing::trace!(
            "Canonicalized {} as {} (case_sensitive={}, strict={})",
            raw,
            route,
            case_sensitive,
            strict
        );
        route
    }
}

/// Renders with default routing: lower-cased, no trailing slash except the root.
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_route(None))
    }
}

impl IntoPayload for Resource {
    fn into_payload(self) -> Option<Payload> {
        self.data
    }
}

impl IntoPayload for &Resource {
    fn into_payload(self) -> Option<Payload> {
        self.data.clone()
    }
}

mod timestamp {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Serialized {
        Text(String),
        Millis(i64),
    }

    /// Reads an RFC 3339 string or epoch milliseconds; `null` and a missing field are `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<Serialized>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Serialized::Text(text)) => DateTime::parse_from_rfc3339(&text)
                .map(|at| Some(at.with_timezone(&Utc)))
                .map_err(|err| de::Error::custom(format!("invalid timestamp '{text}': {err}"))),
            Some(Serialized::Millis(millis)) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}"))),
        }
    }
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppSettings, RoutingConfig};
    use chrono::TimeZone;
    use serde_json::json;

    fn config(case_sensitive: bool, strict: bool) -> RoutingConfig {
        RoutingConfig::new()
            .with_case_sensitive(case_sensitive)
            .with_strict(strict)
    }

    #[test]
    fn test_new_is_root_without_data() {
        let resource = Resource::new();
        assert_eq!(resource.collection(), "");
        assert_eq!(resource.name(), "/");
        assert_eq!(resource.data, None);
        assert_eq!(resource.created_on, None);
        assert_eq!(resource.modified_on, None);
        assert_eq!(resource, Resource::default());
    }

    #[test]
    fn test_from_path_with_non_string_and_data() {
        let resource = Resource::from_path_and_data(12345, json!({"orderId": 12345}));
        assert_eq!(resource.collection(), "");
        assert_eq!(resource.name(), "/12345");
        assert_eq!(resource.data, Some(Payload::from(json!({"orderId": 12345}))));
    }

    #[test]
    fn test_from_collection_and_name_with_numbers() {
        let resource = Resource::from_collection_and_name(12345, 67890, ()).unwrap();
        assert_eq!(resource.collection(), "/12345");
        assert_eq!(resource.name(), "/67890");
    }

    #[test]
    fn test_resource_as_data_is_unwrapped_by_value() {
        let other = Resource::from_path_and_data("/foo/bar", json!({"orderId": 12345}));
        let resource =
            Resource::from_collection_and_name("/users/jdoe/orders", "/12345", other.clone())
                .unwrap();

        assert_eq!(resource.collection(), "/users/jdoe/orders");
        assert_eq!(resource.name(), "/12345");
        assert_eq!(resource.data, other.data);
        assert_eq!(resource.created_on, None);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let result =
            Resource::from_collection_and_name("/users", "/jdoe/orders", Payload::from("foo"));
        let err = result.unwrap_err();
        assert!(matches!(err, ResourceError::InvalidArgument { .. }));
        assert!(err.to_string().contains("Resource names cannot contain slashes"));
    }

    #[test]
    fn test_is_collection_like() {
        assert!(Resource::from_path("/users/").is_collection_like());
        assert!(!Resource::from_path("/users").is_collection_like());
        assert!(!Resource::new().is_collection_like());
    }

    #[test]
    fn test_merge_at_sets_modified_on_only() {
        let created = Utc.with_ymd_and_hms(2000, 2, 2, 3, 4, 5).unwrap();
        let previous = Utc.with_ymd_and_hms(2006, 6, 4, 3, 2, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut resource = Resource::from_path("/users/JDoe");
        resource.created_on = Some(created);
        resource.modified_on = Some(previous);

        resource.merge_at((), now);

        assert_eq!(resource.created_on, Some(created));
        assert_eq!(resource.modified_on, Some(now));
    }

    #[test]
    fn test_merge_resource_keeps_own_address() {
        let mut res1 = Resource::from_path_and_data(
            "/users/JDoe",
            json!({"name": {"first": "John", "last": "Doe"}}),
        );
        let res2 = Resource::from_path_and_data(
            "/people/BSmith",
            json!({"name": {"first": "Bob"}, "age": 42}),
        );

        res1.merge(&res2);

        assert_eq!(res1.collection(), "/users");
        assert_eq!(res1.name(), "/JDoe");
        assert_eq!(
            res1.data,
            Some(Payload::from(json!({"name": {"first": "Bob", "last": "Doe"}, "age": 42})))
        );
        assert_eq!(res1.data_kind(), PayloadKind::Mapping);
    }

    #[test]
    fn test_value_of_truth_table() {
        let resource = Resource::from_collection_and_name("/Users", "/JDoe", ()).unwrap();
        assert_eq!(resource.value_of(Some(&config(false, false)), false), "/users/jdoe");
        assert_eq!(resource.value_of(Some(&config(true, false)), false), "/Users/JDoe");
        assert_eq!(resource.value_of(Some(&config(false, true)), false), "/users/jdoe");
        assert_eq!(resource.value_of(Some(&config(true, true)), false), "/Users/JDoe");

        let resource = Resource::from_collection_and_name("/Users", "/JDoe/", ()).unwrap();
        assert_eq!(resource.value_of(Some(&config(false, false)), false), "/users/jdoe");
        assert_eq!(resource.value_of(Some(&config(true, false)), false), "/Users/JDoe");
        assert_eq!(resource.value_of(Some(&config(false, true)), false), "/users/jdoe/");
        assert_eq!(resource.value_of(Some(&config(true, true)), false), "/Users/JDoe/");
    }

    #[test]
    fn test_value_of_collection_only() {
        let resource = Resource::from_collection_and_name("/Users/", "/Jdoe/", ()).unwrap();
        assert_eq!(resource.value_of(None, true), "/users");
        assert_eq!(resource.value_of(Some(&config(false, true)), true), "/users");
        assert_eq!(resource.value_of(Some(&config(true, true)), true), "/Users");

        let root = Resource::from_path("/users");
        assert_eq!(root.value_of(None, true), "/");
    }

    #[test]
    fn test_to_route_matches_value_of_and_display() {
        let resource = Resource::from_path("/Users/JDoe/");
        let app = AppSettings::new();

        assert_eq!(resource.to_route(None), resource.value_of(None, false));
        assert_eq!(resource.to_route(Some(&app)), "/users/jdoe");
        assert_eq!(resource.to_string(), "/users/jdoe");
        assert_eq!(resource.path(), "/Users/JDoe/");
    }

    #[test]
    fn test_serialize_omits_absent_data() {
        let resource = Resource::from_path("/users/jdoe");
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            json,
            json!({
                "collection": "/users",
                "name": "/jdoe",
                "createdOn": null,
                "modifiedOn": null
            })
        );
    }

    #[test]
    fn test_deserialize_distinguishes_null_from_missing_data() {
        let with_null: Resource =
            serde_json::from_value(json!({"collection": "", "name": "/", "data": null})).unwrap();
        assert_eq!(with_null.data, Some(Payload::Null));

        let missing: Resource = serde_json::from_value(json!({"collection": "", "name": "/"})).unwrap();
        assert_eq!(missing.data, None);
    }

    #[test]
    fn test_deserialize_timestamps_from_text_and_millis() {
        let resource: Resource = serde_json::from_value(json!({
            "collection": "/users",
            "name": "/jdoe",
            "createdOn": "1991-01-15T16:45:00.000Z",
            "modifiedOn": 673_430_425_000_i64
        }))
        .unwrap();

        assert_eq!(
            resource.created_on,
            Some(Utc.with_ymd_and_hms(1991, 1, 15, 16, 45, 0).unwrap())
        );
        assert_eq!(
            resource.modified_on,
            Some(Utc.timestamp_millis_opt(673_430_425_000).unwrap())
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_timestamp() {
        let result = serde_json::from_value::<Resource>(json!({"createdOn": "yesterday"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_defaults_missing_address_to_root() {
        let resource: Resource = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resource.collection(), "");
        assert_eq!(resource.name(), "/");
    }
}
