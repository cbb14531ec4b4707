//! Loading resources from serialized data.
//!
//! [`Resource::parse`] accepts JSON text or an already-decoded
//! [`serde_json::Value`], holding either one resource record or an array of
//! them. Records are read as written: addresses are not re-normalized, data
//! is copied by value, and timestamps keep their exact instant.

use serde_json::Value;

use crate::rest::{Resource, ResourceError};

/// Input accepted by [`Resource::parse`].
#[derive(Debug, Clone, Copy)]
pub enum ParseInput<'a> {
    /// JSON text.
    Json(&'a str),
    /// Decoded plain data. A string value is treated as JSON text.
    Value(&'a Value),
}

impl<'a> From<&'a str> for ParseInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Json(text)
    }
}

impl<'a> From<&'a String> for ParseInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Json(text)
    }
}

impl<'a> From<&'a Value> for ParseInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// The result of [`Resource::parse`]: one resource per record, in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// The input was a single record.
    Single(Resource),
    /// The input was an array of records.
    Many(Vec<Resource>),
}

impl Parsed {
    /// Returns the resources as a list, whatever the input shape.
    #[must_use]
    pub fn into_vec(self) -> Vec<Resource> {
        match self {
            Self::Single(resource) => vec![resource],
            Self::Many(resources) => resources,
        }
    }

    /// Returns the resource if the input was a single record.
    #[must_use]
    pub fn single(self) -> Option<Resource> {
        match self {
            Self::Single(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }

    /// Returns the number of parsed resources.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(resources) => resources.len(),
        }
    }

    /// Returns `true` if an empty array was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Resource {
    /// Parses one resource or an array of resources.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] if the text is not valid JSON, or if a
    /// record cannot be read as a resource (wrong field types, bad timestamps).
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_router::{Parsed, Payload, Resource};
    /// use serde_json::json;
    ///
    /// let parsed = Resource::parse(r#"{
    ///     "collection": "/users/jdoe/orders",
    ///     "name": "/12345",
    ///     "data": {"orderId": 12345},
    ///     "createdOn": "1991-01-15T16:45:00.000Z",
    ///     "modifiedOn": "1991-05-05T08:00:25.000Z"
    /// }"#).unwrap();
    ///
    /// let resource = parsed.single().unwrap();
    /// assert_eq!(resource.name(), "/12345");
    /// assert_eq!(resource.data, Some(Payload::from(json!({"orderId": 12345}))));
    ///
    /// let records = json!([{"collection": "", "name": "/", "data": "<h1>hello world</h1>"}]);
    /// let parsed = Resource::parse(&records).unwrap();
    /// assert!(matches!(parsed, Parsed::Many(ref list) if list.len() == 1));
    /// ```
    pub fn parse<'a>(input: impl Into<ParseInput<'a>>) -> Result<Parsed, ResourceError> {
        let value = match input.into() {
            ParseInput::Json(text) => serde_json::from_str(text)?,
            ParseInput::Value(Value::String(text)) => serde_json::from_str(text)?,
            ParseInput::Value(value) => value.clone(),
        };

        let parsed = match value {
            Value::Array(records) => Parsed::Many(
                records
                    .into_iter()
                    .map(Self::from_record)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            record => Parsed::Single(Self::from_record(record)?),
        };

        tracing::debug!("Parsed {} resource(s)", parsed.len());
        Ok(parsed)
    }

    fn from_record(record: Value) -> Result<Self, ResourceError> {
        Ok(serde_json::from_value(record)?)
    }
}
