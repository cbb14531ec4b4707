//! Application-level settings table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RoutingSettings;

/// Named application settings, as held by a hosting HTTP framework.
///
/// Values are arbitrary JSON; a setting counts as enabled when its value is
/// truthy (`true`, a non-zero number, a non-empty string, or any array or
/// object). Routing behavior is read from [`CASE_SENSITIVE_ROUTING`] and
/// [`STRICT_ROUTING`].
///
/// [`CASE_SENSITIVE_ROUTING`]: AppSettings::CASE_SENSITIVE_ROUTING
/// [`STRICT_ROUTING`]: AppSettings::STRICT_ROUTING
///
/// # Example
///
/// ```rust
/// use resource_router::{AppSettings, RoutingSettings};
/// use serde_json::json;
///
/// let mut app = AppSettings::new();
/// assert!(!app.case_sensitive());
///
/// app.enable(AppSettings::CASE_SENSITIVE_ROUTING);
/// app.set(AppSettings::STRICT_ROUTING, json!(1));
/// assert!(app.case_sensitive());
/// assert!(app.strict());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppSettings {
    settings: HashMap<String, Value>,
}

impl AppSettings {
    /// The setting that makes route matching case sensitive.
    pub const CASE_SENSITIVE_ROUTING: &'static str = "case sensitive routing";

    /// The setting that makes a trailing slash significant.
    pub const STRICT_ROUTING: &'static str = "strict routing";

    /// Creates an empty settings table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.settings.insert(name.into(), value)
    }

    /// Returns the value of a setting.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    /// Sets a setting to `true`.
    pub fn enable(&mut self, name: impl Into<String>) -> &mut Self {
        self.settings.insert(name.into(), Value::Bool(true));
        self
    }

    /// Sets a setting to `false`.
    pub fn disable(&mut self, name: impl Into<String>) -> &mut Self {
        self.settings.insert(name.into(), Value::Bool(false));
        self
    }

    /// Returns whether a setting is present and truthy.
    #[must_use]
    pub fn enabled(&self, name: &str) -> bool {
        self.settings.get(name).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl RoutingSettings for AppSettings {
    fn case_sensitive(&self) -> bool {
        self.enabled(Self::CASE_SENSITIVE_ROUTING)
    }

    fn strict(&self) -> bool {
        self.enabled(Self::STRICT_ROUTING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_settings_are_case_insensitive_non_strict() {
        let app = AppSettings::new();
        assert!(!app.case_sensitive());
        assert!(!app.strict());
    }

    #[test]
    fn test_enable_and_disable() {
        let mut app = AppSettings::new();
        app.enable(AppSettings::STRICT_ROUTING)
            .enable(AppSettings::CASE_SENSITIVE_ROUTING);
        assert!(app.strict());
        assert!(app.case_sensitive());

        app.disable(AppSettings::STRICT_ROUTING);
        assert!(!app.strict());
        assert_eq!(app.get(AppSettings::STRICT_ROUTING), Some(&json!(false)));
    }

    #[test]
    fn test_truthiness() {
        let mut app = AppSettings::new();
        for (value, expected) in [
            (json!(null), false),
            (json!(0), false),
            (json!(0.0), false),
            (json!(""), false),
            (json!(false), false),
            (json!(2), true),
            (json!("yes"), true),
            (json!([]), true),
            (json!({}), true),
        ] {
            app.set("x", value.clone());
            assert_eq!(app.enabled("x"), expected, "{value}");
        }
        assert!(!app.enabled("missing"));
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut app = AppSettings::new();
        assert_eq!(app.set("x", json!(1)), None);
        assert_eq!(app.set("x", json!(2)), Some(json!(1)));
    }

    #[test]
    fn test_deserialize_from_settings_object() {
        let app: AppSettings =
            serde_json::from_value(json!({"strict routing": true, "etag": "weak"})).unwrap();
        assert!(app.strict());
        assert!(!app.case_sensitive());
        assert_eq!(app.get("etag"), Some(&json!("weak")));
    }
}
