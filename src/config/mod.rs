//! Routing configuration for route canonicalization.
//!
//! A host framework decides whether `/Users` and `/users` are the same route
//! (case sensitivity) and whether `/users/` and `/users` are the same route
//! (strict routing). This module provides the ways to hand those two settings
//! to [`Resource::value_of`](crate::Resource::value_of):
//!
//! - [`RoutingSettings`]: the trait every settings source implements
//! - [`RoutingConfig`]: an explicit `{ caseSensitive, strict }` pair, also the
//!   shape of a router's options block
//! - [`AppSettings`]: an application-level settings table, read through the
//!   `"case sensitive routing"` and `"strict routing"` entries
//!
//! # Example
//!
//! ```rust
//! use resource_router::{AppSettings, Resource, RoutingConfig};
//!
//! let resource = Resource::from_path("/Users/JDoe/");
//!
//! let config = RoutingConfig::new().with_case_sensitive(true);
//! assert_eq!(resource.value_of(Some(&config), false), "/Users/JDoe");
//!
//! let mut app = AppSettings::new();
//! app.enable(AppSettings::STRICT_ROUTING);
//! assert_eq!(resource.value_of(Some(&app), false), "/users/jdoe/");
//! ```

mod settings;

pub use settings::AppSettings;

use serde::{Deserialize, Serialize};

/// A source of routing behavior.
///
/// Implemented by [`RoutingConfig`], [`AppSettings`], and references or boxes
/// of any implementor, so an application or router handle can be passed
/// wherever routing settings are expected.
pub trait RoutingSettings {
    /// Whether route matching is case sensitive.
    fn case_sensitive(&self) -> bool;

    /// Whether a trailing slash makes a route distinct.
    fn strict(&self) -> bool;
}

impl<T: RoutingSettings + ?Sized> RoutingSettings for &T {
    fn case_sensitive(&self) -> bool {
        (**self).case_sensitive()
    }

    fn strict(&self) -> bool {
        (**self).strict()
    }
}

impl<T: RoutingSettings + ?Sized> RoutingSettings for Box<T> {
    fn case_sensitive(&self) -> bool {
        (**self).case_sensitive()
    }

    fn strict(&self) -> bool {
        (**self).strict()
    }
}

/// Explicit routing configuration.
///
/// Defaults to case-insensitive, non-strict routing. Serializes with the
/// camelCase field names routers use for their options:
///
/// ```rust
/// use resource_router::RoutingConfig;
///
/// let config: RoutingConfig = serde_json::from_str(r#"{"caseSensitive": true}"#).unwrap();
/// assert!(config.is_case_sensitive());
/// assert!(!config.is_strict());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    case_sensitive: bool,
    strict: bool,
}

impl RoutingConfig {
    /// Case-sensitive, strict routing: routes render exactly as normalized.
    pub const EXACT: Self = Self {
        case_sensitive: true,
        strict: true,
    };

    /// Creates the default configuration (case-insensitive, non-strict).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            case_sensitive: false,
            strict: false,
        }
    }

    /// Sets case sensitivity.
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets strict routing.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns whether routing is case sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns whether routing is strict.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Captures the current settings of any routing source.
    #[must_use]
    pub fn from_settings(settings: &(impl RoutingSettings + ?Sized)) -> Self {
        Self {
            case_sensitive: settings.case_sensitive(),
            strict: settings.strict(),
        }
    }
}

impl RoutingSettings for RoutingConfig {
    fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn strict(&self) -> bool {
        self.strict
    }
}

// Verify config types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RoutingConfig>();
    assert_send_sync::<AppSettings>();
};
