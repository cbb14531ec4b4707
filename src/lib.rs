//! # Resource Router
//!
//! REST-style resource addressing for mock and serving middleware that sits
//! in front of an HTTP application framework.
//!
//! ## Overview
//!
//! This crate provides:
//! - A [`Resource`] model that normalizes paths given in several shapes into a
//!   `(collection, name)` address
//! - A recursive merge policy for resource data via [`Resource::merge`]
//! - Route canonicalization that matches a router's case-sensitive and strict
//!   routing settings via [`Resource::value_of`]
//! - Loading resources from JSON text or decoded data via [`Resource::parse`]
//! - Routing configuration through [`RoutingConfig`], [`AppSettings`], or any
//!   [`RoutingSettings`] implementor
//!
//! It performs no I/O. The serving layer builds resources from request paths
//! and bodies, renders them to match routes, and applies partial updates.
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_router::{Resource, RoutingConfig};
//! use serde_json::json;
//!
//! // Build from a combined path
//! let mut order = Resource::from_path_and_data("/users/JDoe/orders/12345", json!({"total": 10}));
//! assert_eq!(order.collection(), "/users/JDoe/orders");
//! assert_eq!(order.name(), "/12345");
//!
//! // Apply a partial update
//! order.merge(json!({"status": "shipped"}));
//!
//! // Render the route for a case-sensitive router
//! let config = RoutingConfig::new().with_case_sensitive(true);
//! assert_eq!(order.to_route(Some(&config)), "/users/JDoe/orders/12345");
//!
//! // Or for the default, case-insensitive router
//! assert_eq!(order.to_string(), "/users/jdoe/orders/12345");
//! ```
//!
//! ## Loading Fixtures
//!
//! ```rust
//! use resource_router::Resource;
//!
//! let fixtures = r#"[
//!     {"collection": "/users", "name": "/jdoe", "data": {"name": "John"}},
//!     {"collection": "", "name": "/", "data": "<h1>hello world</h1>"}
//! ]"#;
//!
//! let resources = Resource::parse(fixtures).unwrap().into_vec();
//! assert_eq!(resources.len(), 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Permissive normalization**: odd paths are normalized, never rejected
//! - **Two errors only**: slash-containing names and unreadable serialized input
//! - **No global state**: routing settings are passed explicitly
//! - **Thread-safe values**: all types are `Send + Sync`; a resource is owned by its caller

pub mod config;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AppSettings, RoutingConfig, RoutingSettings};
pub use rest::{
    ErrorResponse, IntoPayload, ParseInput, Parsed, Payload, PayloadKind, Resource, ResourceError,
};
