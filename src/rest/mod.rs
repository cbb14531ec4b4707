//! REST resource addressing.
//!
//! This module provides the resource model consulted by the serving layer:
//!
//! - **[`Resource`]**: a normalized `(collection, name)` address with data and timestamps
//! - **[`Payload`]**: resource data, with the kind-dispatched merge policy
//! - **Path handling**: normalization of collection paths and names, and
//!   canonicalization of routes under case/strict routing rules
//! - **[`Resource::parse`]**: loading resources from JSON text or decoded data
//! - **[`ResourceError`]**: the two failure modes, plus JSON error bodies
//!
//! # Example
//!
//! ```rust
//! use resource_router::rest::Resource;
//! use resource_router::RoutingConfig;
//!
//! let resource = Resource::from_collection_and_name("users/JDoe", "orders/", ()).unwrap();
//! assert_eq!(resource.path(), "/users/JDoe/orders/");
//!
//! let strict = RoutingConfig::new().with_strict(true);
//! assert_eq!(resource.value_of(Some(&strict), false), "/users/jdoe/orders/");
//! assert_eq!(resource.value_of(None, false), "/users/jdoe/orders");
//! ```

mod errors;
mod parse;
mod path;
mod payload;
mod resource;

// Public exports
pub use errors::{ErrorDetails, ErrorResponse, ResourceError};
pub use parse::{ParseInput, Parsed};
pub use path::{canonicalize, normalize_collection, normalize_name, split_path, ROOT};
pub use payload::{merge_payload, IntoPayload, Payload, PayloadKind};
pub use resource::Resource;
