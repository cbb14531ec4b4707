//! Path normalization and route canonicalization.
//!
//! Resource addresses are stored as a `(collection, name)` pair:
//!
//! - `collection` is `""` for the root, otherwise a `/`-prefixed path with no
//!   trailing slash (e.g. `/users/jdoe/orders`).
//! - `name` is always a single `/`-prefixed segment (e.g. `/12345`). A trailing
//!   slash on the input survives as `/12345/`, marking a collection-like resource.
//!
//! Runs of slashes collapse to a single separator everywhere.
//!
//! # Canonicalization
//!
//! [`canonicalize`] renders a raw path the way a router would match it:
//!
//! | case sensitive | strict | result for `/Users/JDoe/` |
//! |---|---|---|
//! | no  | no  | `/users/jdoe` |
//! | no  | yes | `/users/jdoe/` |
//! | yes | no  | `/Users/JDoe` |
//! | yes | yes | `/Users/JDoe/` |
//!
//! # Example
//!
//! ```rust
//! use resource_router::rest::{canonicalize, normalize_collection, split_path};
//!
//! let (collection, name) = split_path("users//JDoe/orders/");
//! assert_eq!(collection, "/users/JDoe");
//! assert_eq!(name, "/orders/");
//!
//! assert_eq!(normalize_collection("//"), "");
//! assert_eq!(canonicalize("/Users/JDoe/", false, false), "/users/jdoe");
//! ```

use crate::rest::ResourceError;

/// The root route.
pub const ROOT: &str = "/";

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment);
    }
    joined
}

fn name_from_segment(segment: &str, trailing_slash: bool) -> String {
    if segment.is_empty() {
        ROOT.to_string()
    } else if trailing_slash {
        format!("/{segment}/")
    } else {
        format!("/{segment}")
    }
}

/// Normalizes a collection path.
///
/// Adds a leading slash, collapses duplicate slashes, and removes the trailing
/// slash. Empty and slash-only inputs become `""` (the root collection).
///
/// # Example
///
/// ```rust
/// use resource_router::rest::normalize_collection;
///
/// assert_eq!(normalize_collection("users/jdoe/orders/"), "/users/jdoe/orders");
/// assert_eq!(normalize_collection("/"), "");
/// ```
#[must_use]
pub fn normalize_collection(collection: &str) -> String {
    join_segments(segments(collection))
}

/// Normalizes an explicit resource name.
///
/// The result starts with exactly one slash. A trailing slash on the input is
/// kept, unless the name is otherwise empty.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidArgument`] if the name contains a slash
/// anywhere other than its ends.
///
/// # Example
///
/// ```rust
/// use resource_router::rest::normalize_name;
///
/// assert_eq!(normalize_name("12345/").unwrap(), "/12345/");
/// assert_eq!(normalize_name("//").unwrap(), "/");
/// assert!(normalize_name("/jdoe/orders").is_err());
/// ```
pub fn normalize_name(name: &str) -> Result<String, ResourceError> {
    let segment = name.trim_matches('/');
    if segment.contains('/') {
        return Err(ResourceError::InvalidArgument {
            name: name.to_string(),
        });
    }
    Ok(name_from_segment(segment, name.ends_with('/')))
}

/// Splits a combined path into a normalized `(collection, name)` pair.
///
/// The last non-empty segment becomes the name (keeping a trailing slash if
/// the path had one); everything before it becomes the collection.
///
/// # Example
///
/// ```rust
/// use resource_router::rest::split_path;
///
/// assert_eq!(split_path("/users/jdoe/orders"), ("/users/jdoe".to_string(), "/orders".to_string()));
/// assert_eq!(split_path("users"), (String::new(), "/users".to_string()));
/// assert_eq!(split_path("//"), (String::new(), "/".to_string()));
/// ```
#[must_use]
pub fn split_path(path: &str) -> (String, String) {
    let mut parts: Vec<&str> = segments(path).collect();
    let last = parts.pop().unwrap_or_default();

    (
        join_segments(parts.into_iter()),
        name_from_segment(last, path.ends_with('/')),
    )
}

/// Renders a raw path as a route string.
///
/// When `strict` is false the trailing slash is removed, though the bare root
/// stays `/`. When `case_sensitive` is false the whole route is lower-cased.
/// An empty raw path is treated as the root.
#[must_use]
pub fn canonicalize(raw: &str, case_sensitive: bool, strict: bool) -> String {
    let mut route = if raw.is_empty() { ROOT } else { raw };

    if !strict {
        route = route.trim_end_matches('/');
        if route.is_empty() {
            route = ROOT;
        }
    }

    if case_sensitive {
        route.to_string()
    } else {
        route.to_lowercase()
    }
}
