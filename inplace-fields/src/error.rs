//! Error types for the in-place markup engine

use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Validation failures in an options bag.
///
/// Data problems (missing id, blank value, unmatched select label) never
/// surface here; the renderer degrades gracefully for those.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Both `display_as` and `display_with` were supplied
    #[error("conflicting display options")]
    ConflictingDisplayOptions,

    /// `display_with` names a formatter the lookup does not know
    #[error("unknown display helper: {name}")]
    UnknownDisplayHelper { name: String },

    /// `display_as` names a method the record does not expose
    #[error("unknown display method '{name}' on {type_name}")]
    UnknownDisplayMethod { name: String, type_name: String },

    /// A route mapping the router cannot expand
    #[error("unresolvable route: {route}")]
    UnresolvableRoute { route: String },

    /// No `path` option and nothing to derive a url from
    #[error("no path given for {type_name} and it has no identity to route")]
    MissingPath { type_name: String },

    /// Collection does not fit the widget
    #[error("invalid collection for {widget}: {reason}")]
    InvalidCollection { widget: String, reason: String },

    /// Collection or data attribute serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
