use std::fmt;
use std::io;

/// Errors raised while building or querying a [`ResolutionCache`].
///
/// Startup variants (`MissingRequiredAttribute`, `UnknownType`,
/// `ConfigTypeMismatch`, `InvalidHeader`, `ResourceScan`) abort
/// [`ResolutionCache::init`]. An unmapped path is never an error: it is
/// reported as `Ok(None)`.
///
/// [`ResolutionCache`]: crate::resolver::ResolutionCache
/// [`ResolutionCache::init`]: crate::resolver::ResolutionCache::init
#[derive(Debug)]
pub enum ResolveError {
    /// A type was found for the path but it is not a page type.
    ///
    /// Fatal at startup for explicit routes and EAGER automapping. In LAZY
    /// mode it is returned from `resolve` as a configuration fault instead of
    /// being treated as "not found".
    ConfigTypeMismatch {
        /// Request path that was being mapped
        path: String,
        /// Fully-qualified name of the offending type
        type_name: String,
    },
    /// `path_for` was asked for a type bound to more than one path.
    AmbiguousReverseMapping {
        /// Fully-qualified name of the handler type
        type_name: String,
        /// Every path the type is bound to, in insertion order
        paths: Vec<String>,
    },
    /// A declared route lacks a required attribute.
    MissingRequiredAttribute {
        /// The declaration that is incomplete (e.g. `page`)
        element: String,
        /// The missing attribute (e.g. `type`)
        attribute: &'static str,
    },
    /// An explicit route names a type the loader does not know.
    UnknownType {
        /// Declared route path
        path: String,
        /// Fully-qualified type name that failed to load
        type_name: String,
    },
    /// A header declaration carries an unknown type tag or a bad value.
    InvalidHeader {
        /// Header name
        name: String,
        /// Human readable reason
        reason: String,
    },
    /// The resource provider failed while enumerating candidate paths.
    ResourceScan {
        /// Root that was being scanned
        root: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The cache has been shut down.
    ShutDown,
}

impl ResolveError {
    /// True for errors that indicate broken configuration rather than a
    /// transient or caller-side condition.
    #[must_use]
    pub fn is_configuration_fault(&self) -> bool {
        !matches!(
            self,
            ResolveError::AmbiguousReverseMapping { .. } | ResolveError::ShutDown
        )
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ConfigTypeMismatch { path, type_name } => write!(
                f,
                "type '{type_name}' mapped to '{path}' is not a page type"
            ),
            ResolveError::AmbiguousReverseMapping { type_name, paths } => write!(
                f,
                "page type '{type_name}' resolves to multiple paths: {}",
                paths.join(", ")
            ),
            ResolveError::MissingRequiredAttribute { element, attribute } => {
                write!(f, "'{element}' element missing '{attribute}' attribute")
            }
            ResolveError::UnknownType { path, type_name } => {
                write!(f, "no page type '{type_name}' found for path '{path}'")
            }
            ResolveError::InvalidHeader { name, reason } => {
                write!(f, "invalid header '{name}': {reason}")
            }
            ResolveError::ResourceScan { root, source } => {
                write!(f, "failed to list resources under '{root}': {source}")
            }
            ResolveError::ShutDown => write!(f, "resolution cache has been shut down"),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::ResourceScan { source, .. } => Some(source),
            _ => None,
        }
    }
}
