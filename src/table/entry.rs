use crate::handler::{FieldIndex, HandlerType};
use crate::headers::PageHeaders;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// How an entry came to be in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Declared in configuration
    Explicit,
    /// Provided by the framework when not configured (error/not-found pages)
    Builtin,
    /// Inferred from the path by naming convention
    Automapped,
    /// Vetoed by an exclusion rule
    Excluded,
}

impl Origin {
    /// Declared entries take precedence over anything inferred.
    #[must_use]
    pub fn is_declared(self) -> bool {
        matches!(self, Origin::Explicit | Origin::Builtin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Explicit => "explicit",
            Origin::Builtin => "builtin",
            Origin::Automapped => "automapped",
            Origin::Excluded => "excluded",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix `path` with `/` when missing.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Immutable route metadata for one path.
///
/// Shared as `Arc<PageEntry>`. Everything except the bindable-field index is
/// fixed at construction; the index is filled at most once.
pub struct PageEntry {
    path: String,
    handler: HandlerType,
    headers: PageHeaders,
    origin: Origin,
    fields: OnceCell<Arc<FieldIndex>>,
}

impl PageEntry {
    /// Build an entry. The path is normalized to start with `/`.
    pub fn new(path: &str, handler: HandlerType, headers: PageHeaders, origin: Origin) -> Self {
        Self {
            path: normalize_path(path),
            handler,
            headers,
            origin,
            fields: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn handler(&self) -> &HandlerType {
        &self.handler
    }

    #[must_use]
    pub fn headers(&self) -> &PageHeaders {
        &self.headers
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.origin == Origin::Excluded
    }

    /// The field index, computing it with `init` on first access.
    pub fn bindable_fields<F>(&self, init: F) -> Arc<FieldIndex>
    where
        F: FnOnce() -> Arc<FieldIndex>,
    {
        Arc::clone(self.fields.get_or_init(init))
    }

    /// The field index if it has been computed already.
    #[must_use]
    pub fn cached_fields(&self) -> Option<&Arc<FieldIndex>> {
        self.fields.get()
    }
}

impl fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEntry")
            .field("path", &self.path)
            .field("handler", &self.handler.name())
            .field("origin", &self.origin)
            .field("headers", &self.headers.len())
            .field("fields_cached", &self.fields.get().is_some())
            .finish()
    }
}
