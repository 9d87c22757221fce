use super::entry::PageEntry;
use crate::error::ResolveError;
use crate::handler::HandlerType;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entries bound to one handler type.
#[derive(Debug, Clone)]
pub enum TypeBinding {
    Single(Arc<PageEntry>),
    /// Two or more distinct paths, in insertion order
    Multiple(Vec<Arc<PageEntry>>),
}

impl TypeBinding {
    #[must_use]
    pub fn entries(&self) -> &[Arc<PageEntry>] {
        match self {
            TypeBinding::Single(entry) => std::slice::from_ref(entry),
            TypeBinding::Multiple(entries) => entries,
        }
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.path().to_string()).collect()
    }

    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, TypeBinding::Multiple(_))
    }

    fn with(self, entry: Arc<PageEntry>) -> Self {
        match self {
            TypeBinding::Single(first) => TypeBinding::Multiple(vec![first, entry]),
            TypeBinding::Multiple(mut entries) => {
                entries.push(entry);
                TypeBinding::Multiple(entries)
            }
        }
    }

    fn without(self, path: &str) -> Option<Self> {
        let mut remaining: Vec<Arc<PageEntry>> = match self {
            TypeBinding::Single(entry) => vec![entry],
            TypeBinding::Multiple(entries) => entries,
        };
        remaining.retain(|e| e.path() != path);
        match remaining.len() {
            0 => None,
            1 => remaining.pop().map(TypeBinding::Single),
            _ => Some(TypeBinding::Multiple(remaining)),
        }
    }
}

/// Path and handler-type indices over [`PageEntry`].
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    by_path: HashMap<String, Arc<PageEntry>>,
    by_type: HashMap<HandlerType, TypeBinding>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`, returning whether it was stored.
    ///
    /// A path is only taken over when it is free, or when the stored entry
    /// was inferred and the new one is declared. Inferred entries never
    /// replace anything.
    pub fn insert(&mut self, entry: Arc<PageEntry>) -> bool {
        if let Some(existing) = self.by_path.get(entry.path()) {
            if existing.origin().is_declared() || !entry.origin().is_declared() {
                if existing.origin().is_declared() && entry.origin().is_declared() {
                    warn!(
                        path = %entry.path(),
                        kept = %existing.handler(),
                        ignored = %entry.handler(),
                        "duplicate page declaration ignored"
                    );
                }
                return false;
            }
        }

        if let Some(replaced) = self
            .by_path
            .insert(entry.path().to_string(), Arc::clone(&entry))
        {
            debug!(
                path = %replaced.path(),
                replaced = %replaced.handler(),
                handler = %entry.handler(),
                "declared page replaces inferred page"
            );
            self.unbind(&replaced);
        }
        self.bind(entry);
        true
    }

    fn bind(&mut self, entry: Arc<PageEntry>) {
        let handler = entry.handler().clone();
        let binding = match self.by_type.remove(&handler) {
            None => TypeBinding::Single(entry),
            Some(binding) => binding.with(entry),
        };
        self.by_type.insert(handler, binding);
    }

    fn unbind(&mut self, entry: &PageEntry) {
        if let Some(binding) = self.by_type.remove(entry.handler()) {
            if let Some(rest) = binding.without(entry.path()) {
                self.by_type.insert(entry.handler().clone(), rest);
            }
        }
    }

    #[must_use]
    pub fn lookup_by_path(&self, path: &str) -> Option<Arc<PageEntry>> {
        self.by_path.get(path).map(Arc::clone)
    }

    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// The single entry bound to `handler`.
    ///
    /// Fails with [`ResolveError::AmbiguousReverseMapping`] when the type
    /// serves more than one path.
    pub fn lookup_by_type(
        &self,
        handler: &HandlerType,
    ) -> Result<Option<Arc<PageEntry>>, ResolveError> {
        match self.by_type.get(handler) {
            None => Ok(None),
            Some(TypeBinding::Single(entry)) => Ok(Some(Arc::clone(entry))),
            Some(binding @ TypeBinding::Multiple(_)) => {
                Err(ResolveError::AmbiguousReverseMapping {
                    type_name: handler.name().to_string(),
                    paths: binding.paths(),
                })
            }
        }
    }

    #[must_use]
    pub fn binding(&self, handler: &HandlerType) -> Option<&TypeBinding> {
        self.by_type.get(handler)
    }

    /// Any entry bound to `handler`, ambiguous or not.
    #[must_use]
    pub fn any_entry_for(&self, handler: &HandlerType) -> Option<Arc<PageEntry>> {
        self.by_type
            .get(handler)
            .and_then(|b| b.entries().first())
            .map(Arc::clone)
    }

    /// Distinct handler types, sorted by name.
    #[must_use]
    pub fn handler_types(&self) -> Vec<HandlerType> {
        let mut types: Vec<HandlerType> = self.by_type.keys().cloned().collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PageEntry>> {
        self.by_path.values()
    }

    /// All entries, sorted by path.
    #[must_use]
    pub fn entries(&self) -> Vec<Arc<PageEntry>> {
        let mut entries: Vec<Arc<PageEntry>> = self.by_path.values().map(Arc::clone).collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
