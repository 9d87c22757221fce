use super::types::{
    FieldDescriptor, FieldIndex, TypeDescriptor, TypeIntrospector, TypeKind, TypeLoader,
};
use crate::config::TypeDecl;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Implemented by application page types.
///
/// Rust has no runtime reflection, so a page declares the fields that accept
/// request-bound values itself. The registry records them once, at
/// registration time.
pub trait Page: Send + Sync + 'static {
    fn bindable_fields() -> Vec<FieldDescriptor>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
struct RegisteredType {
    descriptor: TypeDescriptor,
    fields: FieldIndex,
}

/// Registration-table [`TypeLoader`] and [`TypeIntrospector`].
///
/// Types are keyed by fully-qualified name. The registry may be shared
/// (`Arc<HandlerRegistry>`) and extended while a live-mode resolver is
/// serving requests: a type registered after startup is found the next time
/// its path is requested.
///
/// ```rust
/// use pagerouter::handler::{FieldDescriptor, HandlerRegistry, Page, TypeLoader};
///
/// struct EditCustomer;
/// impl Page for EditCustomer {
///     fn bindable_fields() -> Vec<FieldDescriptor> {
///         vec![FieldDescriptor::new("customer_id", "i64")]
///     }
/// }
///
/// let registry = HandlerRegistry::new();
/// registry.register::<EditCustomer>("com.mycorp.EditCustomer");
/// assert!(registry.load_type("com.mycorp.EditCustomer").unwrap().is_page());
/// ```
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    types: DashMap<Arc<str>, RegisteredType>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register page type `P` under `name`. Returns `true` if the name was
    /// not registered before; an existing registration is replaced.
    pub fn register<P: Page>(&self, name: &str) -> bool {
        self.register_descriptor(TypeDescriptor::page(name), P::bindable_fields())
    }

    /// Register a loadable type that is *not* a page. Resolving a path to it
    /// is a configuration error.
    pub fn register_other(&self, name: &str) -> bool {
        self.register_descriptor(TypeDescriptor::new(name, TypeKind::Other), Vec::new())
    }

    pub fn register_descriptor(
        &self,
        descriptor: TypeDescriptor,
        fields: impl IntoIterator<Item = FieldDescriptor>,
    ) -> bool {
        let fields: FieldIndex = fields
            .into_iter()
            .map(|f| (Arc::clone(&f.name), f))
            .collect();
        let key: Arc<str> = Arc::from(descriptor.name());
        debug!(
            handler = %key,
            kind = ?descriptor.kind(),
            fields = fields.len(),
            "registering handler type"
        );
        self.types
            .insert(key, RegisteredType { descriptor, fields })
            .is_none()
    }

    /// Register every type of a manifest. Returns the number of names that
    /// were new.
    pub fn register_manifest(&self, decls: &[TypeDecl]) -> usize {
        let added = decls
            .iter()
            .map(|decl| {
                let kind = if decl.page {
                    TypeKind::Page
                } else {
                    TypeKind::Other
                };
                let fields = decl
                    .fields
                    .iter()
                    .map(|f| FieldDescriptor::new(f.name.as_str(), f.value_type.as_str()));
                self.register_descriptor(TypeDescriptor::new(decl.name.as_str(), kind), fields)
            })
            .filter(|&added| added)
            .count();
        info!(
            declared = decls.len(),
            added = added,
            total = self.types.len(),
            "handler manifest registered"
        );
        added
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().to_string()).collect();
        names.sort();
        names
    }
}

impl TypeLoader for HandlerRegistry {
    fn load_type(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|t| t.descriptor.clone())
    }
}

impl TypeIntrospector for HandlerRegistry {
    fn describe_bindable_fields(&self, descriptor: &TypeDescriptor) -> FieldIndex {
        self.types
            .get(descriptor.name())
            .map(|t| t.fields.clone())
            .unwrap_or_default()
    }
}
