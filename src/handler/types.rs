use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Name of the built-in handler served for excluded paths.
pub const EXCLUDED_TYPE_NAME: &str = "pagerouter.ExcludedPage";
/// Name of the built-in error page handler.
pub const ERROR_PAGE_TYPE_NAME: &str = "pagerouter.ErrorPage";
/// Name of the built-in not-found page handler.
pub const NOT_FOUND_TYPE_NAME: &str = "pagerouter.NotFoundPage";

/// Whether a loaded type derives from the framework's page base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A handler type that can service requests
    Page,
    /// Any other type that happens to be loadable under the same name
    Other,
}

/// A type returned by a [`TypeLoader`], not yet checked to be a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Arc<str>,
    kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Arc<str>>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn page(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Page)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The `isSubtypeOf(descriptor, Page)` check.
    #[must_use]
    pub fn is_page(&self) -> bool {
        self.kind == TypeKind::Page
    }
}

/// A validated page type: the identity stored in the route table.
///
/// Only constructible from a [`TypeDescriptor`] whose kind is
/// [`TypeKind::Page`], so every `HandlerType` in a table is known to be a
/// page. Equality and hashing use the fully-qualified name.
#[derive(Debug, Clone)]
pub struct HandlerType(TypeDescriptor);

impl HandlerType {
    /// Returns the descriptor back if it is not a page type.
    pub fn from_descriptor(descriptor: TypeDescriptor) -> Result<Self, TypeDescriptor> {
        if descriptor.is_page() {
            Ok(Self(descriptor))
        } else {
            Err(descriptor)
        }
    }

    /// Sentinel handler for paths vetoed by an exclusion rule.
    #[must_use]
    pub fn excluded() -> Self {
        Self(TypeDescriptor::page(EXCLUDED_TYPE_NAME))
    }

    /// Built-in error page.
    #[must_use]
    pub fn error_page() -> Self {
        Self(TypeDescriptor::page(ERROR_PAGE_TYPE_NAME))
    }

    /// Built-in not-found page.
    #[must_use]
    pub fn not_found() -> Self {
        Self(TypeDescriptor::page(NOT_FOUND_TYPE_NAME))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.0
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.name() == EXCLUDED_TYPE_NAME
    }

    /// True for the sentinels this crate provides itself.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(
            self.name(),
            EXCLUDED_TYPE_NAME | ERROR_PAGE_TYPE_NAME | NOT_FOUND_TYPE_NAME
        )
    }
}

impl PartialEq for HandlerType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for HandlerType {}

impl Hash for HandlerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field of a page type that accepts request-bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Arc<str>,
    /// Declared value type, e.g. `String`, `i64`, `TextField`
    pub value_type: Arc<str>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Arc<str>>, value_type: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
        }
    }
}

/// Bindable fields of a page type keyed by field name.
pub type FieldIndex = BTreeMap<Arc<str>, FieldDescriptor>;

/// Loads a type by fully-qualified name.
///
/// Implementations may look types up dynamically or in a registration table;
/// either way they must be safe to call from the resolver while it holds its
/// resolution lock.
pub trait TypeLoader: Send + Sync {
    fn load_type(&self, name: &str) -> Option<TypeDescriptor>;
}

/// Describes the bindable fields of a loaded type.
///
/// The result reflects the static structure of the type, so callers may
/// memoize it forever.
pub trait TypeIntrospector: Send + Sync {
    fn describe_bindable_fields(&self, descriptor: &TypeDescriptor) -> FieldIndex;
}

impl<T: TypeLoader + ?Sized> TypeLoader for Arc<T> {
    fn load_type(&self, name: &str) -> Option<TypeDescriptor> {
        (**self).load_type(name)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn describe_bindable_fields(&self, descriptor: &TypeDescriptor) -> FieldIndex {
        (**self).describe_bindable_fields(descriptor)
    }
}
