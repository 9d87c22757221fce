use crate::error::ResolveError;
use crate::handler::{HandlerType, TypeLoader};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Suffix appended to the primary candidate to form the fallback candidate.
pub const PAGE_SUFFIX: &str = "Page";

/// Ordered candidate type names for a path (never more than two).
pub type Candidates = SmallVec<[String; 2]>;

/// Strip the file extension of the last path segment.
///
/// `/pages/edit-customer.htm` → `/pages/edit-customer`. A dot inside a
/// directory name is not an extension.
#[must_use]
pub fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[..segment_start + dot],
        None => path,
    }
}

/// CamelCase a class-name seed: tokens split on `_` and `-`, each token's
/// first character upper-cased, concatenated without separator.
///
/// `edit-customer` → `EditCustomer`, `order_line-item` → `OrderLineItem`.
#[must_use]
pub fn camel_case(seed: &str) -> String {
    let mut out = String::with_capacity(seed.len());
    for token in seed.split(['_', '-']).filter(|t| !t.is_empty()) {
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Candidate fully-qualified type names for `path` under `package`.
///
/// Every directory segment becomes a package component, unchanged; the last
/// segment is camel-cased into the class name. The `Page`-suffixed fallback
/// is omitted when the primary name already ends in `Page`.
///
/// ```rust
/// use pagerouter::mapping::candidates;
///
/// let names = candidates("/admin/add-customer.htm", "com.mycorp");
/// assert_eq!(
///     names.as_slice(),
///     ["com.mycorp.admin.AddCustomer", "com.mycorp.admin.AddCustomerPage"]
/// );
/// ```
#[must_use]
pub fn candidates(path: &str, package: &str) -> Candidates {
    let stripped = strip_extension(path);
    let mut segments: SmallVec<[&str; 8]> =
        stripped.split('/').filter(|s| !s.is_empty()).collect();

    let mut out = Candidates::new();
    let Some(seed) = segments.pop() else {
        return out;
    };
    let class_name = camel_case(seed);
    if class_name.is_empty() {
        return out;
    }

    let mut primary = String::with_capacity(package.len() + stripped.len() + 1);
    for component in std::iter::once(package)
        .chain(segments.iter().copied())
        .filter(|c| !c.is_empty())
    {
        primary.push_str(component);
        primary.push('.');
    }
    primary.push_str(&class_name);

    let fallback =
        (!primary.ends_with(PAGE_SUFFIX)).then(|| format!("{primary}{PAGE_SUFFIX}"));
    out.push(primary);
    out.extend(fallback);
    out
}

/// Maps request paths to page types by naming convention.
#[derive(Debug, Clone, Default)]
pub struct NameMapper {
    package: String,
}

impl NameMapper {
    /// Create a mapper for `package`. Surrounding whitespace and trailing
    /// dots are removed.
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self {
            package: package.trim().trim_end_matches('.').to_string(),
        }
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn candidates(&self, path: &str) -> Candidates {
        candidates(path, &self.package)
    }

    /// Qualify a type name declared relative to the package.
    #[must_use]
    pub fn qualify(&self, type_name: &str) -> String {
        if self.package.is_empty() {
            type_name.to_string()
        } else {
            format!("{}.{}", self.package, type_name)
        }
    }

    /// Resolve `path` to a page type.
    ///
    /// Candidates are tried in order; the first that loads wins. A candidate
    /// that loads but is not a page is a configuration error, not a reason to
    /// try the next one. `Ok(None)` means no candidate exists.
    pub fn resolve(
        &self,
        path: &str,
        loader: &dyn TypeLoader,
    ) -> Result<Option<HandlerType>, ResolveError> {
        let names = self.candidates(path);
        for name in &names {
            let Some(descriptor) = loader.load_type(name) else {
                trace!(path = %path, candidate = %name, "type not found");
                continue;
            };
            return HandlerType::from_descriptor(descriptor)
                .map(Some)
                .map_err(|d| ResolveError::ConfigTypeMismatch {
                    path: path.to_string(),
                    type_name: d.name().to_string(),
                });
        }
        debug!(path = %path, candidates = ?names, "no page type found");
        Ok(None)
    }
}
