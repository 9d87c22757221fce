use crate::config::{RouteDecl, Settings};
use crate::error::ResolveError;
use crate::handler::{HandlerType, TypeLoader};
use crate::headers::PageHeaders;
use crate::mapping::{ExclusionMatcher, NameMapper};
use crate::resources::ResourceProvider;
use crate::table::{normalize_path, Origin, PageEntry, RouteTable};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Path of the built-in error page.
pub const ERROR_PAGE_PATH: &str = "/_sys/error.htm";
/// Path of the built-in not-found page.
pub const NOT_FOUND_PAGE_PATH: &str = "/_sys/not-found.htm";

/// Everything needed to turn a path into a [`PageEntry`].
pub(crate) struct Inference {
    pub(crate) mapper: NameMapper,
    pub(crate) exclusions: ExclusionMatcher,
    pub(crate) loader: Arc<dyn TypeLoader>,
    pub(crate) common_headers: PageHeaders,
    pub(crate) excluded_headers: PageHeaders,
}

impl Inference {
    pub(crate) fn new(settings: &Settings, loader: Arc<dyn TypeLoader>) -> Self {
        Self {
            mapper: NameMapper::new(&settings.package),
            exclusions: ExclusionMatcher::from_patterns(&settings.exclusions),
            loader,
            common_headers: settings.common_headers.clone(),
            excluded_headers: PageHeaders::for_excluded(&settings.common_headers),
        }
    }

    /// Exclusion first, then the naming convention. `Ok(None)` when neither
    /// applies.
    pub(crate) fn infer(&self, path: &str) -> Result<Option<PageEntry>, ResolveError> {
        if let Some(rule) = self.exclusions.matching_rule(path) {
            debug!(path = %path, rule = %rule, "path excluded from automapping");
            return Ok(Some(PageEntry::new(
                path,
                HandlerType::excluded(),
                self.excluded_headers.clone(),
                Origin::Excluded,
            )));
        }
        let Some(handler) = self.mapper.resolve(path, self.loader.as_ref())? else {
            return Ok(None);
        };
        debug!(path = %path, handler = %handler, "automapped page");
        Ok(Some(PageEntry::new(
            path,
            handler,
            self.common_headers.clone(),
            Origin::Automapped,
        )))
    }

    /// Type names are relative to the package unless already qualified.
    fn qualify(&self, type_name: &str) -> String {
        let package = self.mapper.package();
        if package.is_empty()
            || type_name
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with('.'))
        {
            type_name.to_string()
        } else {
            self.mapper.qualify(type_name)
        }
    }

    pub(crate) fn explicit_entry(&self, decl: &RouteDecl) -> Result<PageEntry, ResolveError> {
        if decl.path.trim().is_empty() {
            return Err(ResolveError::MissingRequiredAttribute {
                element: "page".to_string(),
                attribute: "path",
            });
        }
        let path = normalize_path(decl.path.trim());
        if decl.type_name.trim().is_empty() {
            return Err(ResolveError::MissingRequiredAttribute {
                element: format!("page '{path}'"),
                attribute: "type",
            });
        }
        let type_name = self.qualify(decl.type_name.trim());
        let descriptor =
            self.loader
                .load_type(&type_name)
                .ok_or_else(|| ResolveError::UnknownType {
                    path: path.clone(),
                    type_name: type_name.clone(),
                })?;
        let handler = HandlerType::from_descriptor(descriptor).map_err(|d| {
            ResolveError::ConfigTypeMismatch {
                path: path.clone(),
                type_name: d.name().to_string(),
            }
        })?;
        let headers = PageHeaders::merged(&self.common_headers, &decl.headers);
        trace!(path = %path, handler = %handler, "explicit page");
        Ok(PageEntry::new(&path, handler, headers, Origin::Explicit))
    }
}

/// Insert every explicit route. Any failure aborts the build.
pub(crate) fn insert_explicit(
    table: &mut RouteTable,
    inference: &Inference,
    routes: &[RouteDecl],
) -> Result<(), ResolveError> {
    for decl in routes {
        let entry = inference.explicit_entry(decl)?;
        table.insert(Arc::new(entry));
    }
    Ok(())
}

/// Walk every resource and automap the ones not explicitly configured.
pub(crate) fn scan_resources(
    table: &mut RouteTable,
    inference: &Inference,
    settings: &Settings,
    resources: &dyn ResourceProvider,
) -> Result<(), ResolveError> {
    let paths = resources
        .list_resource_paths()
        .map_err(|source| ResolveError::ResourceScan {
            root: resources.root(),
            source,
        })?;

    let mut automapped = 0usize;
    for raw in &paths {
        let path = normalize_path(raw);
        if !settings.is_template(&path) {
            trace!(path = %path, "not a template, skipped");
            continue;
        }
        if table.contains_path(&path) {
            continue;
        }
        match inference.infer(&path)? {
            Some(entry) => {
                if table.insert(Arc::new(entry)) {
                    automapped += 1;
                }
            }
            None => debug!(path = %path, "no page type for resource"),
        }
    }
    info!(
        root = %resources.root(),
        resources = paths.len(),
        automapped = automapped,
        "resource scan complete"
    );
    Ok(())
}

/// Map the error and not-found pages unless something already claims them.
pub(crate) fn insert_builtins(table: &mut RouteTable) {
    for (path, handler) in [
        (ERROR_PAGE_PATH, HandlerType::error_page()),
        (NOT_FOUND_PAGE_PATH, HandlerType::not_found()),
    ] {
        if !table.contains_path(path) {
            table.insert(Arc::new(PageEntry::new(
                path,
                handler,
                PageHeaders::new(),
                Origin::Builtin,
            )));
        }
    }
}
