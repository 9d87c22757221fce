use super::build::{
    insert_builtins, insert_explicit, scan_resources, Inference, ERROR_PAGE_PATH,
    NOT_FOUND_PAGE_PATH,
};
use crate::config::Settings;
use crate::error::ResolveError;
use crate::handler::{FieldIndex, HandlerRegistry, HandlerType, TypeIntrospector, TypeLoader};
use crate::headers::PageHeaders;
use crate::mode::Mode;
use crate::resources::ResourceProvider;
use crate::table::{normalize_path, PageEntry, RouteTable};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How the route table is held, fixed at [`ResolutionCache::init`].
#[derive(Debug)]
pub enum ResolutionStrategy {
    /// Built once at startup and never modified. Reads take no lock.
    Eager(RouteTable),
    /// Filled on demand. Every lookup, hit or miss, runs under the mutex.
    Lazy(Mutex<RouteTable>),
}

impl ResolutionStrategy {
    #[must_use]
    pub fn is_eager(&self) -> bool {
        matches!(self, ResolutionStrategy::Eager(_))
    }
}

/// Request path → page resolution, with per-type field metadata.
///
/// Build one with [`ResolutionCache::init`] and share it as
/// `Arc<ResolutionCache>`; every method takes `&self`.
///
/// ```rust
/// use pagerouter::handler::{HandlerRegistry, Page};
/// use pagerouter::resources::StaticResources;
/// use pagerouter::{Mode, ResolutionCache, Settings};
/// use std::sync::Arc;
///
/// struct EditCustomer;
/// impl Page for EditCustomer {}
///
/// let registry = Arc::new(HandlerRegistry::new());
/// registry.register::<EditCustomer>("com.mycorp.EditCustomer");
///
/// let cache = ResolutionCache::with_registry(
///     Settings::new(Mode::Production, "com.mycorp"),
///     registry,
///     &StaticResources::new(["/edit-customer.htm"]),
/// )
/// .unwrap();
///
/// let entry = cache.resolve("/edit-customer.htm").unwrap().unwrap();
/// assert_eq!(entry.handler().name(), "com.mycorp.EditCustomer");
/// ```
pub struct ResolutionCache {
    mode: Mode,
    automapping: bool,
    autobinding: bool,
    template_extensions: Vec<String>,
    inference: Inference,
    introspector: Arc<dyn TypeIntrospector>,
    strategy: ResolutionStrategy,
    fields: DashMap<HandlerType, Arc<FieldIndex>>,
    error_handler: HandlerType,
    not_found_handler: HandlerType,
    shut_down: AtomicBool,
}

impl ResolutionCache {
    /// Build the cache.
    ///
    /// In an eager mode the resources are scanned and every template is
    /// automapped now; in a lazy mode only explicit routes and the built-in
    /// pages are loaded and `resources` is not consulted. Any configuration
    /// fault aborts the build.
    pub fn init(
        settings: Settings,
        loader: Arc<dyn TypeLoader>,
        introspector: Arc<dyn TypeIntrospector>,
        resources: &dyn ResourceProvider,
    ) -> Result<Self, ResolveError> {
        let inference = Inference::new(&settings, loader);
        let mut table = RouteTable::new();

        insert_explicit(&mut table, &inference, &settings.explicit_routes)?;
        if settings.mode.is_eager() {
            if settings.automapping {
                scan_resources(&mut table, &inference, &settings, resources)?;
            } else {
                debug!("automapping disabled, resource scan skipped");
            }
        }
        insert_builtins(&mut table);

        let error_handler = table
            .lookup_by_path(ERROR_PAGE_PATH)
            .map_or_else(HandlerType::error_page, |e| e.handler().clone());
        let not_found_handler = table
            .lookup_by_path(NOT_FOUND_PAGE_PATH)
            .map_or_else(HandlerType::not_found, |e| e.handler().clone());

        info!(
            mode = %settings.mode,
            eager = settings.mode.is_eager(),
            package = %inference.mapper.package(),
            routes_count = table.len(),
            exclusions = inference.exclusions.len(),
            "resolution cache initialized"
        );

        let strategy = if settings.mode.is_eager() {
            ResolutionStrategy::Eager(table)
        } else {
            ResolutionStrategy::Lazy(Mutex::new(table))
        };

        Ok(Self {
            mode: settings.mode,
            automapping: settings.automapping,
            autobinding: settings.autobinding,
            template_extensions: settings.template_extensions,
            inference,
            introspector,
            strategy,
            fields: DashMap::new(),
            error_handler,
            not_found_handler,
            shut_down: AtomicBool::new(false),
        })
    }

    /// [`init`](Self::init) with a registry acting as both loader and
    /// introspector.
    pub fn with_registry(
        settings: Settings,
        registry: Arc<HandlerRegistry>,
        resources: &dyn ResourceProvider,
    ) -> Result<Self, ResolveError> {
        let loader: Arc<dyn TypeLoader> = Arc::clone(&registry) as Arc<dyn TypeLoader>;
        Self::init(settings, loader, registry, resources)
    }

    /// Stop serving. Every later lookup fails with [`ResolveError::ShutDown`].
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::SeqCst) {
            info!(mode = %self.mode, "resolution cache shut down");
        }
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn ensure_running(&self) -> Result<(), ResolveError> {
        if self.is_shut_down() {
            Err(ResolveError::ShutDown)
        } else {
            Ok(())
        }
    }

    fn with_table<R>(&self, f: impl FnOnce(&RouteTable) -> R) -> Result<R, ResolveError> {
        self.ensure_running()?;
        Ok(match &self.strategy {
            ResolutionStrategy::Eager(table) => f(table),
            ResolutionStrategy::Lazy(table) => f(&*table.lock()),
        })
    }

    /// `path`, then the same path with each other template extension.
    fn lookup(&self, table: &RouteTable, path: &str) -> Option<Arc<PageEntry>> {
        if let Some(entry) = table.lookup_by_path(path) {
            return Some(entry);
        }
        let ext = self
            .template_extensions
            .iter()
            .find(|ext| path.ends_with(ext.as_str()))?;
        let stem = &path[..path.len() - ext.len()];
        self.template_extensions
            .iter()
            .filter(|other| *other != ext)
            .find_map(|other| table.lookup_by_path(&format!("{stem}{other}")))
    }

    /// Only template paths are ever automapped or excluded.
    fn is_template(&self, path: &str) -> bool {
        self.template_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }

    /// Resolve a request path to its page entry.
    ///
    /// `Ok(None)` means the path has no handler. In a lazy mode a miss is
    /// retried on every call so types registered later are picked up, and
    /// paths without a template extension are never inferred or cached.
    pub fn resolve(&self, path: &str) -> Result<Option<Arc<PageEntry>>, ResolveError> {
        self.ensure_running()?;
        let path = normalize_path(path);
        match &self.strategy {
            ResolutionStrategy::Eager(table) => Ok(self.lookup(table, &path)),
            ResolutionStrategy::Lazy(lock) => {
                let mut table = lock.lock();
                if let Some(entry) = self.lookup(&table, &path) {
                    return Ok(Some(entry));
                }
                if !self.automapping || !self.is_template(&path) {
                    return Ok(None);
                }
                match self.inference.infer(&path) {
                    Ok(Some(entry)) => {
                        let entry = Arc::new(entry);
                        table.insert(Arc::clone(&entry));
                        Ok(Some(entry))
                    }
                    Ok(None) => Ok(None),
                    Err(err) => {
                        warn!(path = %path, error = %err, "page resolution failed");
                        Err(err)
                    }
                }
            }
        }
    }

    /// The path served by `handler`.
    ///
    /// Fails with [`ResolveError::AmbiguousReverseMapping`] if the type is
    /// bound to more than one path.
    pub fn path_for(&self, handler: &HandlerType) -> Result<Option<String>, ResolveError> {
        self.with_table(|table| table.lookup_by_type(handler))?
            .map(|entry| entry.map(|e| e.path().to_string()))
    }

    /// Response headers for `path`, resolving it first if needed.
    pub fn headers_for(&self, path: &str) -> Result<Option<PageHeaders>, ResolveError> {
        Ok(self.resolve(path)?.map(|entry| entry.headers().clone()))
    }

    /// Bindable fields of `handler`, computed at most once per type.
    ///
    /// Empty when autobinding is disabled.
    pub fn bindable_fields_for(&self, handler: &HandlerType) -> Arc<FieldIndex> {
        if !self.autobinding {
            return Arc::new(FieldIndex::new());
        }
        if let Some(index) = self.fields.get(handler) {
            return Arc::clone(index.value());
        }
        let index = self.fields.entry(handler.clone()).or_insert_with(|| {
            let index = self
                .introspector
                .describe_bindable_fields(handler.descriptor());
            debug!(handler = %handler, fields = index.len(), "field index built");
            Arc::new(index)
        });
        Arc::clone(index.value())
    }

    /// Bindable fields for a resolved entry, memoized on the entry.
    pub fn entry_fields(&self, entry: &PageEntry) -> Arc<FieldIndex> {
        entry.bindable_fields(|| self.bindable_fields_for(entry.handler()))
    }

    /// Distinct handler types currently in the table.
    pub fn handler_types(&self) -> Result<Vec<HandlerType>, ResolveError> {
        self.with_table(RouteTable::handler_types)
    }

    /// Snapshot of all entries, sorted by path.
    pub fn entries(&self) -> Result<Vec<Arc<PageEntry>>, ResolveError> {
        self.with_table(RouteTable::entries)
    }

    #[must_use]
    pub fn not_found_handler(&self) -> &HandlerType {
        &self.not_found_handler
    }

    #[must_use]
    pub fn error_handler(&self) -> &HandlerType {
        &self.error_handler
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_autobinding(&self) -> bool {
        self.autobinding
    }

    #[must_use]
    pub fn is_automapping(&self) -> bool {
        self.automapping
    }

    #[must_use]
    pub fn strategy(&self) -> &ResolutionStrategy {
        &self.strategy
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("mode", &self.mode)
            .field("eager", &self.strategy.is_eager())
            .field("automapping", &self.automapping)
            .field("autobinding", &self.autobinding)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}
