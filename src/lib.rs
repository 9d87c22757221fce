//! # pagerouter
//!
//! **pagerouter** resolves inbound request paths to the application page
//! types that serve them, caches the result, and answers the reverse and
//! metadata questions a dispatcher needs: which path a page is served at,
//! which headers a response carries, and which fields a page accepts.
//!
//! ## Architecture
//!
//! - **[`mapping`]** - Naming-convention inference ([`NameMapper`]) and exclusion rules ([`ExclusionMatcher`])
//! - **[`table`]** - The bidirectional route table ([`RouteTable`], [`PageEntry`])
//! - **[`resolver`]** - The [`ResolutionCache`] with its eager and lazy strategies
//! - **[`handler`]** - Type loading and field introspection ([`TypeLoader`], [`HandlerRegistry`])
//! - **[`headers`]** - Ordered response headers with typed values
//! - **[`resources`]** - Enumeration of template resources for eager scans
//! - **[`config`]** - YAML/JSON configuration and validated [`Settings`]
//! - **[`hot_reload`]** - Live registration of types from a manifest
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//!
//! ## Modes
//!
//! | Mode | Strategy |
//! |------|----------|
//! | `production`, `profile` | eager: every template is resolved at startup, lookups take no lock |
//! | `development`, `debug`, `trace` | lazy: paths are resolved on first request under one mutex |
//!
//! ## Quick Start
//!
//! ```rust
//! use pagerouter::handler::{FieldDescriptor, HandlerRegistry, Page};
//! use pagerouter::resources::StaticResources;
//! use pagerouter::{Mode, ResolutionCache, RouteDecl, Settings};
//! use std::sync::Arc;
//!
//! struct AddCustomer;
//! impl Page for AddCustomer {
//!     fn bindable_fields() -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::new("name", "String")]
//!     }
//! }
//!
//! struct Report;
//! impl Page for Report {}
//!
//! let registry = Arc::new(HandlerRegistry::new());
//! registry.register::<AddCustomer>("com.mycorp.admin.AddCustomerPage");
//! registry.register::<Report>("com.mycorp.Report");
//!
//! let settings = Settings::new(Mode::Development, "com.mycorp")
//!     .with_route(RouteDecl::new("/report.htm", "Report").with_header("Pragma", "public"))
//!     .with_exclusion("secure/*");
//! let cache = ResolutionCache::with_registry(settings, registry, &StaticResources::default())?;
//!
//! let entry = cache.resolve("/admin/add-customer.htm")?.expect("automapped");
//! assert_eq!(entry.handler().name(), "com.mycorp.admin.AddCustomerPage");
//! assert_eq!(cache.entry_fields(&entry).len(), 1);
//!
//! let excluded = cache.resolve("/secure/login.htm")?.expect("excluded");
//! assert!(excluded.is_excluded());
//! # Ok::<(), pagerouter::ResolveError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod headers;
pub mod hot_reload;
pub mod logging;
pub mod mapping;
pub mod mode;
pub mod resolver;
pub mod resources;
pub mod table;

pub use config::{load_config, load_settings, ResolverConfig, RouteDecl, Settings};
pub use error::ResolveError;
pub use handler::{HandlerRegistry, HandlerType, Page, TypeIntrospector, TypeLoader};
pub use headers::{HeaderValue, PageHeaders};
pub use mapping::{ExclusionMatcher, NameMapper};
pub use mode::Mode;
pub use resolver::{ResolutionCache, ResolutionStrategy};
pub use resources::{FsResourceProvider, ResourceProvider, StaticResources};
pub use table::{Origin, PageEntry, RouteTable, TypeBinding};
