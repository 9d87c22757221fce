//! # Configuration
//!
//! File-backed configuration for the resolver. A YAML or JSON document is
//! deserialized into [`ResolverConfig`] and validated into [`Settings`].
//!
//! ```yaml
//! mode: development
//! pages:
//!   package: com.mycorp.pages
//!   page:
//!     - { path: /report.htm, type: Report }
//!   excludes:
//!     - pattern: "secure/*"
//! headers:
//!   - { name: Pragma, value: no-cache }
//! ```
//!
//! `PAGEROUTER_MODE` overrides the configured mode when settings are loaded
//! through [`load_settings`].

mod load;
mod settings;
mod types;

pub use load::{load_config, load_manifest, load_settings};
pub use settings::{RouteDecl, Settings};
pub use types::{
    ExcludeDecl, FieldDecl, HeaderDecl, PagesConfig, ResolverConfig, RouteDeclRaw, ScalarValue,
    TypeDecl, TypeManifest,
};
