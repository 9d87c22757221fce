//! # Hot Reload
//!
//! Live registration of handler types from a type manifest.
//!
//! In a lazy mode the resolver looks types up on every miss, so adding a
//! type to the shared [`HandlerRegistry`] is enough for the next request to
//! find it. [`watch_manifest`] watches a manifest file with `notify` and
//! registers every declared type whenever the file is written.
//!
//! ```rust,ignore
//! use pagerouter::hot_reload::watch_manifest;
//!
//! let watcher = watch_manifest("types.yaml", Arc::clone(&registry), |added| {
//!     println!("{added} new page types");
//! })?;
//! // keep `watcher` alive for as long as reloads should happen
//! ```
//!
//! Types are never removed: a name dropped from the manifest stays
//! registered, and routes already resolved to it keep working. A manifest
//! that fails to parse is logged and ignored.

use crate::config::load_manifest;
use crate::handler::HandlerRegistry;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Load `path` into `registry` once. Returns the number of new type names.
pub fn reload_manifest(path: &Path, registry: &HandlerRegistry) -> anyhow::Result<usize> {
    let decls = load_manifest(path)?;
    Ok(registry.register_manifest(&decls))
}

/// Watch a type manifest and register its types into `registry` when it
/// changes.
///
/// `on_reload` receives the number of newly registered names after every
/// successful reload. The returned watcher must be kept alive.
pub fn watch_manifest<P, F>(
    manifest_path: P,
    registry: Arc<HandlerRegistry>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(usize) + Send + 'static,
{
    let path: PathBuf = manifest_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                match reload_manifest(&watch_path, &registry) {
                    Ok(added) => {
                        info!(
                            manifest = %watch_path.display(),
                            added = added,
                            total = registry.len(),
                            "hot-reload: type manifest applied"
                        );
                        on_reload(added);
                    }
                    Err(e) => warn!(
                        manifest = %watch_path.display(),
                        error = %format!("{e:#}"),
                        "hot-reload: manifest ignored"
                    ),
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(manifest = %path.display(), "hot-reload: watching type manifest");
    Ok(watcher)
}
