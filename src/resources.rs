//! # Resources
//!
//! Enumeration of candidate request paths for EAGER automapping.
//!
//! A [`ResourceProvider`] lists every template resource of the application
//! as a `/`-rooted path. [`FsResourceProvider`] walks a directory on disk;
//! [`StaticResources`] serves a fixed list, which is handy in tests and for
//! applications that embed their templates.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Lists candidate resource paths.
pub trait ResourceProvider: Send + Sync {
    /// Every template path, rooted at `/`, using `/` as separator.
    fn list_resource_paths(&self) -> io::Result<Vec<String>>;

    /// Human readable description of where resources come from.
    fn root(&self) -> String;
}

/// Walks a web root on disk.
#[derive(Debug, Clone)]
pub struct FsResourceProvider {
    root: PathBuf,
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
}

impl FsResourceProvider {
    /// Provider for `root` listing files that end with one of `extensions`
    /// and skipping directories named in `skip_dirs`.
    pub fn new(root: impl Into<PathBuf>, extensions: &[String], skip_dirs: &[String]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions.to_vec(),
            skip_dirs: skip_dirs.to_vec(),
        }
    }

    /// Only top-level directories are skipped, ignoring ASCII case.
    fn is_skipped(&self, entry: &DirEntry) -> bool {
        entry.depth() == 1
            && entry.file_type().is_dir()
            && entry.file_name().to_str().is_some_and(|name| {
                self.skip_dirs
                    .iter()
                    .any(|skip| skip.eq_ignore_ascii_case(name))
            })
    }

    fn is_template(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }

    fn to_request_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut out = String::new();
        for component in relative.components() {
            out.push('/');
            out.push_str(component.as_os_str().to_str()?);
        }
        Some(out)
    }
}

impl ResourceProvider for FsResourceProvider {
    fn list_resource_paths(&self) -> io::Result<Vec<String>> {
        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !self.is_skipped(e));
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() || !self.is_template(entry.path()) {
                continue;
            }
            match self.to_request_path(entry.path()) {
                Some(path) => paths.push(path),
                None => trace!(file = %entry.path().display(), "skipping non UTF-8 resource"),
            }
        }
        paths.sort();
        debug!(root = %self.root.display(), resources = paths.len(), "resources listed");
        Ok(paths)
    }

    fn root(&self) -> String {
        self.root.display().to_string()
    }
}

/// A fixed list of resource paths.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    paths: Vec<String>,
}

impl StaticResources {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResourceProvider for StaticResources {
    fn list_resource_paths(&self) -> io::Result<Vec<String>> {
        Ok(self.paths.clone())
    }

    fn root(&self) -> String {
        "<static>".to_string()
    }
}
