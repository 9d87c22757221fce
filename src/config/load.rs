use super::types::{ResolverConfig, TypeDecl, TypeManifest};
use super::Settings;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(parsed)
}

/// Read a resolver configuration file. YAML is selected by a `.yaml`/`.yml`
/// extension, anything else is parsed as JSON.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<ResolverConfig> {
    let path = path.as_ref();
    let config: ResolverConfig = parse_file(path)?;
    debug!(
        config = %path.display(),
        routes = config.pages.page.len(),
        excludes = config.pages.excludes.len(),
        types = config.types.len(),
        "configuration parsed"
    );
    Ok(config)
}

/// Read and validate a configuration file, applying the environment mode
/// override. Returns the settings together with the file's type manifest.
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<(Settings, Vec<TypeDecl>)> {
    let path = path.as_ref();
    let config = load_config(path)?;
    let settings = Settings::try_from(&config)
        .with_context(|| format!("invalid configuration in {}", path.display()))?
        .with_env_override();
    info!(
        config = %path.display(),
        mode = %settings.mode,
        package = %settings.package,
        "configuration loaded"
    );
    Ok((settings, config.types))
}

/// Read a standalone type manifest: either `{ types: [...] }` or a bare list.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<Vec<TypeDecl>> {
    let path = path.as_ref();
    let value: serde_json::Value = parse_file(path)?;
    let decls = if value.is_array() {
        serde_json::from_value::<Vec<TypeDecl>>(value)
    } else {
        serde_json::from_value::<TypeManifest>(value).map(|m| m.types)
    }
    .with_context(|| format!("invalid type manifest in {}", path.display()))?;
    Ok(decls)
}
