use crate::config::{load_manifest, load_settings, Settings};
use crate::handler::HandlerRegistry;
use crate::headers::PageHeaders;
use crate::mode::Mode;
use crate::resolver::ResolutionCache;
use crate::resources::FsResourceProvider;
use crate::table::PageEntry;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for pagerouter
///
/// Builds a resolver from a configuration file and a web root and lets you
/// inspect the result.
#[derive(Parser, Debug)]
#[command(name = "pagerouter")]
#[command(about = "Inspect request path to page resolution", long_about = None, version)]
pub struct Cli {
    /// Resolver configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "PAGEROUTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Web root scanned for templates in eager modes
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Additional type manifest registered before the resolver is built
    #[arg(short, long, global = true)]
    pub types: Option<PathBuf>,

    /// Override the configured mode
    #[arg(short, long, global = true, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved route table
    Routes {
        /// Emit JSON instead of tab-separated lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve one or more request paths
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Also print response headers
        #[arg(long, default_value_t = false)]
        headers: bool,

        /// Also print bindable fields
        #[arg(long, default_value_t = false)]
        fields: bool,
    },
    /// Validate the configuration and exit
    Check,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::try_parse(value).ok_or_else(|| {
        format!("unknown mode '{value}' (expected production, profile, development, debug or trace)")
    })
}

impl Cli {
    /// Mode used for logging before the configuration is read.
    pub fn log_mode(&self) -> Mode {
        self.mode.unwrap_or_else(|| Mode::default().with_env_override())
    }

    /// Settings from `--config` (or defaults) with the mode override applied,
    /// plus the registry filled from every manifest.
    pub fn load(&self) -> anyhow::Result<(Settings, Arc<HandlerRegistry>)> {
        let registry = Arc::new(HandlerRegistry::new());
        let mut settings = match &self.config {
            Some(path) => {
                let (settings, types) = load_settings(path)?;
                registry.register_manifest(&types);
                settings
            }
            None => Settings::default().with_env_override(),
        };
        if let Some(types) = &self.types {
            let decls = load_manifest(types)?;
            registry.register_manifest(&decls);
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        Ok((settings, registry))
    }

    /// Build the resolver described by the command line.
    pub fn build_cache(&self) -> anyhow::Result<ResolutionCache> {
        let (settings, registry) = self.load()?;
        let resources = FsResourceProvider::new(
            &self.root,
            &settings.template_extensions,
            &settings.skip_dirs,
        );
        ResolutionCache::with_registry(settings, registry, &resources)
            .context("failed to build resolver")
    }
}

fn headers_json(headers: &PageHeaders) -> serde_json::Value {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                serde_json::Value::String(value.to_header_string()),
            )
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn entry_json(entry: &PageEntry) -> serde_json::Value {
    serde_json::json!({
        "path": entry.path(),
        "handler": entry.handler().name(),
        "origin": entry.origin().as_str(),
        "headers": headers_json(entry.headers()),
    })
}

/// The route table, one entry per line or as a JSON array.
pub fn render_routes(cache: &ResolutionCache, json: bool) -> anyhow::Result<String> {
    let entries = cache.entries()?;
    if json {
        let rows: Vec<serde_json::Value> = entries.iter().map(|e| entry_json(e)).collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut out = String::new();
    for entry in &entries {
        writeln!(
            out,
            "{}\t{}\t{}",
            entry.path(),
            entry.handler(),
            entry.origin()
        )?;
    }
    Ok(out)
}

/// Resolution of each path with optional headers and fields.
pub fn render_resolution(
    cache: &ResolutionCache,
    paths: &[String],
    headers: bool,
    fields: bool,
) -> anyhow::Result<String> {
    let mut out = String::new();
    for path in paths {
        let Some(entry) = cache.resolve(path)? else {
            writeln!(out, "{path} -> <none>")?;
            continue;
        };
        writeln!(out, "{path} -> {} ({})", entry.handler(), entry.origin())?;
        if headers {
            for (name, value) in entry.headers().iter() {
                writeln!(out, "  {name}: {value}")?;
            }
        }
        if fields {
            for field in cache.entry_fields(&entry).values() {
                writeln!(out, "  .{}: {}", field.name, field.value_type)?;
            }
        }
    }
    Ok(out)
}

/// Execute the command described by `cli`.
///
/// # Errors
///
/// Returns an error if the configuration or a manifest cannot be read, or if
/// the resolver rejects the configuration.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let cache = cli.build_cache()?;
    match &cli.command {
        Commands::Routes { json } => print!("{}", render_routes(&cache, *json)?),
        Commands::Resolve {
            paths,
            headers,
            fields,
        } => print!("{}", render_resolution(&cache, paths, *headers, *fields)?),
        Commands::Check => {
            let handler_types = cache.handler_types()?.len();
            let routes = cache.entries()?.len();
            info!(mode = %cache.mode(), routes_count = routes, "configuration ok");
            println!(
                "ok: {routes} routes, {handler_types} page types, mode {}",
                cache.mode()
            );
        }
    }
    cache.shutdown();
    Ok(())
}
