//! Structured logging setup
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application. This module provides the subscriber the `pagerouter`
//! binary uses: an `EnvFilter`, then a JSON or pretty fmt layer, optionally
//! written through a non-blocking `tracing-appender` worker.
//!
//! Configuration comes from the environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PAGEROUTER_LOG_LEVEL` | derived from the mode |
//! | `PAGEROUTER_LOG_FORMAT` | `json` (`pretty` in lazy modes) |
//! | `PAGEROUTER_LOG_TARGET_FILTER` | none, comma-separated directives |
//! | `PAGEROUTER_LOG_ASYNC` | `false` |
//! | `PAGEROUTER_LOG_INCLUDE_LOCATION` | `false` |
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use crate::mode::Mode;
use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Parse a level name, defaulting to `INFO`.
pub fn parse_level(s: &str) -> Level {
    match s.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a background worker
    pub async_logging: bool,
    /// Extra filter directives, comma-separated
    pub target_filter: Option<String>,
    /// Include file:line in each event
    pub include_location: bool,
}

impl LogConfig {
    /// Defaults for `mode`: quieter and JSON in eager modes, chattier and
    /// pretty in lazy ones.
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            log_level: mode.default_log_level().to_string(),
            format: if mode.is_eager() {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            async_logging: false,
            target_filter: None,
            include_location: matches!(mode, Mode::Debug | Mode::Trace),
        }
    }

    /// [`for_mode`](Self::for_mode) overridden by environment variables.
    pub fn from_env(mode: Mode) -> Self {
        let defaults = Self::for_mode(mode);
        Self {
            log_level: env::var("PAGEROUTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("PAGEROUTER_LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.format),
            async_logging: env::var("PAGEROUTER_LOG_ASYNC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.async_logging),
            target_filter: env::var("PAGEROUTER_LOG_TARGET_FILTER").ok(),
            include_location: env::var("PAGEROUTER_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// The filter this configuration installs.
    pub fn env_filter(&self) -> EnvFilter {
        let level = parse_level(&self.log_level);
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim) {
                if directive.is_empty() {
                    continue;
                }
                match directive.parse() {
                    Ok(parsed) => filter = filter.add_directive(parsed),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Keeps the background log writer alive. Drop it last to flush.
#[must_use = "dropping the guard stops asynchronous log output"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber described by `config`.
pub fn init_logging_with_config(config: &LogConfig) -> Result<LoggingGuard> {
    let (writer, worker) = if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer),
            Some(guard),
        )
    } else {
        (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
            None,
        )
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard { _worker: worker })
}

/// Install logging for `mode` from the environment.
pub fn init_logging(mode: Mode) -> Result<LoggingGuard> {
    init_logging_with_config(&LogConfig::from_env(mode))
}
