//! # Application Mode
//!
//! The mode selects the resolution strategy for the lifetime of the process:
//!
//! | Mode          | Strategy | Default log level |
//! |---------------|----------|-------------------|
//! | `production`  | EAGER    | `warn`            |
//! | `profile`     | EAGER    | `info`            |
//! | `development` | LAZY     | `info`            |
//! | `debug`       | LAZY     | `debug`           |
//! | `trace`       | LAZY     | `trace`           |
//!
//! The `PAGEROUTER_MODE` environment variable overrides the configured mode.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::error;

/// Environment variable that overrides the configured mode.
pub const MODE_ENV_VAR: &str = "PAGEROUTER_MODE";

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Production,
    Profile,
    #[default]
    Development,
    Debug,
    Trace,
}

impl Mode {
    /// All modes, in increasing verbosity.
    pub const ALL: [Mode; 5] = [
        Mode::Production,
        Mode::Profile,
        Mode::Development,
        Mode::Debug,
        Mode::Trace,
    ];

    /// Parse a mode name, case-insensitively.
    ///
    /// Unknown values are logged and fall back to [`Mode::Debug`] so a typo
    /// never silently lands an application in production behaviour.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Self::try_parse(value) {
            Some(mode) => mode,
            None => {
                error!(mode = %value, "invalid application mode, falling back to debug");
                Mode::Debug
            }
        }
    }

    /// Parse a mode name, returning `None` when it is not recognised.
    #[must_use]
    pub fn try_parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Apply the `PAGEROUTER_MODE` override, if set and non-blank.
    #[must_use]
    pub fn with_env_override(self) -> Self {
        match env::var(MODE_ENV_VAR) {
            Ok(val) if !val.trim().is_empty() => Self::parse(&val),
            _ => self,
        }
    }

    /// Stable regime: the route table is built once at startup.
    #[must_use]
    pub fn is_eager(self) -> bool {
        matches!(self, Mode::Production | Mode::Profile)
    }

    #[must_use]
    pub fn is_lazy(self) -> bool {
        !self.is_eager()
    }

    /// Default `tracing` level for this mode.
    #[must_use]
    pub fn default_log_level(self) -> &'static str {
        match self {
            Mode::Production => "warn",
            Mode::Profile | Mode::Development => "info",
            Mode::Debug => "debug",
            Mode::Trace => "trace",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Profile => "profile",
            Mode::Development => "development",
            Mode::Debug => "debug",
            Mode::Trace => "trace",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
