//! # CLI Module
//!
//! The `pagerouter` binary builds a [`ResolutionCache`](crate::ResolutionCache)
//! from a configuration file and a web root, then reports on it.
//!
//! ## Commands
//!
//! ```bash
//! # Dump the route table of a production build
//! pagerouter --config pagerouter.yaml --root webapp --mode production routes
//!
//! # Resolve request paths, showing headers and bindable fields
//! pagerouter --config pagerouter.yaml resolve /edit-customer.htm --headers --fields
//!
//! # Fail with a non-zero exit code if the configuration is broken
//! pagerouter --config pagerouter.yaml --types types.yaml check
//! ```
//!
//! `--mode` wins over `PAGEROUTER_MODE`, which wins over the file.

mod commands;


pub use commands::{render_resolution, render_routes, run_cli, Cli, Commands};
