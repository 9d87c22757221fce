//! # Resolver
//!
//! [`ResolutionCache`] answers the dispatcher's questions: which page type
//! serves a request path, which path a page type is served at, which headers
//! a response carries and which fields a page accepts.
//!
//! ## Strategies
//!
//! | Mode | Strategy | Table | `resolve` |
//! |------|----------|-------|-----------|
//! | `production`, `profile` | eager | built at startup from a resource scan | lock-free read |
//! | `development`, `debug`, `trace` | lazy | explicit routes only at startup | serialized by one mutex |
//!
//! In a lazy mode the mutex covers the whole check-then-insert sequence, so
//! concurrent first requests for the same path load its type exactly once.
//! Misses are not remembered: a type registered after startup is found on
//! the next request for its path.
//!
//! ## Built-in Pages
//!
//! Unless configured otherwise, [`ERROR_PAGE_PATH`] and
//! [`NOT_FOUND_PAGE_PATH`] map to the built-in error and not-found pages.

mod build;
mod core;

pub use self::core::{ResolutionCache, ResolutionStrategy};
pub use build::{ERROR_PAGE_PATH, NOT_FOUND_PAGE_PATH};
