//! # Handler Types
//!
//! The resolver never sees application types directly. It asks a
//! [`TypeLoader`] for a [`TypeDescriptor`] by fully-qualified name, checks
//! that the descriptor is a page, and from then on identifies the handler by
//! its [`HandlerType`].
//!
//! Field metadata comes from a [`TypeIntrospector`]. Both capabilities are
//! provided by [`HandlerRegistry`], a registration table filled either from
//! Rust types implementing [`Page`] or from a declarative type manifest.
//!
//! ```rust
//! use pagerouter::handler::{HandlerRegistry, HandlerType, Page, TypeLoader};
//!
//! struct Home;
//! impl Page for Home {}
//!
//! let registry = HandlerRegistry::new();
//! registry.register::<Home>("com.mycorp.Home");
//!
//! let descriptor = registry.load_type("com.mycorp.Home").unwrap();
//! let handler = HandlerType::from_descriptor(descriptor).unwrap();
//! assert_eq!(handler.name(), "com.mycorp.Home");
//! ```

mod registry;
mod types;

pub use registry::{HandlerRegistry, Page};
pub use types::*;
