//! Rig Symbol Resolution
//!
//! Resolves dotted-path strings to constructible symbols over pluggable
//! namespaces.
//!
//! # Core Concepts
//!
//! - [`SymbolPath`]: validated `.`-separated path
//! - [`Symbol`]: opaque handle to a resolved type or callable
//! - [`NamespaceProvider`]: the module import facility (one `load` operation)
//! - [`StaticNamespace`]: in-memory registry, the default provider
//! - [`SymbolResolver`]: longest-prefix module search plus attribute
//!   traversal, with a resolver-owned import-once cache
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rig_node::ExtRef;
//! use rig_symbol::{StaticNamespace, SymbolResolver};
//!
//! let ns = StaticNamespace::new();
//! ns.register_type("pkg_a.Foo", |args| {
//!     Ok(ExtRef::new("pkg_a.Foo", args.len()))
//! }).unwrap();
//!
//! let resolver = SymbolResolver::new(Arc::new(ns));
//! let symbol = resolver.resolve("pkg_a.Foo").unwrap();
//! assert!(symbol.is_type());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod namespace;
mod path;
mod resolver;
mod symbol;

pub use namespace::{Export, Module, NamespaceError, NamespaceProvider, StaticNamespace};
pub use path::{PathError, SymbolPath};
pub use resolver::{ResolveError, SymbolResolver};
pub use symbol::{ConstructError, ConstructorFn, Symbol, SymbolKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
