//! Rig Core - Recursive Instantiation Engine
//!
//! Turns declarative config trees into ready-to-invoke argument trees:
//! - Extracts per-node policy (`_recursive_`, `_convert_`) and the target
//!   descriptor (`_target_`), overlay-wins-over-declaration
//! - Merges call-site keyword fields onto declared fields
//! - Walks the field tree bottom-up, building nested constructible nodes
//!   into live objects through the construction collaborator
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rig_core::Engine;
//! use rig_node::{ExtRef, Mapping, Node, Value, TARGET_KEY};
//! use rig_symbol::{StaticNamespace, SymbolResolver};
//!
//! let ns = StaticNamespace::new();
//! ns.register_type("pkg_a.Foo", |args| {
//!     let x = args.get("x").and_then(Node::as_value).and_then(Value::as_int);
//!     Ok(ExtRef::new("pkg_a.Foo", x.unwrap_or_default()))
//! }).unwrap();
//!
//! let engine = Engine::new(Arc::new(SymbolResolver::new(Arc::new(ns))));
//!
//! let mut node = Mapping::new();
//! node.insert(TARGET_KEY, "pkg_a.Foo");
//! node.insert("x", 5i64);
//!
//! let built = engine.instantiate(&node, None).unwrap();
//! assert_eq!(built.downcast_ref::<i64>(), Some(&5));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod build;
mod directives;
mod engine;
mod error;
mod merge;
mod normalize;
mod policy;
mod target;

// Re-exports for convenience
pub use build::{DirectBuilder, ObjectBuilder};
pub use engine::{Engine, Prepared};
pub use error::{InstantiateError, PolicyError, TargetError};
pub use merge::merge_overrides;
pub use normalize::normalize_targets;
pub use policy::{extract_policy, ConvertMode, Policy};
pub use target::{declared_target, extract_target};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the instantiation engine
    pub use crate::{
        ConvertMode, DirectBuilder, Engine, InstantiateError, ObjectBuilder, Policy, Prepared,
    };
    pub use rig_node::{ExtRef, Mapping, Node, Sequence, Value, TARGET_KEY};
    pub use rig_symbol::{StaticNamespace, Symbol, SymbolResolver};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
