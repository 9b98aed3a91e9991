//! Rig Config Tree
//!
//! The data substrate of the rig workspace: declarative config trees that the
//! instantiation engine turns into live objects.
//!
//! # Core Concepts
//!
//! - [`Node`]: a tree value — mapping, sequence, or scalar
//! - [`Mapping`] / [`Sequence`]: ordered containers carrying an optional
//!   [`TypeTag`] and tree-wide [`NodeFlags`]
//! - [`Value`]: scalar leaf, including opaque [`ExtRef`] external references
//! - Reserved keys ([`TARGET_KEY`], [`RECURSIVE_KEY`], [`CONVERT_KEY`]) that
//!   the engine extracts from mapping nodes
//!
//! # Example
//!
//! ```rust
//! use rig_node::{Mapping, Node, TARGET_KEY};
//!
//! let mut node = Mapping::new();
//! node.insert(TARGET_KEY, "pkg_a.Foo");
//! node.insert("x", 1i64);
//! assert!(node.declares_target());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod meta;
mod node;
mod parse;
mod value;

pub use meta::{NodeFlags, TypeTag};
pub use node::{Mapping, Node, Sequence, CONVERT_KEY, RECURSIVE_KEY, TARGET_KEY};
pub use parse::NodeError;
pub use value::{ExtRef, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
