//! The recursive instantiation engine
//!
//! A synchronous, single-threaded recursive descent over the merged field
//! tree. Mapping fields are visited in declared key order and sequence
//! elements in index order, so nested constructors run in a fully
//! deterministic order. Any error aborts the walk immediately; partial trees
//! are never returned.

use crate::build::{DirectBuilder, ObjectBuilder};
use crate::error::InstantiateError;
use crate::merge::merge_overrides;
use crate::policy::{extract_policy, Policy};
use crate::target::extract_target;
use rig_node::{ExtRef, Mapping, Node, Sequence, Value};
use rig_symbol::{Symbol, SymbolResolver};
use std::sync::Arc;
use tracing::debug;

/// Output of the root preparation: a resolved target, its policy, and the
/// final argument tree
///
/// The caller owns the final step of invoking the target; the args mapping
/// carries no object-type tag since that caller already knows the
/// constructor.
#[derive(Debug)]
pub struct Prepared {
    /// Resolved target symbol
    pub target: Symbol,
    /// Extracted instantiation policy
    pub policy: Policy,
    /// Final argument tree
    pub args: Mapping,
}

/// Recursive instantiation engine
///
/// Holds the symbol resolver and the construction collaborator. The engine
/// never mutates a caller's node: preparation works on a cloned working copy,
/// so destructive reserved-key extraction is invisible to the caller's
/// retained reference.
pub struct Engine {
    resolver: Arc<SymbolResolver>,
    builder: Arc<dyn ObjectBuilder>,
}

impl Engine {
    /// Engine with the default [`DirectBuilder`] collaborator
    #[must_use]
    pub fn new(resolver: Arc<SymbolResolver>) -> Self {
        Self::with_builder(resolver, Arc::new(DirectBuilder))
    }

    /// Engine with a custom construction collaborator
    #[must_use]
    pub fn with_builder(resolver: Arc<SymbolResolver>, builder: Arc<dyn ObjectBuilder>) -> Self {
        Self { resolver, builder }
    }

    /// Symbol resolver this engine resolves targets with
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &Arc<SymbolResolver> {
        &self.resolver
    }

    /// Prepare a node for invocation: resolve its target, extract its policy,
    /// merge call-site overrides, and build the final argument tree
    ///
    /// This is the root case of the exposed operation — the caller invokes
    /// the resolved target itself. Nested constructible nodes inside the
    /// field tree are built according to the extracted recursion policy.
    ///
    /// # Errors
    /// Any resolution, target, policy, or nested-construction error, raised
    /// fail-fast.
    pub fn prepare(
        &self,
        node: &Mapping,
        overrides: Option<&Mapping>,
    ) -> Result<Prepared, InstantiateError> {
        let mut node = node.clone();
        let mut overlay = overrides.cloned().unwrap_or_default();

        let policy = extract_policy(&mut node, &mut overlay)?;
        let target = extract_target(&mut node, &mut overlay, &self.resolver)?;
        let merged = merge_overrides(&node, &overlay);

        debug!(
            symbol = %target.path(),
            recursive = policy.recursive,
            convert = %policy.convert,
            fields = merged.len(),
            "prepared node"
        );

        let args = self.resolve_fields(&merged, policy.recursive)?;
        Ok(Prepared {
            target,
            policy,
            args,
        })
    }

    /// Prepare a node and construct it through the collaborator
    ///
    /// This is the nested/full case of the exposed operation.
    ///
    /// # Errors
    /// Any preparation error, plus [`InstantiateError::Construction`] when
    /// the collaborator fails.
    pub fn instantiate(
        &self,
        node: &Mapping,
        overrides: Option<&Mapping>,
    ) -> Result<ExtRef, InstantiateError> {
        let prepared = self.prepare(node, overrides)?;
        self.builder
            .construct(&prepared.target, prepared.args)
            .map_err(|source| InstantiateError::Construction {
                symbol: prepared.target.path().to_string(),
                source,
            })
    }

    /// Process the merged field tree into the final argument tree
    ///
    /// With `recursive` off, every field is copied verbatim: a nested node
    /// that declares its own target stays raw, unresolved data by design.
    fn resolve_fields(
        &self,
        merged: &Mapping,
        recursive: bool,
    ) -> Result<Mapping, InstantiateError> {
        let mut args = Mapping::new().with_flags(merged.flags());
        for (key, value) in merged.iter() {
            let resolved = if recursive {
                self.resolve_node(value)?
            } else {
                value.clone()
            };
            args.insert(key, resolved);
        }
        Ok(args)
    }

    /// One field of the walk: construct target nodes, rebuild containers,
    /// pass scalars through
    fn resolve_node(&self, node: &Node) -> Result<Node, InstantiateError> {
        match node {
            // Null and every other scalar pass through unchanged.
            Node::Value(_) => Ok(node.clone()),
            Node::Mapping(m) if m.declares_target() => {
                let built = self.instantiate(m, None)?;
                Ok(Node::Value(Value::Ext(built)))
            }
            Node::Mapping(m) => {
                let mut out = Mapping::new().with_flags(m.flags());
                for (key, value) in m.iter() {
                    out.insert(key, self.resolve_node(value)?);
                }
                // Tags propagate through non-root containers untouched.
                out.set_tag(m.tag().cloned());
                Ok(Node::Mapping(out))
            }
            Node::Sequence(s) => {
                let mut out = Sequence::new();
                for item in s.iter() {
                    out.push(self.resolve_node(item)?);
                }
                out.set_tag(s.tag().cloned());
                Ok(Node::Sequence(out))
            }
        }
    }
}
