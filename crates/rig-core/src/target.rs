//! Target descriptor extraction

use crate::directives::DirectiveSources;
use crate::error::{InstantiateError, TargetError};
use rig_node::{Mapping, Node, Value, TARGET_KEY};
use rig_symbol::{Symbol, SymbolResolver};

/// Extract and resolve the target of a node, consuming the `_target_` key
/// from both the node and the call-site overlay
///
/// The overlay's target wins over the node's declared target. A dotted path
/// string goes through the resolver; a pre-resolved [`Symbol`] supplied as an
/// external reference is returned directly.
///
/// # Errors
/// [`TargetError::Missing`] when neither source supplies a target,
/// [`TargetError::Unsupported`] for a target value of an unusable shape, and
/// any [`rig_symbol::ResolveError`] from string resolution.
pub fn extract_target(
    node: &mut Mapping,
    overlay: &mut Mapping,
    resolver: &SymbolResolver,
) -> Result<Symbol, InstantiateError> {
    let mut sources = DirectiveSources::new(overlay, node);
    let (from_overlay, from_node) = sources.pop_each(TARGET_KEY);

    let target = match (supplied(from_overlay), supplied(from_node)) {
        (Some(value), _) | (None, Some(value)) => value,
        (None, None) => return Err(TargetError::Missing.into()),
    };

    match target {
        Node::Value(Value::Str(path)) => Ok(resolver.resolve(&path)?),
        Node::Value(Value::Ext(ext)) => match ext.downcast_ref::<Symbol>() {
            Some(symbol) => Ok(symbol.clone()),
            None => Err(TargetError::Unsupported {
                found: format!("external reference ({})", ext.label()),
            }
            .into()),
        },
        other => Err(TargetError::Unsupported {
            found: other.kind().to_string(),
        }
        .into()),
    }
}

/// An explicit null supplies nothing
fn supplied(value: Option<Node>) -> Option<Node> {
    value.filter(|node| !node.is_null())
}

/// Read the declared target name without consuming it
///
/// Non-destructive peek for tooling that reports target names without
/// instantiating.
///
/// # Errors
/// [`TargetError::Missing`] when the node declares no target and
/// [`TargetError::NotString`] when the declared target is not a string.
pub fn declared_target(node: &Mapping) -> Result<&str, TargetError> {
    match node.get(TARGET_KEY) {
        None => Err(TargetError::Missing),
        Some(Node::Value(Value::Str(path))) => Ok(path),
        Some(other) => Err(TargetError::NotString {
            found: other.kind().to_string(),
        }),
    }
}
