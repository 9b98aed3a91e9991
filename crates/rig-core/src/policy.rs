//! Recursion and conversion policy extraction

use crate::directives::DirectiveSources;
use crate::error::PolicyError;
use rig_node::{Mapping, Node, Value, CONVERT_KEY, RECURSIVE_KEY};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How much of the resulting structure a downstream materializer should turn
/// into native containers
///
/// Consumed, not enforced, by this core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertMode {
    /// Keep every container as a typed node
    #[default]
    None,
    /// Convert plain containers, keep typed nodes
    Partial,
    /// Convert everything
    All,
}

impl Display for ConvertMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Partial => write!(f, "partial"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for ConvertMode {
    type Err = PolicyError;

    /// Exactly the three recognized literals, case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "partial" => Ok(Self::Partial),
            "all" => Ok(Self::All),
            other => Err(PolicyError::UnknownConvert {
                value: other.to_string(),
            }),
        }
    }
}

/// Per-node instantiation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Whether nested constructible nodes are built (default true)
    pub recursive: bool,
    /// Downstream conversion mode (default [`ConvertMode::None`])
    pub convert: ConvertMode,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            recursive: true,
            convert: ConvertMode::None,
        }
    }
}

/// Extract the recursion flag and convert directive from a node and its
/// call-site overlay
///
/// Both directives are removed from **both** sources; the overlay wins when
/// both supply a value. Every popped value is validated, even one that loses
/// precedence.
///
/// # Errors
/// [`PolicyError`] on a non-boolean recursion flag, an unrecognized convert
/// string, or a convert directive of the wrong type.
pub fn extract_policy(
    node: &mut Mapping,
    overlay: &mut Mapping,
) -> Result<Policy, PolicyError> {
    let mut sources = DirectiveSources::new(overlay, node);

    let (overlay_rec, node_rec) = sources.pop_each(RECURSIVE_KEY);
    let overlay_rec = validate_recursive(overlay_rec)?;
    let node_rec = validate_recursive(node_rec)?;

    let (overlay_conv, node_conv) = sources.pop_each(CONVERT_KEY);
    let overlay_conv = validate_convert(overlay_conv)?;
    let node_conv = validate_convert(node_conv)?;

    let defaults = Policy::default();
    Ok(Policy {
        recursive: overlay_rec.or(node_rec).unwrap_or(defaults.recursive),
        convert: overlay_conv.or(node_conv).unwrap_or(defaults.convert),
    })
}

fn validate_recursive(value: Option<Node>) -> Result<Option<bool>, PolicyError> {
    match value {
        None => Ok(None),
        Some(Node::Value(Value::Bool(b))) => Ok(Some(b)),
        Some(other) => Err(PolicyError::RecursiveNotBool {
            found: other.kind().to_string(),
        }),
    }
}

fn validate_convert(value: Option<Node>) -> Result<Option<ConvertMode>, PolicyError> {
    match value {
        None => Ok(None),
        // An explicit null declares nothing; it is popped all the same.
        Some(Node::Value(Value::Null)) => Ok(None),
        Some(Node::Value(Value::Str(s))) => s.parse().map(Some),
        Some(Node::Value(Value::Ext(ext))) => match ext.downcast_ref::<ConvertMode>() {
            Some(mode) => Ok(Some(*mode)),
            None => Err(PolicyError::ConvertType {
                found: format!("external reference ({})", ext.label()),
            }),
        },
        Some(other) => Err(PolicyError::ConvertType {
            found: other.kind().to_string(),
        }),
    }
}
