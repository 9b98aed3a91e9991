//! Container metadata: object-type tags and tree-wide flags

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Records which native type a container node should materialize into
///
/// The tag is carried through the instantiation walk untouched; a downstream
/// materializer uses it to distinguish "becomes a typed instance" from
/// "stays a plain container".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag(String);

impl TypeTag {
    /// Create a tag from a type name (typically a dotted path)
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Tagged type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Tree-wide container flags (mutability / strictness)
///
/// Preserved verbatim across transformation. The instantiation core never
/// interprets these; `None` means "unset, inherit from the enclosing tree".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Whether the subtree rejects writes
    pub readonly: Option<bool>,
    /// Whether unknown keys are rejected
    pub strict: Option<bool>,
}

impl NodeFlags {
    /// Flags with nothing set
    #[inline]
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }

    /// True if no flag carries a value
    #[inline]
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.readonly.is_none() && self.strict.is_none()
    }
}
