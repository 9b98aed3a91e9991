//! Config tree nodes: mappings, sequences, scalars

use crate::meta::{NodeFlags, TypeTag};
use crate::value::{ExtRef, Value};
use indexmap::IndexMap;

/// Reserved key naming the constructible symbol of a mapping node
pub const TARGET_KEY: &str = "_target_";

/// Reserved key overriding the recursion policy of a mapping node
pub const RECURSIVE_KEY: &str = "_recursive_";

/// Reserved key declaring the downstream conversion policy of a mapping node
pub const CONVERT_KEY: &str = "_convert_";

/// A config tree value
///
/// Mapping fields and sequence elements keep their declared order; that order
/// is the order the engine visits them in, which in turn is the order nested
/// constructors run.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered name → node fields
    Mapping(Mapping),
    /// Ordered list of nodes
    Sequence(Sequence),
    /// Scalar leaf
    Value(Value),
}

impl Node {
    /// Null scalar node
    #[inline]
    #[must_use]
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// True for a null scalar
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Mapping content, if any
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable mapping content, if any
    #[inline]
    #[must_use]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Sequence content, if any
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable sequence content, if any
    #[inline]
    #[must_use]
    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Scalar content, if any
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// True for a mapping that names a constructible under [`TARGET_KEY`]
    #[inline]
    #[must_use]
    pub fn declares_target(&self) -> bool {
        matches!(self, Self::Mapping(m) if m.declares_target())
    }

    /// Kind name for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Value(v) => v.kind(),
        }
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl From<Sequence> for Node {
    fn from(s: Sequence) -> Self {
        Self::Sequence(s)
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Self::Value(Value::Int(i))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Self::Value(Value::Float(f))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Value(Value::Str(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Value(Value::Str(s))
    }
}

impl From<ExtRef> for Node {
    fn from(e: ExtRef) -> Self {
        Self::Value(Value::Ext(e))
    }
}

/// Ordered mapping node with container metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    fields: IndexMap<String, Node>,
    tag: Option<TypeTag>,
    flags: NodeFlags,
}

impl Mapping {
    /// Empty mapping with no metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an object-type tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<TypeTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attach tree-wide flags
    #[inline]
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Object-type tag, if any
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&TypeTag> {
        self.tag.as_ref()
    }

    /// Replace the object-type tag
    #[inline]
    pub fn set_tag(&mut self, tag: Option<TypeTag>) {
        self.tag = tag;
    }

    /// Tree-wide flags
    #[inline]
    #[must_use]
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Replace the tree-wide flags
    #[inline]
    pub fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    /// Insert a field, returning the previous value for that key
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.fields.insert(key.into(), value.into())
    }

    /// Field value for `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields.get(key)
    }

    /// Mutable field value for `key`
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.fields.get_mut(key)
    }

    /// Remove a field, preserving the order of the remaining fields
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.fields.shift_remove(key)
    }

    /// True if `key` is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declared order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in declared order
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Mutable field values in declared order
    #[inline]
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.fields.values_mut()
    }

    /// True if this mapping names a constructible under [`TARGET_KEY`]
    #[inline]
    #[must_use]
    pub fn declares_target(&self) -> bool {
        self.fields.contains_key(TARGET_KEY)
    }
}

impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
            tag: None,
            flags: NodeFlags::default(),
        }
    }
}

/// Ordered sequence node with container metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    items: Vec<Node>,
    tag: Option<TypeTag>,
}

impl Sequence {
    /// Empty sequence with no metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an object-type tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<TypeTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Object-type tag, if any
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&TypeTag> {
        self.tag.as_ref()
    }

    /// Replace the object-type tag
    #[inline]
    pub fn set_tag(&mut self, tag: Option<TypeTag>) {
        self.tag = tag;
    }

    /// Append an element
    pub fn push(&mut self, value: impl Into<Node>) {
        self.items.push(value.into());
    }

    /// Element at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    /// Number of elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no elements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in index order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.items.iter()
    }

    /// Mutable elements in index order
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.items.iter_mut()
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(items: Vec<Node>) -> Self {
        Self { items, tag: None }
    }
}

impl FromIterator<Node> for Sequence {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            tag: None,
        }
    }
}
