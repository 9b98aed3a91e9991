//! Scalar values and opaque external references

use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Scalar leaf of a config tree
///
/// [`Value::Ext`] covers values that have no declarative representation:
/// pre-resolved symbols supplied programmatically in an overlay, and live
/// objects substituted into the argument tree by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String literal
    Str(String),
    /// Opaque external reference
    Ext(ExtRef),
}

impl Value {
    /// True for [`Value::Null`]
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Boolean content, if any
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer content, if any
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float content, if any
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String content, if any
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// External reference content, if any
    #[inline]
    #[must_use]
    pub fn as_ext(&self) -> Option<&ExtRef> {
        match self {
            Self::Ext(e) => Some(e),
            _ => None,
        }
    }

    /// Kind name for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Ext(_) => "external reference",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<ExtRef> for Value {
    fn from(e: ExtRef) -> Self {
        Self::Ext(e)
    }
}

/// Opaque handle to a value that lives outside the config tree
///
/// A labeled, shared, type-erased reference. Equality is identity: two
/// `ExtRef`s compare equal only when they point at the same allocation.
#[derive(Clone)]
pub struct ExtRef {
    label: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ExtRef {
    /// Wrap a value with a diagnostic label
    #[must_use]
    pub fn new<T: Any + Send + Sync>(label: impl Into<String>, value: T) -> Self {
        Self {
            label: Arc::from(label.into()),
            inner: Arc::new(value),
        }
    }

    /// Wrap a value, labeling it with its Rust type name
    #[must_use]
    pub fn of<T: Any + Send + Sync>(value: T) -> Self {
        Self::new(std::any::type_name::<T>(), value)
    }

    /// Diagnostic label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True if the referenced value is a `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the referenced value as a `T`
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Share the referenced value as an `Arc<T>`
    #[must_use]
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }
}

impl Debug for ExtRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ExtRef({})", self.label)
    }
}

impl PartialEq for ExtRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::Str("hi".into()).as_str(), Some("hi"));
        assert_eq!(Value::Int(7).as_bool(), None);
    }

    #[test]
    fn value_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(false).kind(), "bool");
        assert_eq!(Value::Str(String::new()).kind(), "string");
        assert_eq!(Value::Ext(ExtRef::new("x", 1u8)).kind(), "external reference");
    }

    #[test]
    fn value_from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(3i64), Value::Int(3));
        assert_eq!(Value::from("s"), Value::Str("s".to_string()));
    }

    #[test]
    fn ext_ref_downcast() {
        let ext = ExtRef::new("answer", 42u32);
        assert!(ext.is::<u32>());
        assert!(!ext.is::<u64>());
        assert_eq!(ext.downcast_ref::<u32>(), Some(&42));
        assert_eq!(*ext.downcast_arc::<u32>().unwrap(), 42);
        assert!(ext.downcast_arc::<String>().is_none());
    }

    #[test]
    fn ext_ref_of_uses_type_name() {
        let ext = ExtRef::of(1u8);
        assert!(ext.label().contains("u8"));
    }

    #[test]
    fn ext_ref_identity_equality() {
        let a = ExtRef::new("a", 1u8);
        let b = a.clone();
        let c = ExtRef::new("a", 1u8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ext_ref_debug_shows_label() {
        let ext = ExtRef::new("db.pool", ());
        assert_eq!(format!("{ext:?}"), "ExtRef(db.pool)");
    }
}
