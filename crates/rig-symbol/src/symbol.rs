//! Resolved symbols: opaque handles to constructible types and callables

use crate::path::SymbolPath;
use rig_node::{ExtRef, Mapping};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Whether a symbol names a type or a free callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Constructible type
    Type,
    /// Callable returning an object
    Callable,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Callable => write!(f, "callable"),
        }
    }
}

/// Constructor invoked with the final argument tree
pub type ConstructorFn = dyn Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync;

/// Opaque handle to a resolved type or callable
///
/// The instantiation engine inspects nothing beyond [`Symbol::kind`] and
/// [`Symbol::path`]; invocation goes through the construction collaborator.
/// Equality compares path and kind (constructors are not comparable).
#[derive(Clone)]
pub struct Symbol {
    path: SymbolPath,
    kind: SymbolKind,
    ctor: Arc<ConstructorFn>,
}

impl Symbol {
    /// Handle to a constructible type
    #[must_use]
    pub fn new_type<F>(path: SymbolPath, ctor: F) -> Self
    where
        F: Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync + 'static,
    {
        Self {
            path,
            kind: SymbolKind::Type,
            ctor: Arc::new(ctor),
        }
    }

    /// Handle to a callable
    #[must_use]
    pub fn new_callable<F>(path: SymbolPath, ctor: F) -> Self
    where
        F: Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync + 'static,
    {
        Self {
            path,
            kind: SymbolKind::Callable,
            ctor: Arc::new(ctor),
        }
    }

    /// Canonical dotted path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &SymbolPath {
        &self.path
    }

    /// Symbol name (last path segment)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.last().unwrap_or_default()
    }

    /// Type or callable
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// True for [`SymbolKind::Type`]
    #[inline]
    #[must_use]
    pub fn is_type(&self) -> bool {
        self.kind == SymbolKind::Type
    }

    /// True for [`SymbolKind::Callable`]
    #[inline]
    #[must_use]
    pub fn is_callable(&self) -> bool {
        self.kind == SymbolKind::Callable
    }

    /// Invoke the registered constructor with the final argument tree
    ///
    /// # Errors
    /// Propagates the constructor's [`ConstructError`].
    pub fn call(&self, args: Mapping) -> Result<ExtRef, ConstructError> {
        (self.ctor)(args)
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}: {})", self.path, self.kind)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.kind == other.kind
    }
}

/// Failure inside a registered constructor
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConstructError {
    message: String,
}

impl ConstructError {
    /// Failure with a free-form message
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure for an argument the constructor requires
    #[inline]
    #[must_use]
    pub fn missing_field(key: &str) -> Self {
        Self::new(format!("missing required field `{key}`"))
    }

    /// Failure for an argument of the wrong shape
    #[inline]
    #[must_use]
    pub fn invalid_field(key: &str, expected: &str) -> Self {
        Self::new(format!("field `{key}` is not a {expected}"))
    }
}
