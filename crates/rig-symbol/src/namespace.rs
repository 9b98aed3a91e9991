//! Namespaces: modules, exports, and the provider seam
//!
//! A [`NamespaceProvider`] is the module import facility: one operation that
//! attempts to load the module at a dotted path. Providers may be stateful —
//! loading a module can make further modules loadable — which the resolver's
//! fallback import path accounts for.

use crate::path::{PathError, SymbolPath};
use crate::symbol::{ConstructError, Symbol, SymbolKind};
use indexmap::IndexMap;
use parking_lot::RwLock;
use rig_node::{ExtRef, Mapping};
use std::collections::HashMap;
use std::str::FromStr;

/// A module attribute
#[derive(Debug, Clone)]
pub enum Export {
    /// Link to a submodule loadable at the given path
    Module(SymbolPath),
    /// Constructible type or callable
    Symbol(Symbol),
    /// Non-constructible constant
    Value(ExtRef),
}

impl Export {
    /// Kind name for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Module(_) => "module",
            Self::Symbol(s) => match s.kind() {
                SymbolKind::Type => "type",
                SymbolKind::Callable => "callable",
            },
            Self::Value(_) => "value",
        }
    }
}

/// A loaded module: ordered attribute table
#[derive(Debug, Clone, Default)]
pub struct Module {
    attrs: IndexMap<String, Export>,
}

impl Module {
    /// Empty module
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute by name
    #[inline]
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Export> {
        self.attrs.get(name)
    }

    /// Add or replace an attribute
    pub fn insert(&mut self, name: impl Into<String>, export: Export) -> Option<Export> {
        self.attrs.insert(name.into(), export)
    }

    /// Number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if the module has no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Attribute names in registration order
    #[inline]
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }
}

/// Module import facility
///
/// `load` returns `None` when the path names nothing loadable. Implementations
/// must be safe for concurrent calls; they may be stateful across calls.
pub trait NamespaceProvider: Send + Sync {
    /// Attempt to load the module at `path`
    fn load(&self, path: &SymbolPath) -> Option<Module>;
}

/// Errors registering symbols into a namespace
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// Malformed dotted path
    #[error("invalid path: {0}")]
    Path(#[from] PathError),

    /// Symbols must live inside a module
    #[error("'{path}' needs an enclosing module (single-segment symbol paths are not addressable)")]
    NoEnclosingModule { path: String },

    /// Name already taken by a different kind of attribute
    #[error("'{path}' is already registered as a {existing}")]
    Conflict { path: String, existing: &'static str },
}

/// In-memory namespace registry
///
/// The default [`NamespaceProvider`]: applications register modules, types,
/// callables, and values by dotted path. Registering `a.b.Foo` creates the
/// module chain `a` → `a.b` and links each submodule as an attribute of its
/// parent.
#[derive(Debug, Default)]
pub struct StaticNamespace {
    modules: RwLock<HashMap<String, Module>>,
}

impl StaticNamespace {
    /// Empty namespace
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an (empty) module, creating and linking its parent chain
    ///
    /// Idempotent for already-registered modules.
    ///
    /// # Errors
    /// Fails on a malformed path or when a segment is already registered as a
    /// non-module attribute.
    pub fn register_module(&self, path: &str) -> Result<(), NamespaceError> {
        let path = SymbolPath::from_str(path)?;
        self.ensure_module(&path)
    }

    /// Register a constructible type
    ///
    /// # Errors
    /// Fails on a malformed or single-segment path, or when the name is
    /// already taken.
    pub fn register_type<F>(&self, path: &str, ctor: F) -> Result<Symbol, NamespaceError>
    where
        F: Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync + 'static,
    {
        let path = SymbolPath::from_str(path)?;
        let symbol = Symbol::new_type(path.clone(), ctor);
        self.register_export(&path, Export::Symbol(symbol.clone()))?;
        Ok(symbol)
    }

    /// Register a callable
    ///
    /// # Errors
    /// Fails on a malformed or single-segment path, or when the name is
    /// already taken.
    pub fn register_callable<F>(&self, path: &str, ctor: F) -> Result<Symbol, NamespaceError>
    where
        F: Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync + 'static,
    {
        let path = SymbolPath::from_str(path)?;
        let symbol = Symbol::new_callable(path.clone(), ctor);
        self.register_export(&path, Export::Symbol(symbol.clone()))?;
        Ok(symbol)
    }

    /// Register a non-constructible constant
    ///
    /// # Errors
    /// Fails on a malformed or single-segment path, or when the name is
    /// already taken.
    pub fn register_value(&self, path: &str, value: ExtRef) -> Result<(), NamespaceError> {
        let path = SymbolPath::from_str(path)?;
        self.register_export(&path, Export::Value(value))
    }

    fn register_export(&self, path: &SymbolPath, export: Export) -> Result<(), NamespaceError> {
        let Some(parent) = path.parent() else {
            return Err(NamespaceError::NoEnclosingModule {
                path: path.to_string(),
            });
        };
        let name = path.last().unwrap_or_default().to_string();

        self.ensure_module(&parent)?;

        let mut modules = self.modules.write();
        let module = modules.entry(parent.to_string()).or_default();
        if let Some(existing) = module.attr(&name) {
            return Err(NamespaceError::Conflict {
                path: path.to_string(),
                existing: existing.kind(),
            });
        }
        module.insert(name, export);
        Ok(())
    }

    /// Create the module at `path` and every ancestor, linking each submodule
    /// into its parent's attribute table.
    fn ensure_module(&self, path: &SymbolPath) -> Result<(), NamespaceError> {
        let mut modules = self.modules.write();
        for n in 1..=path.len() {
            let prefix = path.prefix(n);
            modules.entry(prefix.to_string()).or_default();

            if let Some(parent) = prefix.parent() {
                let name = prefix.last().unwrap_or_default().to_string();
                let parent_module = modules.entry(parent.to_string()).or_default();
                match parent_module.attr(&name) {
                    None => {
                        parent_module.insert(name, Export::Module(prefix.clone()));
                    }
                    Some(Export::Module(_)) => {}
                    Some(existing) => {
                        return Err(NamespaceError::Conflict {
                            path: prefix.to_string(),
                            existing: existing.kind(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl NamespaceProvider for StaticNamespace {
    fn load(&self, path: &SymbolPath) -> Option<Module> {
        self.modules.read().get(&path.to_string()).cloned()
    }
}
