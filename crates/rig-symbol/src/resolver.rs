//! Dotted-path symbol resolution
//!
//! [`SymbolResolver::resolve`] turns a dotted path into a [`Symbol`] by
//! loading the longest importable module prefix, then walking the remaining
//! segments as attribute accesses. Each prefix attempt is an explicit
//! success/failure outcome; the search short-circuits on the first success.

use crate::namespace::{Export, Module, NamespaceProvider};
use crate::path::{PathError, SymbolPath};
use crate::symbol::Symbol;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

/// Errors resolving a dotted path to a symbol
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Empty input path
    #[error("cannot resolve an empty path")]
    EmptyPath,

    /// Malformed input path
    #[error("invalid symbol path: {0}")]
    InvalidPath(#[from] PathError),

    /// No prefix of the path loads as a module
    #[error("no loadable module prefix for '{path}'")]
    NoModulePrefix { path: String },

    /// Attribute access failed and the fallback module load failed too
    #[error("'{owner}' has no attribute '{attribute}', and '{owner}.{attribute}' is not a loadable module")]
    MissingAttribute { owner: String, attribute: String },

    /// Path resolved to something that cannot be constructed
    #[error("'{path}' resolved to a {kind}, which is neither a type nor a callable")]
    NotConstructible { path: String, kind: &'static str },
}

/// What a traversal step landed on
enum Resolved {
    Module(Module),
    Symbol(Symbol),
    Value,
}

impl Resolved {
    fn kind(&self) -> &'static str {
        match self {
            Self::Module(_) => "module",
            Self::Symbol(_) => "symbol",
            Self::Value => "value",
        }
    }
}

/// Resolves dotted paths against a [`NamespaceProvider`]
///
/// Owns an import-once cache of successfully loaded modules: a module loaded
/// once is served from the cache on every later lookup, and the cache is safe
/// for concurrent reads. Failed loads are not cached, so a stateful provider
/// may succeed on a later attempt.
pub struct SymbolResolver {
    provider: Arc<dyn NamespaceProvider>,
    modules: RwLock<HashMap<String, Module>>,
}

impl SymbolResolver {
    /// Resolver over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn NamespaceProvider>) -> Self {
        Self {
            provider,
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a dotted path to a type or callable
    ///
    /// Tries each prefix as a module, longest first, shrinking one segment at
    /// a time. The first prefix that loads becomes the base; the remaining
    /// segments resolve as attribute accesses, where a missing attribute
    /// falls back to loading (accumulated path + attribute) as a module
    /// before failing.
    ///
    /// # Errors
    /// See [`ResolveError`]; a value that is neither a type nor a callable is
    /// never returned.
    pub fn resolve(&self, path: &str) -> Result<Symbol, ResolveError> {
        if path.is_empty() {
            return Err(ResolveError::EmptyPath);
        }
        let path = SymbolPath::from_str(path)?;

        let (matched, module) = self.load_base(&path)?;
        let mut current = Resolved::Module(module);
        let mut acc = path.prefix(matched);

        for segment in &path.segments()[matched..] {
            acc = acc.child(segment);
            let attr = match &current {
                Resolved::Module(m) => m.attr(segment).cloned(),
                _ => None,
            };
            current = match attr {
                Some(Export::Module(link)) => {
                    let owner = acc.parent().unwrap_or_else(|| acc.clone());
                    Resolved::Module(self.load_module(&link).ok_or_else(|| {
                        ResolveError::MissingAttribute {
                            owner: owner.to_string(),
                            attribute: segment.clone(),
                        }
                    })?)
                }
                Some(Export::Symbol(s)) => Resolved::Symbol(s),
                Some(Export::Value(_)) => Resolved::Value,
                // The attribute may be a submodule the provider has not
                // loaded yet; give the provider one more chance at the
                // accumulated path.
                None => {
                    let owner = acc.parent().unwrap_or_else(|| acc.clone());
                    Resolved::Module(self.load_module(&acc).ok_or_else(|| {
                        ResolveError::MissingAttribute {
                            owner: owner.to_string(),
                            attribute: segment.clone(),
                        }
                    })?)
                }
            };
        }

        match current {
            Resolved::Symbol(symbol) => {
                debug!(path = %path, kind = %symbol.kind(), "resolved symbol");
                Ok(symbol)
            }
            other => Err(ResolveError::NotConstructible {
                path: path.to_string(),
                kind: other.kind(),
            }),
        }
    }

    /// Longest-first prefix search for the base module
    fn load_base(&self, path: &SymbolPath) -> Result<(usize, Module), ResolveError> {
        for n in (1..=path.len()).rev() {
            let prefix = path.prefix(n);
            trace!(prefix = %prefix, "attempting module load");
            if let Some(module) = self.load_module(&prefix) {
                return Ok((n, module));
            }
        }
        Err(ResolveError::NoModulePrefix {
            path: path.to_string(),
        })
    }

    /// Load a module through the cache (successes only)
    fn load_module(&self, path: &SymbolPath) -> Option<Module> {
        let key = path.to_string();
        if let Some(module) = self.modules.read().get(&key) {
            trace!(module = %key, "module cache hit");
            return Some(module.clone());
        }
        let module = self.provider.load(path)?;
        debug!(module = %key, "module loaded");
        self.modules.write().insert(key, module.clone());
        Some(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::StaticNamespace;
    use crate::symbol::{ConstructError, SymbolKind};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rig_node::{ExtRef, Mapping};

    fn unit_ctor(_: Mapping) -> Result<ExtRef, ConstructError> {
        Ok(ExtRef::new("unit", ()))
    }

    fn sample_resolver() -> SymbolResolver {
        let ns = StaticNamespace::new();
        ns.register_type("pkg_a.Foo", unit_ctor).unwrap();
        ns.register_callable("pkg_a.make_bar", unit_ctor).unwrap();
        ns.register_type("pkg_a.sub.Deep", unit_ctor).unwrap();
        ns.register_value("pkg_a.VERSION", ExtRef::new("version", "1.0"))
            .unwrap();
        SymbolResolver::new(Arc::new(ns))
    }

    #[test]
    fn resolve_type() {
        let resolver = sample_resolver();
        let sym = resolver.resolve("pkg_a.Foo").unwrap();
        assert_eq!(sym.kind(), SymbolKind::Type);
        assert_eq!(sym.path().to_string(), "pkg_a.Foo");
    }

    #[test]
    fn resolve_callable() {
        let resolver = sample_resolver();
        let sym = resolver.resolve("pkg_a.make_bar").unwrap();
        assert_eq!(sym.kind(), SymbolKind::Callable);
    }

    #[test]
    fn resolve_nested_module_symbol() {
        let resolver = sample_resolver();
        let sym = resolver.resolve("pkg_a.sub.Deep").unwrap();
        assert_eq!(sym.path().to_string(), "pkg_a.sub.Deep");
    }

    #[test]
    fn resolve_empty_path_fails() {
        let resolver = sample_resolver();
        assert!(matches!(
            resolver.resolve(""),
            Err(ResolveError::EmptyPath)
        ));
    }

    #[test]
    fn resolve_unknown_root_fails() {
        let resolver = sample_resolver();
        assert!(matches!(
            resolver.resolve("nowhere.Foo"),
            Err(ResolveError::NoModulePrefix { .. })
        ));
    }

    #[test]
    fn resolve_missing_attribute_fails() {
        let resolver = sample_resolver();
        let err = resolver.resolve("pkg_a.Missing").unwrap_err();
        assert!(matches!(err, ResolveError::MissingAttribute { .. }));
        assert!(err.to_string().contains("pkg_a"));
    }

    #[test]
    fn resolve_module_is_not_constructible() {
        let resolver = sample_resolver();
        let err = resolver.resolve("pkg_a.sub").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotConstructible { kind: "module", .. }
        ));
    }

    #[test]
    fn resolve_value_is_not_constructible() {
        let resolver = sample_resolver();
        let err = resolver.resolve("pkg_a.VERSION").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotConstructible { kind: "value", .. }
        ));
    }

    #[test]
    fn resolve_attribute_on_symbol_fails() {
        let resolver = sample_resolver();
        let err = resolver.resolve("pkg_a.Foo.method").unwrap_err();
        assert!(matches!(err, ResolveError::MissingAttribute { .. }));
    }

    #[test]
    fn resolve_invalid_path_fails() {
        let resolver = sample_resolver();
        assert!(matches!(
            resolver.resolve("pkg a.Foo"),
            Err(ResolveError::InvalidPath(_))
        ));
    }

    /// Provider where loading `pkg` makes `pkg.lazy` loadable, the way a
    /// package init pulls in its submodules.
    struct LazyProvider {
        primed: Mutex<bool>,
    }

    impl NamespaceProvider for LazyProvider {
        fn load(&self, path: &SymbolPath) -> Option<Module> {
            let mut primed = self.primed.lock();
            match path.to_string().as_str() {
                "pkg" => {
                    *primed = true;
                    Some(Module::new())
                }
                "pkg.lazy" if *primed => {
                    let mut module = Module::new();
                    module.insert(
                        "Thing",
                        Export::Symbol(Symbol::new_type(
                            "pkg.lazy.Thing".parse().unwrap(),
                            unit_ctor,
                        )),
                    );
                    Some(module)
                }
                _ => None,
            }
        }
    }

    #[test]
    fn resolve_falls_back_to_submodule_import() {
        // "pkg.lazy" is not loadable until "pkg" has been loaded, so the
        // prefix search lands on "pkg" and traversal must fall back to
        // importing "pkg.lazy" for the missing attribute.
        let resolver = SymbolResolver::new(Arc::new(LazyProvider {
            primed: Mutex::new(false),
        }));
        let sym = resolver.resolve("pkg.lazy.Thing").unwrap();
        assert_eq!(sym.path().to_string(), "pkg.lazy.Thing");
    }

    #[test]
    fn resolver_caches_loaded_modules() {
        struct CountingProvider {
            loads: Mutex<usize>,
            inner: StaticNamespace,
        }
        impl NamespaceProvider for CountingProvider {
            fn load(&self, path: &SymbolPath) -> Option<Module> {
                *self.loads.lock() += 1;
                self.inner.load(path)
            }
        }

        let inner = StaticNamespace::new();
        inner.register_type("pkg.Foo", unit_ctor).unwrap();
        let provider = Arc::new(CountingProvider {
            loads: Mutex::new(0),
            inner,
        });
        let resolver = SymbolResolver::new(provider.clone());

        resolver.resolve("pkg.Foo").unwrap();
        let after_first = *provider.loads.lock();
        resolver.resolve("pkg.Foo").unwrap();
        let after_second = *provider.loads.lock();

        // Only the failed longest-prefix attempt ("pkg.Foo" as a module)
        // goes back to the provider; the base module is served from cache.
        assert_eq!(after_second, after_first + 1);
    }
}
