//! Testing utilities for the rig workspace
//!
//! Shared fixtures: a populated namespace with recording constructors, node
//! builders, and tracing setup.

#![allow(missing_docs)]

use parking_lot::Mutex;
use rig_node::{ExtRef, Mapping, TARGET_KEY};
use rig_symbol::{ConstructError, StaticNamespace};
use std::sync::{Arc, Once};

/// Construction order observed by the recording constructors
pub type BuildLog = Arc<Mutex<Vec<String>>>;

/// Instance produced by every fixture constructor
///
/// Captures the symbol that built it and the argument tree it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub symbol: String,
    pub args: Mapping,
}

impl Built {
    /// Integer field of the captured args, if present
    pub fn int_arg(&self, key: &str) -> Option<i64> {
        self.args.get(key)?.as_value()?.as_int()
    }
}

fn recording_ctor(
    path: &str,
    log: &BuildLog,
) -> impl Fn(Mapping) -> Result<ExtRef, ConstructError> + Send + Sync + 'static {
    let path = path.to_string();
    let log = Arc::clone(log);
    move |args: Mapping| {
        log.lock().push(path.clone());
        Ok(ExtRef::new(
            path.clone(),
            Built {
                symbol: path.clone(),
                args,
            },
        ))
    }
}

/// Namespace populated with the fixture symbols, plus the log their
/// constructors append to in construction order
///
/// Registered symbols:
/// - types `pkg_a.Foo`, `pkg_a.Bar`, `pkg_a.Other`, `widgets.Panel`
/// - callable `pkg_a.make_pair`
/// - value `pkg_a.VERSION`
pub fn sample_namespace() -> (Arc<StaticNamespace>, BuildLog) {
    let log: BuildLog = Arc::new(Mutex::new(Vec::new()));
    let ns = StaticNamespace::new();
    for path in ["pkg_a.Foo", "pkg_a.Bar", "pkg_a.Other", "widgets.Panel"] {
        ns.register_type(path, recording_ctor(path, &log)).unwrap();
    }
    ns.register_callable("pkg_a.make_pair", recording_ctor("pkg_a.make_pair", &log))
        .unwrap();
    ns.register_value("pkg_a.VERSION", ExtRef::new("version", "1.0"))
        .unwrap();
    (Arc::new(ns), log)
}

/// Mapping declaring `path` as its target
pub fn target_node(path: &str) -> Mapping {
    let mut node = Mapping::new();
    node.insert(TARGET_KEY, path);
    node
}

/// Downcast a constructed object back to the fixture instance
pub fn as_built(ext: &ExtRef) -> &Built {
    ext.downcast_ref::<Built>()
        .unwrap_or_else(|| panic!("not a Built instance: {ext:?}"))
}

static INIT: Once = Once::new();

/// Install a test tracing subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
