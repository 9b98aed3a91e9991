//! End-to-end instantiation tests over the fixture namespace

use pretty_assertions::assert_eq;
use rig_core::{ConvertMode, Engine, InstantiateError, TargetError};
use rig_node::{ExtRef, Mapping, Node, Sequence, TypeTag, Value, CONVERT_KEY, RECURSIVE_KEY, TARGET_KEY};
use rig_symbol::SymbolResolver;
use rig_test_utils::{as_built, init_tracing, sample_namespace, target_node, BuildLog};
use std::sync::Arc;

fn engine() -> (Engine, BuildLog) {
    init_tracing();
    let (ns, log) = sample_namespace();
    (Engine::new(Arc::new(SymbolResolver::new(ns))), log)
}

/// The root node of the reference scenario:
/// `{_target_: pkg_a.Foo, a: {_target_: pkg_a.Bar, x: 1}, b: [1, 2]}`
fn reference_node() -> Mapping {
    let mut a = target_node("pkg_a.Bar");
    a.insert("x", 1i64);

    let mut b = Sequence::new();
    b.push(1i64);
    b.push(2i64);

    let mut node = target_node("pkg_a.Foo");
    node.insert("a", a);
    node.insert("b", b);
    node
}

#[test]
fn recursive_substitution_reference_scenario() {
    let (engine, _log) = engine();
    let prepared = engine.prepare(&reference_node(), None).unwrap();

    assert_eq!(prepared.target.path().to_string(), "pkg_a.Foo");

    let a = prepared.args.get("a").unwrap();
    let built = as_built(a.as_value().and_then(Value::as_ext).unwrap());
    assert_eq!(built.symbol, "pkg_a.Bar");
    assert_eq!(built.int_arg("x"), Some(1));

    let b = prepared.args.get("b").unwrap().as_sequence().unwrap();
    let values: Vec<_> = b.iter().cloned().collect();
    assert_eq!(values, vec![Node::from(1i64), Node::from(2i64)]);
}

#[test]
fn shallow_mode_reference_scenario() {
    let (engine, log) = engine();
    let mut overlay = Mapping::new();
    overlay.insert(RECURSIVE_KEY, false);

    let prepared = engine.prepare(&reference_node(), Some(&overlay)).unwrap();

    // `a` is raw data still carrying its own `_target_`; nothing was built.
    let a = prepared.args.get("a").unwrap().as_mapping().unwrap();
    assert!(a.declares_target());
    assert!(log.lock().is_empty());
}

#[test]
fn overlay_target_precedence() {
    let (engine, _log) = engine();
    let node = target_node("pkg_a.Foo");
    let mut overlay = Mapping::new();
    overlay.insert(TARGET_KEY, "pkg_a.Other");

    let prepared = engine.prepare(&node, Some(&overlay)).unwrap();
    assert_eq!(prepared.target.path().to_string(), "pkg_a.Other");
}

#[test]
fn construction_order_follows_declared_order() {
    let (engine, log) = engine();

    let mut first = target_node("pkg_a.Bar");
    first.insert("x", 1i64);
    let mut second = target_node("pkg_a.Other");
    second.insert("x", 2i64);
    let mut third = target_node("pkg_a.make_pair");
    third.insert("x", 3i64);

    let mut items = Sequence::new();
    items.push(third);

    let mut node = target_node("pkg_a.Foo");
    node.insert("alpha", first);
    node.insert("beta", second);
    node.insert("items", items);

    engine.instantiate(&node, None).unwrap();

    assert_eq!(
        *log.lock(),
        vec![
            "pkg_a.Bar".to_string(),
            "pkg_a.Other".to_string(),
            "pkg_a.make_pair".to_string(),
            "pkg_a.Foo".to_string(),
        ]
    );
}

#[test]
fn convert_policy_is_reported_not_enforced() {
    let (engine, _log) = engine();
    let mut node = target_node("pkg_a.Foo");
    node.insert(CONVERT_KEY, "partial");
    let inner = Mapping::new().with_tag("widgets.Panel");
    node.insert("panel", inner);

    let prepared = engine.prepare(&node, None).unwrap();
    assert_eq!(prepared.policy.convert, ConvertMode::Partial);

    // Tagged containers come through intact for the materializer.
    let panel = prepared.args.get("panel").unwrap().as_mapping().unwrap();
    assert_eq!(panel.tag(), Some(&TypeTag::new("widgets.Panel")));
}

#[test]
fn pre_resolved_symbol_as_overlay_target() {
    let (engine, _log) = engine();
    let symbol = engine.resolver().resolve("pkg_a.Bar").unwrap();

    let mut overlay = Mapping::new();
    overlay.insert(TARGET_KEY, ExtRef::new("pkg_a.Bar", symbol));
    overlay.insert("x", 4i64);

    let built = engine.instantiate(&Mapping::new(), Some(&overlay)).unwrap();
    assert_eq!(as_built(&built).int_arg("x"), Some(4));
}

#[test]
fn yaml_document_round_trip() {
    let (engine, _log) = engine();
    let doc = "\
_target_: pkg_a.Foo
a:
  _target_: pkg_a.Bar
  x: 1
b:
  - 1
  - 2
";
    let node = Node::from_yaml_str(doc).unwrap();
    let prepared = engine.prepare(node.as_mapping().unwrap(), None).unwrap();

    let a = prepared.args.get("a").unwrap();
    let built = as_built(a.as_value().and_then(Value::as_ext).unwrap());
    assert_eq!(built.symbol, "pkg_a.Bar");
}

#[test]
fn missing_target_everywhere_fails() {
    let (engine, _log) = engine();
    let mut node = Mapping::new();
    node.insert("x", 1i64);

    let err = engine.prepare(&node, None).unwrap_err();
    assert!(matches!(
        err,
        InstantiateError::Target(TargetError::Missing)
    ));
}

#[test]
fn instantiating_a_value_symbol_fails() {
    let (engine, _log) = engine();
    let node = target_node("pkg_a.VERSION");
    let err = engine.prepare(&node, None).unwrap_err();
    assert!(matches!(err, InstantiateError::Resolution(_)));
}

#[test]
fn failure_discards_partial_results() {
    let (engine, log) = engine();

    let mut good = target_node("pkg_a.Bar");
    good.insert("x", 1i64);
    let bad = target_node("nowhere.Nothing");

    let mut node = target_node("pkg_a.Foo");
    node.insert("good", good);
    node.insert("bad", bad);

    let err = engine.prepare(&node, None).unwrap_err();
    assert!(matches!(err, InstantiateError::Resolution(_)));

    // The first nested constructor ran before the failure; the root never
    // did. Fail-fast: no Prepared escaped.
    assert_eq!(*log.lock(), vec!["pkg_a.Bar".to_string()]);
}

#[test]
fn independent_trees_instantiate_concurrently() {
    let (ns, _log) = sample_namespace();
    let engine = Arc::new(Engine::new(Arc::new(SymbolResolver::new(ns))));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let mut node = target_node("pkg_a.Bar");
                node.insert("x", i as i64);
                let built = engine.instantiate(&node, None).unwrap();
                as_built(&built).int_arg("x")
            })
        })
        .collect();

    let mut results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    results.sort_unstable();
    assert_eq!(results, vec![0, 1, 2, 3]);
}
