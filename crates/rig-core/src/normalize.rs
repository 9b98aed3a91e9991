//! Target normalization for serialization-facing tooling
//!
//! Overlays supplied programmatically can carry pre-resolved [`Symbol`]s
//! under `_target_`. Before a tree is handed to anything that prints or
//! serializes it, those references are rewritten back to their canonical
//! dotted-path strings.

use rig_node::{Node, Value, TARGET_KEY};
use rig_symbol::Symbol;

/// Rewrite every pre-resolved symbol stored under `_target_` in the tree to
/// its dotted-path string
///
/// Walks mappings and sequences recursively. String targets and targets of
/// any other shape are left untouched.
pub fn normalize_targets(node: &mut Node) {
    match node {
        Node::Mapping(mapping) => {
            let path = mapping
                .get(TARGET_KEY)
                .and_then(Node::as_value)
                .and_then(Value::as_ext)
                .and_then(|ext| ext.downcast_ref::<Symbol>())
                .map(|symbol| symbol.path().to_string());
            if let Some(path) = path {
                mapping.insert(TARGET_KEY, path);
            }
            for value in mapping.values_mut() {
                normalize_targets(value);
            }
        }
        Node::Sequence(sequence) => {
            for item in sequence.iter_mut() {
                normalize_targets(item);
            }
        }
        Node::Value(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_node::{ExtRef, Mapping, Sequence};
    use rig_symbol::SymbolPath;
    use std::str::FromStr;

    fn symbol(path: &str) -> Symbol {
        Symbol::new_type(SymbolPath::from_str(path).unwrap(), |_| {
            Ok(ExtRef::new("unit", ()))
        })
    }

    fn target_of(node: &Node) -> Option<&str> {
        node.as_mapping()?
            .get(TARGET_KEY)?
            .as_value()?
            .as_str()
    }

    #[test]
    fn symbol_target_becomes_path_string() {
        let mut m = Mapping::new();
        m.insert(TARGET_KEY, ExtRef::new("sym", symbol("pkg_a.Foo")));
        m.insert("x", 1i64);
        let mut node = Node::from(m);

        normalize_targets(&mut node);
        assert_eq!(target_of(&node), Some("pkg_a.Foo"));
    }

    #[test]
    fn string_target_is_untouched() {
        let mut m = Mapping::new();
        m.insert(TARGET_KEY, "pkg_a.Foo");
        let mut node = Node::from(m);

        normalize_targets(&mut node);
        assert_eq!(target_of(&node), Some("pkg_a.Foo"));
    }

    #[test]
    fn nested_occurrences_are_all_rewritten() {
        let mut inner = Mapping::new();
        inner.insert(TARGET_KEY, ExtRef::new("sym", symbol("pkg_a.Bar")));

        let mut element = Mapping::new();
        element.insert(TARGET_KEY, ExtRef::new("sym", symbol("pkg_a.Baz")));
        let mut seq = Sequence::new();
        seq.push(element);

        let mut outer = Mapping::new();
        outer.insert(TARGET_KEY, ExtRef::new("sym", symbol("pkg_a.Foo")));
        outer.insert("inner", inner);
        outer.insert("items", seq);
        let mut node = Node::from(outer);

        normalize_targets(&mut node);

        let outer = node.as_mapping().unwrap();
        assert_eq!(target_of(&node), Some("pkg_a.Foo"));
        assert_eq!(target_of(outer.get("inner").unwrap()), Some("pkg_a.Bar"));
        let items = outer.get("items").unwrap().as_sequence().unwrap();
        assert_eq!(target_of(items.get(0).unwrap()), Some("pkg_a.Baz"));
    }

    #[test]
    fn non_symbol_ext_target_is_untouched() {
        let ext = ExtRef::new("opaque", 7u8);
        let mut m = Mapping::new();
        m.insert(TARGET_KEY, ext.clone());
        let mut node = Node::from(m);

        normalize_targets(&mut node);
        let value = node.as_mapping().unwrap().get(TARGET_KEY).unwrap();
        assert_eq!(value.as_value().and_then(Value::as_ext), Some(&ext));
    }

    #[test]
    fn scalars_are_untouched() {
        let mut node = Node::from(3i64);
        normalize_targets(&mut node);
        assert_eq!(node, Node::from(3i64));
    }
}
