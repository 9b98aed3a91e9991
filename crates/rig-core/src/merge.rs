//! Call-site keyword overlay merging

use rig_node::Mapping;

/// Overlay call-site keyword fields onto a node's declared fields
///
/// Overlay values replace node values per key; all other node fields are
/// preserved unchanged. Key order is deterministic: node order first, then
/// overlay-only keys appended in overlay order.
///
/// The merged mapping is deliberately untyped — no object-type tag is taken
/// from either side; the caller restores the tag where one is needed. The
/// node's tree-wide flags carry over.
#[must_use]
pub fn merge_overrides(node: &Mapping, overlay: &Mapping) -> Mapping {
    let mut merged = Mapping::new().with_flags(node.flags());
    for (key, value) in node.iter() {
        merged.insert(key, overlay.get(key).unwrap_or(value).clone());
    }
    for (key, value) in overlay.iter() {
        if !merged.contains_key(key) {
            merged.insert(key, value.clone());
        }
    }
    merged
}
