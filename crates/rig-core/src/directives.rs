//! Two-source directive lookup
//!
//! Reserved keys (`_target_`, `_recursive_`, `_convert_`) can arrive in a
//! node's declared fields or in the call-site overlay. Extraction pops the
//! key from **both** sources so it never leaks into the downstream field set,
//! and the overlay value wins unconditionally when both are present.

use rig_node::{Mapping, Node};

/// The overlay/node pair a directive is extracted from
pub(crate) struct DirectiveSources<'a> {
    overlay: &'a mut Mapping,
    node: &'a mut Mapping,
}

impl<'a> DirectiveSources<'a> {
    pub(crate) fn new(overlay: &'a mut Mapping, node: &'a mut Mapping) -> Self {
        Self { overlay, node }
    }

    /// Pop `key` from both sources, returning (overlay value, node value)
    pub(crate) fn pop_each(&mut self, key: &str) -> (Option<Node>, Option<Node>) {
        (self.overlay.remove(key), self.node.remove(key))
    }
}
