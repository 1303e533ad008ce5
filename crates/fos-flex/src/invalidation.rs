//! Dirty Propagation
//!
//! A mutation marks the node dirty and walks up the ancestor chain until it
//! reaches a node that is already dirty. Clean nodes keep their cached
//! results; siblings are never touched.

use crate::error::FlexResult;
use crate::layout_tree::FlexTree;
use crate::node::NodeId;

/// What caused a node to become dirty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirtyReason {
    /// A style property changed value
    StyleChanged,
    /// A child was inserted
    ChildInserted,
    /// A child was removed, or this node was detached
    ChildRemoved,
    /// The measure callback was replaced
    MeasureChanged,
    /// The host asked for it
    Explicit,
}

impl FlexTree {
    /// Force `node` and its ancestors to be laid out again.
    ///
    /// Hosts call this when content behind a measure callback changed.
    pub fn mark_dirty(&mut self, node: NodeId) -> FlexResult<()> {
        self.check(node)?;
        self.mark_dirty_with_reason(node, DirtyReason::Explicit);
        Ok(())
    }

    pub(crate) fn mark_dirty_with_reason(&mut self, node: NodeId, reason: DirtyReason) {
        let mut current = Some(node);
        let mut depth = 0usize;
        while let Some(id) = current {
            let n = &mut self[id];
            if n.dirty {
                break;
            }
            n.dirty = true;
            n.cache.clear();
            n.layout.computed_flex_basis = None;
            current = n.parent;
            depth += 1;
        }
        tracing::trace!("{:?} dirtied {} node(s) from {}", reason, depth, node);
    }
}
