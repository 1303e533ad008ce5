//! Layout Tree
//!
//! An arena of flex nodes. Parents own their children through ordered id
//! lists and every node keeps a back-reference to its parent. Freed slots
//! are reused with a bumped generation.

use std::ops::{Index, IndexMut};

use crate::box_model::{AbsoluteLayout, Layout};
use crate::config::Config;
use crate::error::{FlexError, FlexResult};
use crate::invalidation::DirtyReason;
use crate::layout_cache::LayoutStats;
use crate::measure::{Measure, NodeType};
use crate::node::{Node, NodeId};
use crate::style::Style;

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Flex layout tree - arena of nodes
#[derive(Debug, Default)]
pub struct FlexTree {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    len: usize,
    pub(crate) config: Config,
    /// Counter of layout passes, used to scope cache validity
    pub(crate) generation: u32,
    pub(crate) stats: LayoutStats,
}

impl FlexTree {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            slots: Vec::with_capacity(64),
            free_list: Vec::new(),
            len: 0,
            config,
            generation: 0,
            stats: LayoutStats::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Counters from the most recent `calculate_layout`
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    // ========================================================================
    // Node lifetime
    // ========================================================================

    /// Create a node with the default style of this tree's config
    pub fn new_node(&mut self) -> NodeId {
        let style = if self.config.use_web_defaults { Style::web() } else { Style::default() };
        self.new_node_with_style(style)
    }

    pub fn new_node_with_style(&mut self, style: Style) -> NodeId {
        self.len += 1;
        let node = Node::new(style);
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, node: Some(node) });
        NodeId::new(index, 0)
    }

    /// Free a node and its whole subtree, detaching it from its parent first
    pub fn free(&mut self, id: NodeId) -> FlexResult<()> {
        self.check(id)?;
        if let Some(parent) = self[id].parent {
            self.remove_child(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(current.index);
                self.len -= 1;
            }
        }
        tracing::trace!("freed subtree at {}", id);
        Ok(())
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.len
    }

    /// Whether `id` names a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn node(&self, id: NodeId) -> FlexResult<&Node> {
        self.get(id).ok_or(FlexError::InvalidNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> FlexResult<&mut Node> {
        self.get_mut(id).ok_or(FlexError::InvalidNode(id))
    }

    pub(crate) fn check(&self, id: NodeId) -> FlexResult<()> {
        self.node(id).map(|_| ())
    }

    // ========================================================================
    // Tree structure
    // ========================================================================

    /// Insert `child` into `parent` at `index`
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> FlexResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if parent_node.measure.is_some() {
            return Err(FlexError::MeasuredNodeCannotHaveChildren(parent));
        }
        if let Some(existing) = child_node.parent {
            return Err(FlexError::AlreadyHasParent { child, parent: existing });
        }
        let count = parent_node.children.len();
        if index > count {
            return Err(FlexError::ChildIndexOutOfRange { index, count });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(FlexError::WouldCreateCycle { parent, child });
        }

        self[parent].children.insert(index, child);
        self[child].parent = Some(parent);
        self.mark_dirty_with_reason(parent, DirtyReason::ChildInserted);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> FlexResult<()> {
        let count = self.child_count(parent)?;
        self.insert_child(parent, child, count)
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> FlexResult<()> {
        self.check(child)?;
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(FlexError::NotAChild { parent, child })?;
        self.detach(parent, position);
        Ok(())
    }

    pub fn remove_child_at_index(&mut self, parent: NodeId, index: usize) -> FlexResult<NodeId> {
        let count = self.child_count(parent)?;
        if index >= count {
            return Err(FlexError::ChildIndexOutOfRange { index, count });
        }
        Ok(self.detach(parent, index))
    }

    pub fn remove_all_children(&mut self, parent: NodeId) -> FlexResult<()> {
        let children = std::mem::take(&mut self.node_mut(parent)?.children);
        if children.is_empty() {
            return Ok(());
        }
        for child in children {
            self.reset_detached(child);
        }
        self.mark_dirty_with_reason(parent, DirtyReason::ChildRemoved);
        Ok(())
    }

    fn detach(&mut self, parent: NodeId, index: usize) -> NodeId {
        let child = self[parent].children.remove(index);
        self.reset_detached(child);
        self.mark_dirty_with_reason(parent, DirtyReason::ChildRemoved);
        child
    }

    fn reset_detached(&mut self, child: NodeId) {
        let node = &mut self[child];
        node.parent = None;
        node.layout = Layout::default();
        self.mark_dirty_with_reason(child, DirtyReason::ChildRemoved);
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    pub fn child(&self, parent: NodeId, index: usize) -> FlexResult<NodeId> {
        let children = &self.node(parent)?.children;
        children
            .get(index)
            .copied()
            .ok_or(FlexError::ChildIndexOutOfRange { index, count: children.len() })
    }

    pub fn children(&self, parent: NodeId) -> FlexResult<&[NodeId]> {
        Ok(&self.node(parent)?.children)
    }

    pub fn child_count(&self, parent: NodeId) -> FlexResult<usize> {
        Ok(self.node(parent)?.children.len())
    }

    /// Parent of a node, `None` for a root
    pub fn parent(&self, id: NodeId) -> FlexResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    // ========================================================================
    // Node attributes
    // ========================================================================

    /// Install or clear the measure callback of a leaf
    pub fn set_measure_func(&mut self, id: NodeId, measure: Option<Box<dyn Measure>>) -> FlexResult<()> {
        let node = self.node_mut(id)?;
        if measure.is_some() && !node.children.is_empty() {
            return Err(FlexError::ChildrenPreventMeasureFunc(id));
        }
        node.measure = measure;
        self.mark_dirty_with_reason(id, DirtyReason::MeasureChanged);
        Ok(())
    }

    pub fn has_measure_func(&self, id: NodeId) -> FlexResult<bool> {
        Ok(self.node(id)?.measure.is_some())
    }

    pub fn set_node_type(&mut self, id: NodeId, node_type: NodeType) -> FlexResult<()> {
        let node = self.node_mut(id)?;
        if node.node_type != node_type {
            node.node_type = node_type;
            self.mark_dirty_with_reason(id, DirtyReason::StyleChanged);
        }
        Ok(())
    }

    pub fn node_type(&self, id: NodeId) -> FlexResult<NodeType> {
        Ok(self.node(id)?.node_type)
    }

    /// Whether the layout changed since the host last acknowledged it
    pub fn has_new_layout(&self, id: NodeId) -> FlexResult<bool> {
        Ok(self.node(id)?.has_new_layout)
    }

    pub fn set_has_new_layout(&mut self, id: NodeId, value: bool) -> FlexResult<()> {
        self.node_mut(id)?.has_new_layout = value;
        Ok(())
    }

    pub fn style(&self, id: NodeId) -> FlexResult<&Style> {
        Ok(&self.node(id)?.style)
    }

    /// Replace the whole style
    pub fn set_style(&mut self, id: NodeId, style: Style) -> FlexResult<()> {
        let node = self.node_mut(id)?;
        if node.style != style {
            node.style = style;
            self.mark_dirty_with_reason(id, DirtyReason::StyleChanged);
        }
        Ok(())
    }

    /// Copy the style of `src` onto `dst`
    pub fn copy_style(&mut self, dst: NodeId, src: NodeId) -> FlexResult<()> {
        let style = self.node(src)?.style;
        self.set_style(dst, style)
    }

    pub fn layout(&self, id: NodeId) -> FlexResult<&Layout> {
        Ok(&self.node(id)?.layout)
    }

    /// Layout in the coordinate space of the outermost ancestor
    pub fn absolute_layout(&self, id: NodeId) -> FlexResult<AbsoluteLayout> {
        let node = self.node(id)?;
        let (width, height) = (node.layout.width(), node.layout.height());
        let (mut left, mut top) = (0.0, 0.0);
        let mut current = Some(id);
        while let Some(cur) = current {
            let n = &self[cur];
            left += n.layout.left();
            top += n.layout.top();
            current = n.parent;
        }
        Ok(AbsoluteLayout {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        })
    }

    pub fn is_dirty(&self, id: NodeId) -> FlexResult<bool> {
        Ok(self.node(id)?.dirty)
    }
}

impl Index<NodeId> for FlexTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("invalid node {id}"),
        }
    }
}

impl IndexMut<NodeId> for FlexTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("invalid node {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_model::Size;
    use crate::error::MeasureError;
    use crate::value::MeasureMode;

    fn fixed_measure() -> Box<dyn Measure> {
        Box::new(|_: f32, _: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
            Ok(Size::new(1.0, 1.0))
        })
    }

    #[test]
    fn test_build_tree() {
        let mut tree = FlexTree::new();
        let root = tree.new_node();
        let a = tree.new_node();
        let b = tree.new_node();
        tree.append_child(root, a).unwrap();
        tree.insert_child(root, b, 0).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[b, a]);
        assert_eq!(tree.parent(a).unwrap(), Some(root));
        assert_eq!(tree.parent(root).unwrap(), None);
        assert_eq!(tree.child(root, 1).unwrap(), a);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_insert_errors() {
        let mut tree = FlexTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        let other = tree.new_node();

        assert_eq!(
            tree.insert_child(root, child, 1),
            Err(FlexError::ChildIndexOutOfRange { index: 1, count: 0 })
        );
        tree.append_child(root, child).unwrap();
        assert_eq!(
            tree.append_child(other, child),
            Err(FlexError::AlreadyHasParent { child, parent: root })
        );
        assert_eq!(
            tree.append_child(child, root),
            Err(FlexError::WouldCreateCycle { parent: child, child: root })
        );
        assert_eq!(
            tree.append_child(root, root),
            Err(FlexError::WouldCreateCycle { parent: root, child: root })
        );
    }

    #[test]
    fn test_measure_func_exclusive_with_children() {
        let mut tree = FlexTree::new();
        let leaf = tree.new_node();
        let child = tree.new_node();
        tree.set_measure_func(leaf, Some(fixed_measure())).unwrap();
        assert!(tree.has_measure_func(leaf).unwrap());
        assert_eq!(
            tree.append_child(leaf, child),
            Err(FlexError::MeasuredNodeCannotHaveChildren(leaf))
        );

        tree.set_measure_func(leaf, None).unwrap();
        tree.append_child(leaf, child).unwrap();
        assert_eq!(
            tree.set_measure_func(leaf, Some(fixed_measure())),
            Err(FlexError::ChildrenPreventMeasureFunc(leaf))
        );
    }

    #[test]
    fn test_free_recycles_slot() {
        let mut tree = FlexTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        let grandchild = tree.new_node();
        tree.append_child(root, child).unwrap();
        tree.append_child(child, grandchild).unwrap();

        tree.free(child).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.child_count(root).unwrap(), 0);
        assert_eq!(tree.layout(child).err(), Some(FlexError::InvalidNode(child)));

        let reused = tree.new_node();
        assert!(reused.index() == child.index() || reused.index() == grandchild.index());
        assert_ne!(reused, child);
        assert_ne!(reused, grandchild);
    }

    #[test]
    fn test_remove_children() {
        let mut tree = FlexTree::new();
        let root = tree.new_node();
        let a = tree.new_node();
        let b = tree.new_node();
        let c = tree.new_node();
        for child in [a, b, c] {
            tree.append_child(root, child).unwrap();
        }

        tree.remove_child(root, b).unwrap();
        assert_eq!(tree.children(root).unwrap(), &[a, c]);
        assert_eq!(tree.parent(b).unwrap(), None);
        assert_eq!(tree.remove_child(root, b), Err(FlexError::NotAChild { parent: root, child: b }));

        assert_eq!(tree.remove_child_at_index(root, 1).unwrap(), c);
        tree.remove_all_children(root).unwrap();
        assert_eq!(tree.child_count(root).unwrap(), 0);
        assert_eq!(tree.parent(a).unwrap(), None);
    }
}
