//! Layout Nodes
//!
//! Nodes live in the slots of a [`FlexTree`](crate::FlexTree) and are named
//! by a [`NodeId`]. The id carries the generation of its slot, so a handle
//! kept after `free` no longer resolves.

use std::fmt;

use crate::box_model::Layout;
use crate::layout_cache::LayoutCache;
use crate::measure::{Measure, NodeType};
use crate::style::Style;

/// Handle to a node in a [`FlexTree`](crate::FlexTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A node with its style and computed layout
pub struct Node {
    pub(crate) style: Style,
    pub(crate) layout: Layout,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) dirty: bool,
    pub(crate) has_new_layout: bool,
    pub(crate) node_type: NodeType,
    pub(crate) measure: Option<Box<dyn Measure>>,
    pub(crate) cache: LayoutCache,
}

impl Node {
    pub(crate) fn new(style: Style) -> Self {
        Self {
            style,
            layout: Layout::default(),
            parent: None,
            children: Vec::new(),
            dirty: true,
            has_new_layout: true,
            node_type: NodeType::Default,
            measure: None,
            cache: LayoutCache::new(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("style", &self.style)
            .field("layout", &self.layout)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("dirty", &self.dirty)
            .field("node_type", &self.node_type)
            .field("measure", &self.measure.is_some())
            .finish()
    }
}
