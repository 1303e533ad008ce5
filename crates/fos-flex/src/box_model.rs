//! Computed Box Model
//!
//! Geometry written by the layout pass and read back by hosts.

use crate::value::{Direction, Edge, PhysicalEdge};

/// Width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub(crate) fn axis(&self, row: bool) -> f32 {
        if row { self.width } else { self.height }
    }

    pub(crate) fn set_axis(&mut self, row: bool, value: f32) {
        if row {
            self.width = value;
        } else {
            self.height = value;
        }
    }
}

/// Edge sizes (left, top, right, bottom)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeSizes {
    pub fn get(&self, edge: PhysicalEdge) -> f32 {
        match edge {
            PhysicalEdge::Left => self.left,
            PhysicalEdge::Top => self.top,
            PhysicalEdge::Right => self.right,
            PhysicalEdge::Bottom => self.bottom,
        }
    }

    pub(crate) fn set(&mut self, edge: PhysicalEdge, value: f32) {
        match edge {
            PhysicalEdge::Left => self.left = value,
            PhysicalEdge::Top => self.top = value,
            PhysicalEdge::Right => self.right = value,
            PhysicalEdge::Bottom => self.bottom = value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Computed layout of one node, relative to its parent's border box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub(crate) position: EdgeSizes,
    pub(crate) dimensions: Size,
    pub(crate) margin: EdgeSizes,
    pub(crate) border: EdgeSizes,
    pub(crate) padding: EdgeSizes,
    pub(crate) direction: Direction,
    pub(crate) had_overflow: bool,

    // Scratch state owned by the layout pass
    pub(crate) measured: Size,
    pub(crate) computed_flex_basis: Option<f32>,
    pub(crate) line_index: usize,
    pub(crate) last_owner_direction: Option<Direction>,
    /// Position and size from before pixel rounding, while rounded values
    /// are published
    pub(crate) unrounded: Option<(EdgeSizes, Size)>,
}

impl Layout {
    pub fn left(&self) -> f32 {
        self.position.left
    }

    pub fn top(&self) -> f32 {
        self.position.top
    }

    pub fn right(&self) -> f32 {
        self.position.right
    }

    pub fn bottom(&self) -> f32 {
        self.position.bottom
    }

    pub fn width(&self) -> f32 {
        self.dimensions.width
    }

    pub fn height(&self) -> f32 {
        self.dimensions.height
    }

    pub fn size(&self) -> Size {
        self.dimensions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn had_overflow(&self) -> bool {
        self.had_overflow
    }

    /// Resolved margin on an edge. Start/End follow the layout direction;
    /// shorthand edges have no single value.
    pub fn margin(&self, edge: Edge) -> Option<f32> {
        self.physical(edge).map(|e| self.margin.get(e))
    }

    pub fn border(&self, edge: Edge) -> Option<f32> {
        self.physical(edge).map(|e| self.border.get(e))
    }

    pub fn padding(&self, edge: Edge) -> Option<f32> {
        self.physical(edge).map(|e| self.padding.get(e))
    }

    fn physical(&self, edge: Edge) -> Option<PhysicalEdge> {
        let rtl = self.direction == Direction::Rtl;
        match edge {
            Edge::Left => Some(PhysicalEdge::Left),
            Edge::Top => Some(PhysicalEdge::Top),
            Edge::Right => Some(PhysicalEdge::Right),
            Edge::Bottom => Some(PhysicalEdge::Bottom),
            Edge::Start if rtl => Some(PhysicalEdge::Right),
            Edge::Start => Some(PhysicalEdge::Left),
            Edge::End if rtl => Some(PhysicalEdge::Left),
            Edge::End => Some(PhysicalEdge::Right),
            Edge::Horizontal | Edge::Vertical | Edge::All => None,
        }
    }
}

/// Layout in the coordinate space of the layout root
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbsoluteLayout {
    pub left: f32,
    pub top: f32,
    /// `left + width`
    pub right: f32,
    /// `top + height`
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}
