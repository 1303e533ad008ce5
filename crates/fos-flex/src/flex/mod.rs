//! Flexbox Layout
//!
//! Implements the flex layout algorithm over a [`FlexTree`]. Every node is
//! visited through [`FlexTree::layout_node`], which answers from the node's
//! cache when it can and otherwise runs [`FlexTree::compute_layout`].
//!
//! A request either only measures a node (the parent needs its size to
//! distribute space) or performs layout (the node's children are placed).
//! Measurements never touch positions.
//!
//! All positions are written relative to the parent's border box, in the
//! coordinate of the leading edge of each flex axis; the trailing pass of
//! the parent then fills in the opposite edges.

mod absolute;
mod align;
pub(crate) mod axis;
mod basis;
mod container;
mod leaf;
mod lines;

use crate::box_model::EdgeSizes;
use crate::error::FlexResult;
use crate::layout_cache::{CachedMeasurement, Constraints, LayoutStats, Relaxation};
use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{FlexDirection, Style};
use crate::value::{Direction, MeasureMode, PhysicalEdge};

/// One call into the layout of a node
#[derive(Debug, Clone, Copy)]
pub(crate) struct Request {
    pub constraints: Constraints,
    pub owner_direction: Direction,
    /// Definite inner width of the owner, for percentages
    pub owner_width: Option<f32>,
    /// Definite inner height of the owner, for percentages
    pub owner_height: Option<f32>,
    pub perform_layout: bool,
}

impl FlexTree {
    /// Lay out the subtree rooted at `root`.
    ///
    /// `root` is treated as a layout root even if it has a parent. Missing
    /// available sizes leave that axis sized by content.
    pub fn calculate_layout(
        &mut self,
        root: NodeId,
        available_width: Option<f32>,
        available_height: Option<f32>,
        direction: Direction,
    ) -> FlexResult<()> {
        self.check(root)?;
        let available_width = available_width.filter(|w| w.is_finite());
        let available_height = available_height.filter(|h| h.is_finite());

        self.generation = self.generation.wrapping_add(1);
        self.stats = LayoutStats::default();
        tracing::debug!(
            "Calculating layout for {} ({} nodes, available {:?} x {:?})",
            root,
            self.node_count(),
            available_width,
            available_height
        );

        let style = self[root].style;
        let resolved = style.direction.resolve(direction);
        let (width, width_mode) = root_constraint(&style, resolved, true, available_width, available_width);
        let (height, height_mode) = root_constraint(&style, resolved, false, available_height, available_width);

        let request = Request {
            constraints: Constraints::new(width, width_mode, height, height_mode),
            owner_direction: direction,
            owner_width: available_width,
            owner_height: available_height,
            perform_layout: true,
        };
        self.restore_unrounded(root);
        self.layout_node(root, &request);
        self.position_root(root, available_width, available_height);

        if self.config.point_scale_factor != 0.0 {
            self.round_layout(root);
        }

        let stats = self.stats;
        tracing::debug!(
            "Layout done: {} visited, {} laid out, {} measured, {} cache hits ({:.0}%), {} measure calls",
            stats.nodes_visited,
            stats.layouts_computed,
            stats.measurements_computed,
            stats.cache_hits,
            stats.hit_rate() * 100.0,
            stats.measure_calls
        );
        Ok(())
    }

    /// Visit a node: answer from the cache or compute, then record.
    ///
    /// Returns whether anything was computed.
    pub(crate) fn layout_node(&mut self, id: NodeId, request: &Request) -> bool {
        self.stats.nodes_visited += 1;
        let constraints = request.constraints.normalized();
        let request = Request { constraints, ..*request };
        let generation = self.generation;
        let scale = self.config.point_scale_factor;

        let node = &mut self[id];
        let need_to_visit = (node.dirty && node.cache.generation != generation)
            || node.layout.last_owner_direction != Some(request.owner_direction);
        if need_to_visit {
            node.cache.clear();
        }

        let cached = if need_to_visit {
            None
        } else if node.measure.is_some() {
            let direction = node.style.direction.resolve(request.owner_direction);
            let relaxation = Relaxation {
                margin_row: node.style.margin_for_axis(FlexDirection::Row, direction, request.owner_width),
                margin_column: node.style.margin_for_axis(FlexDirection::Column, direction, request.owner_width),
                point_scale_factor: scale,
            };
            node.cache.query(request.perform_layout, &constraints, Some(&relaxation))
        } else {
            node.cache.query(request.perform_layout, &constraints, None)
        };

        let computed = match cached {
            Some(size) => {
                node.layout.measured = size;
                self.stats.cache_hits += 1;
                tracing::trace!("cache hit for {} ({:?})", id, constraints);
                false
            }
            None => {
                self.compute_layout(id, &request);
                if request.perform_layout {
                    self.stats.layouts_computed += 1;
                } else {
                    self.stats.measurements_computed += 1;
                }
                let node = &mut self[id];
                node.layout.last_owner_direction = Some(request.owner_direction);
                let entry = CachedMeasurement { constraints, computed: node.layout.measured };
                node.cache.store(request.perform_layout, entry);
                true
            }
        };

        let node = &mut self[id];
        if request.perform_layout {
            node.layout.dimensions = node.layout.measured;
            node.dirty = false;
            if computed {
                node.has_new_layout = true;
            }
        }
        node.cache.generation = generation;
        computed
    }

    /// Size one node (and place its children when performing layout)
    fn compute_layout(&mut self, id: NodeId, request: &Request) {
        let node = &mut self[id];
        let style = node.style;
        let direction = style.direction.resolve(request.owner_direction);
        let width = request.owner_width;

        let layout = &mut node.layout;
        layout.direction = direction;
        layout.had_overflow = false;
        for edge in PhysicalEdge::ALL {
            layout.margin.set(edge, style.edge_margin(edge, direction, width));
            layout.border.set(edge, style.edge_border(edge, direction));
            layout.padding.set(edge, style.edge_padding(edge, direction, width));
        }

        let has_measure = node.measure.is_some();
        let has_children = !node.children.is_empty();

        if has_measure {
            self.measure_leaf(id, request, direction);
        } else if !has_children {
            self.measure_empty(id, request, direction);
        } else if request.perform_layout || !self.measure_fixed_size(id, request, direction) {
            self.layout_container(id, request, direction);
        }
    }

    /// Place a layout root from its own margins and relative offsets
    fn position_root(&mut self, root: NodeId, owner_width: Option<f32>, owner_height: Option<f32>) {
        let node = &mut self[root];
        let style = node.style;
        let direction = node.layout.direction;
        let dx = style.relative_offset(FlexDirection::Row, direction, owner_width);
        let dy = style.relative_offset(FlexDirection::Column, direction, owner_height);
        node.layout.position = EdgeSizes {
            left: style.edge_margin(PhysicalEdge::Left, direction, owner_width) + dx,
            top: style.edge_margin(PhysicalEdge::Top, direction, owner_width) + dy,
            right: style.edge_margin(PhysicalEdge::Right, direction, owner_width) + dx,
            bottom: style.edge_margin(PhysicalEdge::Bottom, direction, owner_width) + dy,
        };
    }

    /// Measured size plus margins along `axis`
    pub(crate) fn dim_with_margin(
        &self,
        child: NodeId,
        axis: FlexDirection,
        owner_direction: Direction,
        width: Option<f32>,
    ) -> f32 {
        let node = &self[child];
        let direction = node.style.direction.resolve(owner_direction);
        node.layout.measured.axis(axis.is_row()) + node.style.margin_for_axis(axis, direction, width)
    }
}

/// Constraint of one axis of a layout root
fn root_constraint(
    style: &Style,
    direction: Direction,
    row: bool,
    available: Option<f32>,
    width: Option<f32>,
) -> (f32, MeasureMode) {
    let axis = if row { FlexDirection::Row } else { FlexDirection::Column };
    if let Some(size) = style.resolved_size(row, available) {
        (size + style.margin_for_axis(axis, direction, width), MeasureMode::Exactly)
    } else if let Some(max) = style.max_dimension(row).resolve(available).filter(|m| *m >= 0.0) {
        (max, MeasureMode::AtMost)
    } else {
        match available {
            Some(size) => (size, MeasureMode::Exactly),
            None => (f32::INFINITY, MeasureMode::Undefined),
        }
    }
}
