//! Leaves and short-circuits
//!
//! Nodes that never run the flex algorithm: measure-callback leaves, empty
//! containers, containers measured under a fixed size, and hidden subtrees.

use crate::box_model::{Layout, Size};
use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::FlexDirection;
use crate::value::{Direction, MeasureMode};

use super::Request;
use super::axis::{bound_axis, is_defined};

/// Outer-box insets of a node along both axes
struct Insets {
    margin_row: f32,
    margin_column: f32,
    pb_row: f32,
    pb_column: f32,
}

impl FlexTree {
    fn insets(&self, id: NodeId, request: &Request, direction: Direction) -> Insets {
        let style = &self[id].style;
        let width = request.owner_width;
        Insets {
            margin_row: style.margin_for_axis(FlexDirection::Row, direction, width),
            margin_column: style.margin_for_axis(FlexDirection::Column, direction, width),
            pb_row: style.padding_and_border_for_axis(FlexDirection::Row, direction, width),
            pb_column: style.padding_and_border_for_axis(FlexDirection::Column, direction, width),
        }
    }

    fn bound_size(&self, id: NodeId, request: &Request, direction: Direction, width: f32, height: f32) -> Size {
        let style = &self[id].style;
        Size::new(
            bound_axis(style, direction, true, width, request.owner_width, request.owner_width),
            bound_axis(style, direction, false, height, request.owner_height, request.owner_width),
        )
    }

    pub(super) fn measure_leaf(&mut self, id: NodeId, request: &Request, direction: Direction) {
        let c = request.constraints;
        let insets = self.insets(id, request, direction);

        let (width, height) = if c.width_mode == MeasureMode::Exactly && c.height_mode == MeasureMode::Exactly {
            (c.available_width - insets.margin_row, c.available_height - insets.margin_column)
        } else {
            // Never hand the callback a negative size
            let inner_width = if is_defined(c.available_width) {
                (c.available_width - insets.margin_row - insets.pb_row).max(0.0)
            } else {
                f32::INFINITY
            };
            let inner_height = if is_defined(c.available_height) {
                (c.available_height - insets.margin_column - insets.pb_column).max(0.0)
            } else {
                f32::INFINITY
            };

            let content = self.invoke_measure(id, inner_width, c.width_mode, inner_height, c.height_mode);
            let width = match c.width_mode {
                MeasureMode::Exactly => c.available_width - insets.margin_row,
                _ => content.width + insets.pb_row,
            };
            let height = match c.height_mode {
                MeasureMode::Exactly => c.available_height - insets.margin_column,
                _ => content.height + insets.pb_column,
            };
            (width, height)
        };

        self[id].layout.measured = self.bound_size(id, request, direction, width, height);
    }

    /// Run the callback, turning failures and junk into a usable size
    fn invoke_measure(
        &mut self,
        id: NodeId,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Size {
        self.stats.measure_calls += 1;
        let Some(measure) = self[id].measure.as_mut() else {
            return Size::ZERO;
        };
        let result = measure.measure(width, width_mode, height, height_mode);

        match result {
            Ok(size) if size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0 => {
                size
            }
            Ok(size) => {
                tracing::warn!(
                    "Measure callback of {} returned {}x{}, clamping to a valid size",
                    id,
                    size.width,
                    size.height
                );
                let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
                Size::new(clean(size.width), clean(size.height))
            }
            Err(err) => {
                self.stats.measure_failures += 1;
                tracing::warn!("Measure callback of {} failed: {}", id, err);
                Size::ZERO
            }
        }
    }

    pub(super) fn measure_empty(&mut self, id: NodeId, request: &Request, direction: Direction) {
        let c = request.constraints;
        let insets = self.insets(id, request, direction);
        let width = match c.width_mode {
            MeasureMode::Exactly => c.available_width - insets.margin_row,
            _ => insets.pb_row,
        };
        let height = match c.height_mode {
            MeasureMode::Exactly => c.available_height - insets.margin_column,
            _ => insets.pb_column,
        };
        self[id].layout.measured = self.bound_size(id, request, direction, width, height);
    }

    /// Size a container without visiting its children when the constraints
    /// already decide it. Returns whether that was possible.
    pub(super) fn measure_fixed_size(&mut self, id: NodeId, request: &Request, direction: Direction) -> bool {
        let c = request.constraints;
        let collapsed = |size: f32, mode: MeasureMode| mode == MeasureMode::AtMost && size <= 0.0;
        let fixed = collapsed(c.available_width, c.width_mode)
            || collapsed(c.available_height, c.height_mode)
            || (c.width_mode == MeasureMode::Exactly && c.height_mode == MeasureMode::Exactly);
        if !fixed {
            return false;
        }

        let insets = self.insets(id, request, direction);
        let axis = |size: f32, mode: MeasureMode, margin: f32| {
            if !is_defined(size) || (mode == MeasureMode::AtMost && size < 0.0) {
                0.0
            } else {
                size - margin
            }
        };
        let width = axis(c.available_width, c.width_mode, insets.margin_row);
        let height = axis(c.available_height, c.height_mode, insets.margin_column);
        self[id].layout.measured = self.bound_size(id, request, direction, width, height);
        true
    }

    /// Reset a hidden subtree to an empty, clean layout
    pub(super) fn zero_out_layout(&mut self, id: NodeId) {
        let node = &mut self[id];
        node.layout = Layout::default();
        node.has_new_layout = true;
        node.dirty = false;
        node.cache.clear();
        let children = node.children.clone();
        for child in children {
            self.zero_out_layout(child);
        }
    }
}
