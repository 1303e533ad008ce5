//! Pixel Grid Rounding
//!
//! Snaps computed layouts to the physical pixel grid described by
//! [`Config::point_scale_factor`](crate::Config). Edges are rounded in
//! absolute coordinates so that adjacent boxes never open gaps or overlap.

use crate::layout_tree::FlexTree;
use crate::measure::NodeType;
use crate::node::NodeId;
use crate::value::{PhysicalEdge, inexact_eq};

/// Round `value` (in points) to the nearest multiple of `1 / scale`.
///
/// `force_ceil` and `force_floor` pick a direction for fractional values
/// instead of rounding half up.
pub(crate) fn round_value_to_pixel_grid(value: f32, scale: f32, force_ceil: bool, force_floor: bool) -> f32 {
    if !value.is_finite() || !scale.is_finite() || scale == 0.0 {
        return value;
    }

    let scaled = f64::from(value) * f64::from(scale);
    let mut fraction = scaled % 1.0;
    if fraction < 0.0 {
        fraction += 1.0;
    }

    let snapped = if inexact_eq(fraction as f32, 0.0) {
        scaled - fraction
    } else if inexact_eq(fraction as f32, 1.0) {
        scaled - fraction + 1.0
    } else if force_ceil {
        scaled - fraction + 1.0
    } else if force_floor {
        scaled - fraction
    } else if fraction > 0.5 || inexact_eq(fraction as f32, 0.5) {
        scaled - fraction + 1.0
    } else {
        scaled - fraction
    };

    (snapped / f64::from(scale)) as f32
}

fn has_fraction(value: f32, scale: f32) -> bool {
    let fraction = (f64::from(value) * f64::from(scale)) % 1.0;
    !inexact_eq(fraction as f32, 0.0) && !inexact_eq(fraction as f32, 1.0)
}

impl FlexTree {
    /// Put back the geometry saved by the last rounding of `root`'s subtree
    /// so the next pass starts from unrounded values
    pub(crate) fn restore_unrounded(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &mut self[id];
            if let Some((position, dimensions)) = node.layout.unrounded.take() {
                node.layout.position = position;
                node.layout.dimensions = dimensions;
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Round the layouts of `root` and its subtree in place, keeping the
    /// unrounded geometry for the next pass
    pub(crate) fn round_layout(&mut self, root: NodeId) {
        let scale = self.config.point_scale_factor;
        tracing::trace!("Rounding layout of {} at scale {}", root, scale);
        self.round_node(root, scale, 0.0, 0.0);
    }

    fn round_node(&mut self, id: NodeId, scale: f32, absolute_left: f32, absolute_top: f32) {
        let node = &mut self[id];
        let text = node.node_type == NodeType::Text;
        let layout = &mut node.layout;
        layout.unrounded = Some((layout.position, layout.dimensions));

        let left = layout.position.left;
        let top = layout.position.top;
        let width = layout.dimensions.width;
        let height = layout.dimensions.height;

        let node_left = absolute_left + left;
        let node_top = absolute_top + top;
        let node_right = node_left + width;
        let node_bottom = node_top + height;

        layout.position.set(PhysicalEdge::Left, round_value_to_pixel_grid(left, scale, false, text));
        layout.position.set(PhysicalEdge::Top, round_value_to_pixel_grid(top, scale, false, text));

        let fractional_width = has_fraction(width, scale);
        let fractional_height = has_fraction(height, scale);
        layout.dimensions.width = round_value_to_pixel_grid(
            node_right,
            scale,
            text && fractional_width,
            text && !fractional_width,
        ) - round_value_to_pixel_grid(node_left, scale, false, text);
        layout.dimensions.height = round_value_to_pixel_grid(
            node_bottom,
            scale,
            text && fractional_height,
            text && !fractional_height,
        ) - round_value_to_pixel_grid(node_top, scale, false, text);

        let size = layout.dimensions;
        let children = node.children.clone();
        for &child in &children {
            self.round_node(child, scale, node_left, node_top);
        }

        for child in children {
            let layout = &mut self[child].layout;
            let right = size.width - layout.position.left - layout.dimensions.width;
            let bottom = size.height - layout.position.top - layout.dimensions.height;
            layout.position.set(PhysicalEdge::Right, right);
            layout.position.set(PhysicalEdge::Bottom, bottom);
        }
    }
}
