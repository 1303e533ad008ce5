//! Absolutely positioned children
//!
//! Absolute children are laid out after their container has its final
//! size, against the container's padding box.

use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{Align, FlexDirection, Justify, Wrap};
use crate::value::MeasureMode;

use super::Request;
use super::axis::{align_item, bound_axis, definite, is_defined};
use super::container::Container;
use crate::layout_cache::Constraints;

/// Where an absolute child without insets sits along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Start,
    Center,
    End,
}

impl FlexTree {
    pub(super) fn layout_absolute_child(&mut self, ctx: &Container, child: NodeId) {
        let container = self[ctx.id].layout.measured;
        let dir = ctx.direction;
        let border_row = ctx.style.edge_border(FlexDirection::Row.leading_edge(), dir)
            + ctx.style.edge_border(FlexDirection::Row.trailing_edge(), dir);
        let border_column = ctx.style.edge_border(FlexDirection::Column.leading_edge(), dir)
            + ctx.style.edge_border(FlexDirection::Column.trailing_edge(), dir);
        let box_width = definite(container.width - border_row);
        let box_height = definite(container.height - border_column);

        let style = self[child].style;
        let direction = style.direction.resolve(dir);
        let margin_row = style.margin_for_axis(FlexDirection::Row, direction, box_width);
        let margin_column = style.margin_for_axis(FlexDirection::Column, direction, box_width);

        let from_insets = |axis: FlexDirection, box_size: Option<f32>| -> f32 {
            let row = axis.is_row();
            if style.is_dimension_defined(row, box_size) {
                let margin = if row { margin_row } else { margin_column };
                return style.resolved_size(row, box_size).unwrap_or(0.0) + margin;
            }
            match box_size {
                Some(size)
                    if style.is_leading_position_defined(axis, direction)
                        && style.is_trailing_position_defined(axis, direction) =>
                {
                    let insets = style.leading_position(axis, direction, box_size)
                        + style.trailing_position(axis, direction, box_size);
                    bound_axis(&style, direction, row, size - insets, box_size, box_width)
                }
                _ => f32::INFINITY,
            }
        };
        let mut width = from_insets(FlexDirection::Row, box_width);
        let mut height = from_insets(FlexDirection::Column, box_height);

        if let Some(ratio) = style.aspect_ratio {
            if !is_defined(width) && is_defined(height) {
                width = margin_row + (height - margin_column) * ratio;
            } else if is_defined(width) && !is_defined(height) {
                height = margin_column + (width - margin_row) / ratio;
            }
        }

        if !is_defined(width) || !is_defined(height) {
            let mut width_mode = if is_defined(width) { MeasureMode::Exactly } else { MeasureMode::Undefined };
            let height_mode = if is_defined(height) { MeasureMode::Exactly } else { MeasureMode::Undefined };

            // Let content wrap to the container in column layouts
            if !ctx.is_main_row && !is_defined(width) && ctx.width_mode != MeasureMode::Undefined {
                if let Some(size) = box_width.filter(|w| *w > 0.0) {
                    width = size;
                    width_mode = MeasureMode::AtMost;
                }
            }

            let request = Request {
                constraints: Constraints::new(width, width_mode, height, height_mode),
                owner_direction: dir,
                owner_width: box_width,
                owner_height: box_height,
                perform_layout: false,
            };
            self.layout_node(child, &request);
            let measured = self[child].layout.measured;
            width = measured.width + margin_row;
            height = measured.height + margin_column;
        }

        let request = Request {
            constraints: Constraints::exact(width, height),
            owner_direction: dir,
            owner_width: box_width,
            owner_height: box_height,
            perform_layout: true,
        };
        self.layout_node(child, &request);

        let main = match ctx.style.justify_content {
            Justify::Center => Placement::Center,
            Justify::FlexEnd => Placement::End,
            _ => Placement::Start,
        };
        let wrap_reverse = ctx.style.flex_wrap == Wrap::WrapReverse;
        let cross = match align_item(&ctx.style, &style) {
            Align::Center => Placement::Center,
            align if (align == Align::FlexEnd) != wrap_reverse => Placement::End,
            _ => Placement::Start,
        };

        self.place_absolute(ctx, child, ctx.main_axis, main);
        self.place_absolute(ctx, child, ctx.cross_axis, cross);
    }

    /// Position a laid-out absolute child along one flex axis
    fn place_absolute(&mut self, ctx: &Container, child: NodeId, axis: FlexDirection, placement: Placement) {
        let row = axis.is_row();
        let dir = ctx.direction;
        let container = self[ctx.id].layout.measured;
        let container_size = container.axis(row);
        let leading_border = ctx.style.leading_border(axis, dir);
        let trailing_border = ctx.style.trailing_border(axis, dir);
        let box_width = definite(container.width - ctx.style.edge_border(FlexDirection::Row.leading_edge(), dir)
            - ctx.style.edge_border(FlexDirection::Row.trailing_edge(), dir));
        let box_size = definite(container_size - leading_border - trailing_border);

        let node = &self[child];
        let style = node.style;
        let size = node.layout.measured.axis(row);
        let direction = style.direction.resolve(dir);
        let leading_margin = style.leading_margin(axis, direction, box_width);
        let trailing_margin = style.trailing_margin(axis, direction, box_width);

        let position = if style.is_leading_position_defined(axis, direction) {
            leading_border + leading_margin + style.leading_position(axis, direction, box_size)
        } else if style.is_trailing_position_defined(axis, direction) {
            container_size - trailing_border - trailing_margin - style.trailing_position(axis, direction, box_size) - size
        } else {
            let free = container_size - leading_border - trailing_border - leading_margin - trailing_margin - size;
            let offset = match placement {
                Placement::Start => 0.0,
                Placement::Center => free / 2.0,
                Placement::End => free,
            };
            leading_border + leading_margin + offset
        };

        self[child].layout.position.set(axis.leading_edge(), position);
    }
}
