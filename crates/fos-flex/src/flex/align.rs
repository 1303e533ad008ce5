//! Main axis justification, cross axis alignment and multi-line
//! alignment

use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{Align, Display, FlexDirection, Justify, PositionType};
use crate::value::{MeasureMode, inexact_eq};

use super::axis::{align_item, is_defined};
use super::basis::constrain_max_size_for_mode;
use super::container::Container;
use super::lines::FlexLine;

impl FlexTree {
    /// Place the items of a line along the main axis and size the line
    pub(super) fn justify_main_axis(
        &mut self,
        ctx: &Container,
        line: &mut FlexLine,
        available_main: f32,
        can_skip_flex: bool,
    ) {
        let mut remaining = line.remaining_free_space;

        // At-most containers only spread space up to their min size
        if ctx.main_mode() == MeasureMode::AtMost && remaining > 0.0 {
            remaining = match ctx.style.min_dimension(ctx.is_main_row).resolve(ctx.main_owner()) {
                Some(min) => {
                    let min_inner = min - ctx.leading_pb_main - ctx.trailing_pb_main;
                    let occupied = available_main - remaining;
                    (min_inner - occupied).max(0.0)
                }
                None => 0.0,
            };
        }

        let auto_margins: usize = line
            .items
            .iter()
            .map(|&child| {
                let style = &self[child].style;
                let direction = style.direction.resolve(ctx.direction);
                usize::from(style.leading_margin_is_auto(ctx.main_axis, direction))
                    + usize::from(style.trailing_margin_is_auto(ctx.main_axis, direction))
            })
            .sum();

        let count = line.items.len() as f32;
        let (leading, between) = if auto_margins > 0 {
            (0.0, 0.0)
        } else {
            match ctx.style.justify_content {
                Justify::FlexStart => (0.0, 0.0),
                Justify::Center => (remaining / 2.0, 0.0),
                Justify::FlexEnd => (remaining, 0.0),
                Justify::SpaceBetween if count > 1.0 => (0.0, remaining.max(0.0) / (count - 1.0)),
                Justify::SpaceBetween => (0.0, 0.0),
                Justify::SpaceAround | Justify::SpaceEvenly if remaining < 0.0 => (remaining / 2.0, 0.0),
                Justify::SpaceAround if count > 0.0 => (remaining / count / 2.0, remaining / count),
                Justify::SpaceEvenly => (remaining / (count + 1.0), remaining / (count + 1.0)),
                Justify::SpaceAround => (0.0, 0.0),
            }
        };
        let auto_margin_share = if auto_margins > 0 { remaining.max(0.0) / auto_margins as f32 } else { 0.0 };

        let mut main_dim = ctx.leading_pb_main + leading;
        let mut cross_dim = 0.0_f32;
        let mut max_ascent = 0.0_f32;
        let mut max_descent = 0.0_f32;
        let width = ctx.inner_width();

        for (i, &child) in line.items.iter().enumerate() {
            if i > 0 {
                main_dim += ctx.main_gap;
            }
            let style = self[child].style;
            let direction = style.direction.resolve(ctx.direction);

            if style.leading_margin_is_auto(ctx.main_axis, direction) {
                main_dim += auto_margin_share;
            }
            if ctx.perform_layout {
                let position = main_dim
                    + style.leading_margin(ctx.main_axis, direction, width)
                    + style.relative_offset(ctx.main_axis, direction, ctx.inner_main());
                self[child].layout.position.set(ctx.main_axis.leading_edge(), position);
            }
            if style.trailing_margin_is_auto(ctx.main_axis, direction) {
                main_dim += auto_margin_share;
            }

            if can_skip_flex {
                // Items were not laid out at their final size
                let basis = self[child].layout.computed_flex_basis.unwrap_or(0.0);
                main_dim += between + style.margin_for_axis(ctx.main_axis, direction, width) + basis;
                cross_dim = ctx.available_inner_cross();
            } else {
                main_dim += between + self.dim_with_margin(child, ctx.main_axis, ctx.direction, width);
                if ctx.baseline_layout {
                    let ascent = self.baseline(child) + style.leading_margin(FlexDirection::Column, direction, width);
                    let descent = self[child].layout.measured.height
                        + style.margin_for_axis(FlexDirection::Column, direction, width)
                        - ascent;
                    max_ascent = max_ascent.max(ascent);
                    max_descent = max_descent.max(descent);
                } else {
                    cross_dim = cross_dim.max(self.dim_with_margin(child, ctx.cross_axis, ctx.direction, width));
                }
            }
        }

        line.main_dim = main_dim + ctx.trailing_pb_main;
        line.cross_dim = if ctx.baseline_layout && !can_skip_flex { max_ascent + max_descent } else { cross_dim };
    }

    /// Align the items of a line inside it, stretching where asked
    pub(super) fn align_cross_axis(&mut self, ctx: &Container, line: &FlexLine, line_offset: f32, container_cross: f32) {
        let width = ctx.inner_width();
        let main_row = ctx.is_main_row;

        for &child in &line.items {
            let style = self[child].style;
            let direction = style.direction.resolve(ctx.direction);
            let align = align_item(&ctx.style, &style);
            let leading_auto = style.leading_margin_is_auto(ctx.cross_axis, direction);
            let trailing_auto = style.trailing_margin_is_auto(ctx.cross_axis, direction);
            let mut leading_cross = ctx.leading_pb_cross;

            if align == Align::Stretch && !leading_auto && !trailing_auto {
                if !style.is_dimension_defined(!main_row, ctx.inner_cross()) {
                    let measured_main = self[child].layout.measured.axis(main_row);
                    let margin_cross = style.margin_for_axis(ctx.cross_axis, direction, width);
                    let mut child_main = measured_main + style.margin_for_axis(ctx.main_axis, direction, width);
                    let mut child_cross = match style.aspect_ratio {
                        Some(ratio) if main_row => margin_cross + measured_main / ratio,
                        Some(ratio) => margin_cross + measured_main * ratio,
                        None => line.cross_dim,
                    };

                    let mut main_mode = MeasureMode::Exactly;
                    let mut cross_mode = MeasureMode::Exactly;
                    constrain_max_size_for_mode(
                        &style,
                        direction,
                        main_row,
                        ctx.inner_main(),
                        width,
                        &mut main_mode,
                        &mut child_main,
                    );
                    constrain_max_size_for_mode(
                        &style,
                        direction,
                        !main_row,
                        ctx.inner_cross(),
                        width,
                        &mut cross_mode,
                        &mut child_cross,
                    );

                    let (child_width, child_height) =
                        if main_row { (child_main, child_cross) } else { (child_cross, child_main) };
                    // Wrapped lines that align-content will not stretch size to content
                    let cross_does_not_grow = ctx.style.align_content != Align::Stretch && ctx.wrap;
                    let width_mode = if !is_defined(child_width) || (!main_row && cross_does_not_grow) {
                        MeasureMode::Undefined
                    } else {
                        MeasureMode::Exactly
                    };
                    let height_mode = if !is_defined(child_height) || (main_row && cross_does_not_grow) {
                        MeasureMode::Undefined
                    } else {
                        MeasureMode::Exactly
                    };

                    let request = ctx.child_request(child_width, width_mode, child_height, height_mode, true);
                    self.layout_node(child, &request);
                }
            } else {
                let remaining = container_cross - self.dim_with_margin(child, ctx.cross_axis, ctx.direction, width);
                leading_cross += if leading_auto && trailing_auto {
                    (remaining / 2.0).max(0.0)
                } else if trailing_auto {
                    0.0
                } else if leading_auto {
                    remaining.max(0.0)
                } else {
                    match align {
                        Align::Center => remaining / 2.0,
                        Align::FlexEnd => remaining,
                        _ => 0.0,
                    }
                };
            }

            let position = line_offset
                + leading_cross
                + style.leading_margin(ctx.cross_axis, direction, width)
                + style.relative_offset(ctx.cross_axis, direction, ctx.inner_cross());
            self[child].layout.position.set(ctx.cross_axis.leading_edge(), position);
        }
    }

    /// Distribute lines across the cross axis and align items within them
    pub(super) fn align_content(&mut self, ctx: &Container, lines: &[FlexLine], total_line_cross: f32) {
        let width = ctx.inner_width();
        let line_count = lines.len() as f32;

        let mut lead = ctx.leading_pb_cross;
        let mut extra_per_line = 0.0;
        let mut between = 0.0;
        if let Some(available) = ctx.inner_cross() {
            let remaining = available - total_line_cross;
            match ctx.style.align_content {
                Align::FlexEnd => lead += remaining,
                Align::Center => lead += remaining / 2.0,
                Align::Stretch if remaining > 0.0 => extra_per_line = remaining / line_count,
                Align::SpaceBetween if remaining > 0.0 && lines.len() > 1 => {
                    between = remaining / (line_count - 1.0);
                }
                Align::SpaceAround if remaining > 0.0 => {
                    lead += remaining / (2.0 * line_count);
                    between = remaining / line_count;
                }
                _ => {}
            }
        }

        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                lead += ctx.cross_gap + between;
            }
            let line_height = line.cross_dim + extra_per_line;

            let mut max_ascent = 0.0_f32;
            for &child in &line.items {
                let style = &self[child].style;
                if align_item(&ctx.style, style) == Align::Baseline {
                    let direction = style.direction.resolve(ctx.direction);
                    let ascent = self.baseline(child) + style.leading_margin(FlexDirection::Column, direction, width);
                    max_ascent = max_ascent.max(ascent);
                }
            }

            for &child in &line.items {
                self.align_in_line(ctx, child, lead, line_height, max_ascent);
            }
            lead += line_height;
        }
    }

    fn align_in_line(&mut self, ctx: &Container, child: NodeId, lead: f32, line_height: f32, max_ascent: f32) {
        let width = ctx.inner_width();
        let main_row = ctx.is_main_row;
        let style = self[child].style;
        let direction = style.direction.resolve(ctx.direction);
        let leading_margin = style.leading_margin(ctx.cross_axis, direction, width);
        let trailing_margin = style.trailing_margin(ctx.cross_axis, direction, width);
        let offset = style.relative_offset(ctx.cross_axis, direction, ctx.inner_cross());
        let leading_auto = style.leading_margin_is_auto(ctx.cross_axis, direction);
        let trailing_auto = style.trailing_margin_is_auto(ctx.cross_axis, direction);

        let measured_cross = self[child].layout.measured.axis(!main_row);
        let free = line_height - measured_cross - leading_margin - trailing_margin;

        let position = if leading_auto || trailing_auto {
            let shift = if leading_auto && trailing_auto {
                free.max(0.0) / 2.0
            } else if leading_auto {
                free.max(0.0)
            } else {
                0.0
            };
            lead + leading_margin + shift
        } else {
            match align_item(&ctx.style, &style) {
                Align::FlexEnd => lead + line_height - trailing_margin - measured_cross,
                Align::Center => lead + leading_margin + free / 2.0,
                Align::Baseline => lead + max_ascent - self.baseline(child),
                Align::Stretch => {
                    if !style.is_dimension_defined(!main_row, ctx.inner_cross()) {
                        let outer_cross = measured_cross + leading_margin + trailing_margin;
                        if !inexact_eq(outer_cross, line_height) {
                            let measured = self[child].layout.measured;
                            let outer_main =
                                measured.axis(main_row) + style.margin_for_axis(ctx.main_axis, direction, width);
                            let (w, h) = if main_row { (outer_main, line_height) } else { (line_height, outer_main) };
                            let request = ctx.child_request(w, MeasureMode::Exactly, h, MeasureMode::Exactly, true);
                            self.layout_node(child, &request);
                        }
                    }
                    lead + leading_margin
                }
                _ => lead + leading_margin,
            }
        };

        self[child].layout.position.set(ctx.cross_axis.leading_edge(), position + offset);
    }

    /// Distance from the top of a node's border box to its first baseline
    pub(crate) fn baseline(&self, id: NodeId) -> f32 {
        let node = &self[id];
        let mut baseline_child = None;
        for &child in &node.children {
            let c = &self[child];
            if c.style.display == Display::None || c.style.position_type == PositionType::Absolute {
                continue;
            }
            if c.layout.line_index > 0 {
                break;
            }
            if align_item(&node.style, &c.style) == Align::Baseline {
                baseline_child = Some(child);
                break;
            }
            if baseline_child.is_none() {
                baseline_child = Some(child);
            }
        }

        match baseline_child {
            Some(child) => self.baseline(child) + self[child].layout.position.top,
            None => node.layout.measured.height,
        }
    }

    /// Whether a container aligns any of its items by baseline
    pub(crate) fn is_baseline_layout(&self, id: NodeId) -> bool {
        let node = &self[id];
        if node.style.flex_direction.is_column() {
            return false;
        }
        if node.style.align_items == Align::Baseline {
            return true;
        }
        node.children.iter().any(|&child| {
            let style = &self[child].style;
            style.position_type == PositionType::Relative && style.align_self == Align::Baseline
        })
    }
}
