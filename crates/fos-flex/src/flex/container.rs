//! Flex container layout
//!
//! Drives one container through basis computation, line collection,
//! flexible lengths, alignment and final sizing.

use crate::box_model::Size;
use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{Display, FlexDirection, Gutter, Overflow, PositionType, Style, Wrap};
use crate::value::{Direction, MeasureMode};

use super::Request;
use super::axis::{bound_axis, bound_within_min_max, definite, is_defined};
use super::lines::FlexLine;

/// Everything a container's children are laid out against
#[derive(Debug, Clone)]
pub(super) struct Container {
    pub id: NodeId,
    pub style: Style,
    pub direction: Direction,
    pub children: Vec<NodeId>,
    pub main_axis: FlexDirection,
    pub cross_axis: FlexDirection,
    pub is_main_row: bool,
    pub wrap: bool,
    pub perform_layout: bool,
    pub width_mode: MeasureMode,
    pub height_mode: MeasureMode,
    /// Outer available size from the request
    pub available_width: f32,
    pub available_height: f32,
    /// Available size inside padding and border
    pub available_inner_width: f32,
    pub available_inner_height: f32,
    /// Definite inner sizes of the container's own owner
    pub owner_width: Option<f32>,
    pub owner_height: Option<f32>,
    pub pb_main: f32,
    pub pb_cross: f32,
    pub leading_pb_main: f32,
    pub trailing_pb_main: f32,
    pub leading_pb_cross: f32,
    pub main_gap: f32,
    pub cross_gap: f32,
    pub baseline_layout: bool,
}

impl Container {
    fn new(tree: &FlexTree, id: NodeId, request: &Request, direction: Direction) -> Self {
        let node = &tree[id];
        let style = node.style;
        let main_axis = style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_row = main_axis.is_row();
        let c = request.constraints;
        let owner_width = request.owner_width;
        let owner_height = request.owner_height;

        let pb_row = style.padding_and_border_for_axis(FlexDirection::Row, direction, owner_width);
        let pb_column = style.padding_and_border_for_axis(FlexDirection::Column, direction, owner_width);
        let margin_row = style.margin_for_axis(FlexDirection::Row, direction, owner_width);
        let margin_column = style.margin_for_axis(FlexDirection::Column, direction, owner_width);

        let available_inner_width =
            available_inner_dim(&style, true, c.available_width - margin_row, pb_row, owner_width);
        let available_inner_height =
            available_inner_dim(&style, false, c.available_height - margin_column, pb_column, owner_height);

        let mut ctx = Self {
            id,
            style,
            direction,
            children: node.children.clone(),
            main_axis,
            cross_axis,
            is_main_row,
            wrap: style.flex_wrap != Wrap::NoWrap,
            perform_layout: request.perform_layout,
            width_mode: c.width_mode,
            height_mode: c.height_mode,
            available_width: c.available_width,
            available_height: c.available_height,
            available_inner_width,
            available_inner_height,
            owner_width,
            owner_height,
            pb_main: if is_main_row { pb_row } else { pb_column },
            pb_cross: if is_main_row { pb_column } else { pb_row },
            leading_pb_main: style.leading_padding_and_border(main_axis, direction, owner_width),
            trailing_pb_main: style.trailing_padding_and_border(main_axis, direction, owner_width),
            leading_pb_cross: style.leading_padding_and_border(cross_axis, direction, owner_width),
            main_gap: 0.0,
            cross_gap: 0.0,
            baseline_layout: false,
        };

        let (main_gutter, cross_gutter) =
            if is_main_row { (Gutter::Column, Gutter::Row) } else { (Gutter::Row, Gutter::Column) };
        ctx.main_gap = style.resolved_gap(main_gutter, ctx.inner_main());
        ctx.cross_gap = style.resolved_gap(cross_gutter, ctx.inner_cross());
        ctx.baseline_layout = tree.is_baseline_layout(id);
        ctx
    }

    pub fn main_mode(&self) -> MeasureMode {
        if self.is_main_row { self.width_mode } else { self.height_mode }
    }

    pub fn cross_mode(&self) -> MeasureMode {
        if self.is_main_row { self.height_mode } else { self.width_mode }
    }

    fn set_main_mode(&mut self, mode: MeasureMode) {
        if self.is_main_row {
            self.width_mode = mode;
        } else {
            self.height_mode = mode;
        }
    }

    pub fn available_inner_main(&self) -> f32 {
        if self.is_main_row { self.available_inner_width } else { self.available_inner_height }
    }

    pub fn available_inner_cross(&self) -> f32 {
        if self.is_main_row { self.available_inner_height } else { self.available_inner_width }
    }

    /// Definite inner width, the percentage base of the children
    pub fn inner_width(&self) -> Option<f32> {
        match self.width_mode {
            MeasureMode::Exactly => definite(self.available_inner_width),
            _ => None,
        }
    }

    pub fn inner_height(&self) -> Option<f32> {
        match self.height_mode {
            MeasureMode::Exactly => definite(self.available_inner_height),
            _ => None,
        }
    }

    pub fn inner_main(&self) -> Option<f32> {
        if self.is_main_row { self.inner_width() } else { self.inner_height() }
    }

    pub fn inner_cross(&self) -> Option<f32> {
        if self.is_main_row { self.inner_height() } else { self.inner_width() }
    }

    pub fn main_owner(&self) -> Option<f32> {
        if self.is_main_row { self.owner_width } else { self.owner_height }
    }

    pub fn cross_owner(&self) -> Option<f32> {
        if self.is_main_row { self.owner_height } else { self.owner_width }
    }

    /// Request for a child at the given outer size
    pub fn child_request(
        &self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
        perform_layout: bool,
    ) -> Request {
        Request {
            constraints: crate::layout_cache::Constraints::new(width, width_mode, height, height_mode),
            owner_direction: self.direction,
            owner_width: self.inner_width(),
            owner_height: self.inner_height(),
            perform_layout,
        }
    }
}

/// Space left inside padding and border, clamped to the inner min/max
fn available_inner_dim(
    style: &Style,
    row: bool,
    available: f32,
    padding_and_border: f32,
    owner_size: Option<f32>,
) -> f32 {
    let inner = available - padding_and_border;
    if !is_defined(inner) {
        return inner;
    }
    let min = style.min_dimension(row).resolve(owner_size).map_or(0.0, |m| m - padding_and_border);
    let max = style.max_dimension(row).resolve(owner_size).map_or(f32::MAX, |m| m - padding_and_border);
    inner.min(max).max(min)
}

impl FlexTree {
    pub(super) fn layout_container(&mut self, id: NodeId, request: &Request, direction: Direction) {
        let mut ctx = Container::new(self, id, request, direction);

        // Flex basis of every in-flow child
        let total_basis = self.compute_flex_basis_for_children(&ctx);
        let basis_overflows =
            ctx.main_mode() != MeasureMode::Undefined && total_basis > ctx.available_inner_main();
        if ctx.wrap && basis_overflows && ctx.main_mode() == MeasureMode::AtMost {
            ctx.set_main_mode(MeasureMode::Exactly);
        }

        // Lines
        let mut lines: Vec<FlexLine> = Vec::new();
        let mut start = 0;
        let mut total_line_cross = 0.0_f32;
        let mut max_line_main = 0.0_f32;

        while start < ctx.children.len() {
            let mut line = self.collect_line(&ctx, start, lines.len());
            let available_main = self.initial_free_space(&ctx, &mut line);

            let can_skip_flex = !ctx.perform_layout && ctx.cross_mode() == MeasureMode::Exactly;
            if !can_skip_flex {
                self.resolve_flexible_length(&ctx, &mut line, basis_overflows);
            }
            if line.remaining_free_space < 0.0 {
                self[id].layout.had_overflow = true;
            }

            self.justify_main_axis(&ctx, &mut line, available_main, can_skip_flex);

            let mut container_cross = ctx.available_inner_cross();
            if ctx.cross_mode() != MeasureMode::Exactly {
                container_cross = bound_axis(
                    &ctx.style,
                    direction,
                    !ctx.is_main_row,
                    line.cross_dim + ctx.pb_cross,
                    ctx.cross_owner(),
                    ctx.owner_width,
                ) - ctx.pb_cross;
            }
            if !ctx.wrap {
                if ctx.cross_mode() == MeasureMode::Exactly {
                    line.cross_dim = ctx.available_inner_cross();
                }
                line.cross_dim = bound_axis(
                    &ctx.style,
                    direction,
                    !ctx.is_main_row,
                    line.cross_dim + ctx.pb_cross,
                    ctx.cross_owner(),
                    ctx.owner_width,
                ) - ctx.pb_cross;
            }

            let line_offset = if lines.is_empty() { total_line_cross } else { total_line_cross + ctx.cross_gap };
            if ctx.perform_layout {
                self.align_cross_axis(&ctx, &line, line_offset, container_cross);
            }

            total_line_cross = line_offset + line.cross_dim;
            max_line_main = max_line_main.max(line.main_dim);
            start = line.end;
            lines.push(line);
        }

        if ctx.perform_layout && (ctx.wrap || ctx.baseline_layout) {
            self.align_content(&ctx, &lines, total_line_cross);
        }

        let measured = self.container_size(&ctx, max_line_main, total_line_cross);
        self[id].layout.measured = measured;

        if !ctx.perform_layout {
            return;
        }

        if ctx.style.flex_wrap == Wrap::WrapReverse {
            let cross_row = !ctx.is_main_row;
            let leading = ctx.cross_axis.leading_edge();
            for line in &lines {
                for &child in &line.items {
                    let layout = &mut self[child].layout;
                    let flipped = measured.axis(cross_row) - layout.position.get(leading) - layout.measured.axis(cross_row);
                    layout.position.set(leading, flipped);
                }
            }
        }

        for &child in &ctx.children {
            let style = &self[child].style;
            if style.display != Display::None && style.position_type == PositionType::Absolute {
                self.layout_absolute_child(&ctx, child);
            }
        }

        // Opposite edges of every child, relative to this container
        for &child in &ctx.children {
            let node = &mut self[child];
            if node.style.display == Display::None {
                continue;
            }
            let child_size = node.layout.measured;
            for axis in [ctx.main_axis, ctx.cross_axis] {
                let row = axis.is_row();
                let leading = node.layout.position.get(axis.leading_edge());
                node.layout
                    .position
                    .set(axis.trailing_edge(), measured.axis(row) - child_size.axis(row) - leading);
            }
        }
    }

    /// Available main size and free space of a line before flexing
    fn initial_free_space(&self, ctx: &Container, line: &mut FlexLine) -> f32 {
        let consumed = line.size_consumed;
        let mut available = ctx.available_inner_main();
        let mut size_based_on_content = false;

        if ctx.main_mode() != MeasureMode::Exactly {
            let row = ctx.is_main_row;
            let min_inner = ctx.style.min_dimension(row).resolve(ctx.main_owner()).map(|m| m - ctx.pb_main);
            let max_inner = ctx.style.max_dimension(row).resolve(ctx.main_owner()).map(|m| m - ctx.pb_main);
            if let Some(min) = min_inner.filter(|m| consumed < *m) {
                available = min;
            } else if let Some(max) = max_inner.filter(|m| consumed > *m) {
                available = max;
            } else {
                available = consumed;
                size_based_on_content = true;
            }
        }

        line.remaining_free_space = if !size_based_on_content && is_defined(available) {
            available - consumed
        } else if consumed < 0.0 {
            -consumed
        } else {
            0.0
        };
        available
    }

    /// Final border-box size of a container
    fn container_size(&self, ctx: &Container, max_line_main: f32, total_line_cross: f32) -> Size {
        let style = &ctx.style;
        let direction = ctx.direction;
        let margin_row = style.margin_for_axis(FlexDirection::Row, direction, ctx.owner_width);
        let margin_column = style.margin_for_axis(FlexDirection::Column, direction, ctx.owner_width);

        let mut size = Size::new(
            bound_axis(style, direction, true, ctx.available_width - margin_row, ctx.owner_width, ctx.owner_width),
            bound_axis(
                style,
                direction,
                false,
                ctx.available_height - margin_column,
                ctx.owner_height,
                ctx.owner_width,
            ),
        );

        let scroll = style.overflow == Overflow::Scroll;
        let main_row = ctx.is_main_row;

        match ctx.main_mode() {
            MeasureMode::Undefined => {
                size.set_axis(
                    main_row,
                    bound_axis(style, direction, main_row, max_line_main, ctx.main_owner(), ctx.owner_width),
                );
            }
            MeasureMode::AtMost if !scroll => {
                size.set_axis(
                    main_row,
                    bound_axis(style, direction, main_row, max_line_main, ctx.main_owner(), ctx.owner_width),
                );
            }
            MeasureMode::AtMost => {
                let content = bound_within_min_max(style, main_row, max_line_main, ctx.main_owner());
                size.set_axis(main_row, (ctx.available_inner_main() + ctx.pb_main).min(content).max(ctx.pb_main));
            }
            MeasureMode::Exactly => {}
        }

        let cross_content = total_line_cross + ctx.pb_cross;
        match ctx.cross_mode() {
            MeasureMode::Undefined => {
                size.set_axis(
                    !main_row,
                    bound_axis(style, direction, !main_row, cross_content, ctx.cross_owner(), ctx.owner_width),
                );
            }
            MeasureMode::AtMost if !scroll => {
                size.set_axis(
                    !main_row,
                    bound_axis(style, direction, !main_row, cross_content, ctx.cross_owner(), ctx.owner_width),
                );
            }
            MeasureMode::AtMost => {
                let content = bound_within_min_max(style, !main_row, cross_content, ctx.cross_owner());
                size.set_axis(
                    !main_row,
                    (ctx.available_inner_cross() + ctx.pb_cross).min(content).max(ctx.pb_cross),
                );
            }
            MeasureMode::Exactly => {}
        }

        size
    }
}
