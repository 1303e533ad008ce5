//! Flex basis

use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{Align, Display, FlexDirection, Overflow, PositionType, Style};
use crate::value::{Direction, MeasureMode};

use super::axis::{align_item, is_defined};
use super::container::Container;

impl FlexTree {
    /// Compute the flex basis of every in-flow child and return the sum of
    /// their outer bases
    pub(super) fn compute_flex_basis_for_children(&mut self, ctx: &Container) -> f32 {
        let config = self.config;

        // A lone flexible child in an exact container takes all the space
        // anyway, so its content is not measured
        let mut single_flex_child = None;
        if ctx.main_mode() == MeasureMode::Exactly {
            for &child in &ctx.children {
                let style = &self[child].style;
                if style.display == Display::None {
                    continue;
                }
                if single_flex_child.is_some() {
                    if style.is_flexible(&config) {
                        single_flex_child = None;
                        break;
                    }
                } else if style.resolved_flex_grow() > 0.0 && style.resolved_flex_shrink(&config) > 0.0 {
                    single_flex_child = Some(child);
                }
            }
        }

        let mut total = 0.0;
        for &child in &ctx.children {
            let style = self[child].style;
            if style.display == Display::None {
                self.zero_out_layout(child);
                continue;
            }
            if style.position_type == PositionType::Absolute {
                continue;
            }

            if single_flex_child == Some(child) {
                self[child].layout.computed_flex_basis = Some(0.0);
            } else {
                self.compute_flex_basis_for_child(ctx, child);
            }

            let direction = style.direction.resolve(ctx.direction);
            total += self[child].layout.computed_flex_basis.unwrap_or(0.0)
                + style.margin_for_axis(ctx.main_axis, direction, ctx.inner_width());
        }
        total
    }

    fn compute_flex_basis_for_child(&mut self, ctx: &Container, child: NodeId) {
        let config = self.config;
        let style = self[child].style;
        let direction = style.direction.resolve(ctx.direction);
        let main_row = ctx.is_main_row;
        let owner_width = ctx.inner_width();
        let owner_height = ctx.inner_height();

        let padding_and_border = style.padding_and_border_for_axis(ctx.main_axis, direction, owner_width);
        let explicit_basis = style.resolved_flex_basis(&config).resolve(ctx.inner_main());
        let row_defined = style.is_dimension_defined(true, owner_width);
        let column_defined = style.is_dimension_defined(false, owner_height);

        let basis = match explicit_basis {
            Some(basis) if is_defined(ctx.available_inner_main()) => basis.max(padding_and_border),
            _ if main_row && row_defined => style.resolved_size(true, owner_width).unwrap_or(0.0).max(padding_and_border),
            _ if !main_row && column_defined => {
                style.resolved_size(false, owner_height).unwrap_or(0.0).max(padding_and_border)
            }
            _ => {
                let measured = self.measure_content_basis(ctx, child, &style, direction, row_defined, column_defined);
                measured.max(padding_and_border)
            }
        };

        self[child].layout.computed_flex_basis = Some(basis);
    }

    /// Basis of a child without a usable size: measure its content
    fn measure_content_basis(
        &mut self,
        ctx: &Container,
        child: NodeId,
        style: &Style,
        direction: Direction,
        row_defined: bool,
        column_defined: bool,
    ) -> f32 {
        let main_row = ctx.is_main_row;
        let owner_width = ctx.inner_width();
        let owner_height = ctx.inner_height();
        let width = ctx.available_inner_width;
        let height = ctx.available_inner_height;
        let margin_row = style.margin_for_axis(FlexDirection::Row, direction, owner_width);
        let margin_column = style.margin_for_axis(FlexDirection::Column, direction, owner_width);

        let (mut child_width, mut width_mode) = (f32::INFINITY, MeasureMode::Undefined);
        let (mut child_height, mut height_mode) = (f32::INFINITY, MeasureMode::Undefined);

        if row_defined {
            child_width = style.resolved_size(true, owner_width).unwrap_or(0.0) + margin_row;
            width_mode = MeasureMode::Exactly;
        }
        if column_defined {
            child_height = style.resolved_size(false, owner_height).unwrap_or(0.0) + margin_column;
            height_mode = MeasureMode::Exactly;
        }

        // Scroll containers do not bound their content along the main axis
        let scroll = ctx.style.overflow == Overflow::Scroll;
        if (!scroll || !main_row) && !is_defined(child_width) && is_defined(width) {
            child_width = width;
            width_mode = MeasureMode::AtMost;
        }
        if (!scroll || main_row) && !is_defined(child_height) && is_defined(height) {
            child_height = height;
            height_mode = MeasureMode::AtMost;
        }

        if let Some(ratio) = style.aspect_ratio {
            if !main_row && width_mode == MeasureMode::Exactly {
                child_height = margin_column + (child_width - margin_row) / ratio;
                height_mode = MeasureMode::Exactly;
            } else if main_row && height_mode == MeasureMode::Exactly {
                child_width = margin_row + (child_height - margin_column) * ratio;
                width_mode = MeasureMode::Exactly;
            }
        }

        // Stretched items measure against the exact cross size
        let stretch = align_item(&ctx.style, style) == Align::Stretch;
        if !main_row
            && !row_defined
            && is_defined(width)
            && ctx.width_mode == MeasureMode::Exactly
            && stretch
            && width_mode != MeasureMode::Exactly
        {
            child_width = width;
            width_mode = MeasureMode::Exactly;
            if let Some(ratio) = style.aspect_ratio {
                child_height = margin_column + (child_width - margin_row) / ratio;
                height_mode = MeasureMode::Exactly;
            }
        }
        if main_row
            && !column_defined
            && is_defined(height)
            && ctx.height_mode == MeasureMode::Exactly
            && stretch
            && height_mode != MeasureMode::Exactly
        {
            child_height = height;
            height_mode = MeasureMode::Exactly;
            if let Some(ratio) = style.aspect_ratio {
                child_width = margin_row + (child_height - margin_column) * ratio;
                width_mode = MeasureMode::Exactly;
            }
        }

        constrain_max_size_for_mode(style, direction, true, owner_width, owner_width, &mut width_mode, &mut child_width);
        constrain_max_size_for_mode(
            style,
            direction,
            false,
            owner_height,
            owner_width,
            &mut height_mode,
            &mut child_height,
        );

        let request = ctx.child_request(child_width, width_mode, child_height, height_mode, false);
        self.layout_node(child, &request);
        self[child].layout.measured.axis(main_row)
    }
}

/// Cap an outer size (and its mode) by the max dimension of an axis
pub(super) fn constrain_max_size_for_mode(
    style: &Style,
    direction: Direction,
    row: bool,
    owner_axis_size: Option<f32>,
    owner_width: Option<f32>,
    mode: &mut MeasureMode,
    size: &mut f32,
) {
    let axis = if row { FlexDirection::Row } else { FlexDirection::Column };
    let max = style
        .max_dimension(row)
        .resolve(owner_axis_size)
        .filter(|m| m.is_finite())
        .map(|m| m + style.margin_for_axis(axis, direction, owner_width));

    let Some(max) = max else {
        return;
    };
    match *mode {
        MeasureMode::Exactly | MeasureMode::AtMost => *size = size.min(max),
        MeasureMode::Undefined => {
            *mode = MeasureMode::AtMost;
            *size = max;
        }
    }
}
