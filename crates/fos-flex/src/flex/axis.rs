//! Axis helpers
//!
//! The algorithm works in flex-relative terms (main/cross, leading/trailing).
//! These helpers map them onto physical edges and resolve style values.

use crate::config::Config;
use crate::style::{Align, FlexDirection, Style};
use crate::value::{Direction, PhysicalEdge, StyleValue, Unit};

/// Whether a computed float carries a usable value
#[inline]
pub(crate) fn is_defined(value: f32) -> bool {
    value.is_finite()
}

/// `Some` for a usable value
#[inline]
pub(crate) fn definite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

impl FlexDirection {
    /// Flip row directions for right-to-left layouts
    pub(crate) fn resolve(self, direction: Direction) -> FlexDirection {
        match (self, direction) {
            (FlexDirection::Row, Direction::Rtl) => FlexDirection::RowReverse,
            (FlexDirection::RowReverse, Direction::Rtl) => FlexDirection::Row,
            (axis, _) => axis,
        }
    }

    pub(crate) fn cross(self, direction: Direction) -> FlexDirection {
        if self.is_column() {
            FlexDirection::Row.resolve(direction)
        } else {
            FlexDirection::Column
        }
    }

    /// Edge where items start
    pub(crate) fn leading_edge(self) -> PhysicalEdge {
        match self {
            FlexDirection::Column => PhysicalEdge::Top,
            FlexDirection::ColumnReverse => PhysicalEdge::Bottom,
            FlexDirection::Row => PhysicalEdge::Left,
            FlexDirection::RowReverse => PhysicalEdge::Right,
        }
    }

    pub(crate) fn trailing_edge(self) -> PhysicalEdge {
        self.leading_edge().opposite()
    }
}

impl Style {
    // --- physical edges ---

    pub(crate) fn edge_margin(&self, edge: PhysicalEdge, direction: Direction, width: Option<f32>) -> f32 {
        self.margin.resolve(edge, direction).resolve(width).unwrap_or(0.0)
    }

    pub(crate) fn edge_padding(&self, edge: PhysicalEdge, direction: Direction, width: Option<f32>) -> f32 {
        self.padding.resolve(edge, direction).resolve(width).unwrap_or(0.0).max(0.0)
    }

    pub(crate) fn edge_border(&self, edge: PhysicalEdge, direction: Direction) -> f32 {
        self.border.resolve(edge, direction).resolve(None).unwrap_or(0.0).max(0.0)
    }

    fn edge_inset(&self, edge: PhysicalEdge, direction: Direction) -> StyleValue {
        self.position.resolve(edge, direction)
    }

    // --- flex-relative edges ---

    pub(crate) fn leading_margin(&self, axis: FlexDirection, direction: Direction, width: Option<f32>) -> f32 {
        self.edge_margin(axis.leading_edge(), direction, width)
    }

    pub(crate) fn trailing_margin(&self, axis: FlexDirection, direction: Direction, width: Option<f32>) -> f32 {
        self.edge_margin(axis.trailing_edge(), direction, width)
    }

    pub(crate) fn margin_for_axis(&self, axis: FlexDirection, direction: Direction, width: Option<f32>) -> f32 {
        self.leading_margin(axis, direction, width) + self.trailing_margin(axis, direction, width)
    }

    pub(crate) fn leading_border(&self, axis: FlexDirection, direction: Direction) -> f32 {
        self.edge_border(axis.leading_edge(), direction)
    }

    pub(crate) fn trailing_border(&self, axis: FlexDirection, direction: Direction) -> f32 {
        self.edge_border(axis.trailing_edge(), direction)
    }

    pub(crate) fn leading_padding_and_border(
        &self,
        axis: FlexDirection,
        direction: Direction,
        width: Option<f32>,
    ) -> f32 {
        self.edge_padding(axis.leading_edge(), direction, width) + self.leading_border(axis, direction)
    }

    pub(crate) fn trailing_padding_and_border(
        &self,
        axis: FlexDirection,
        direction: Direction,
        width: Option<f32>,
    ) -> f32 {
        self.edge_padding(axis.trailing_edge(), direction, width) + self.trailing_border(axis, direction)
    }

    pub(crate) fn padding_and_border_for_axis(
        &self,
        axis: FlexDirection,
        direction: Direction,
        width: Option<f32>,
    ) -> f32 {
        self.leading_padding_and_border(axis, direction, width)
            + self.trailing_padding_and_border(axis, direction, width)
    }

    pub(crate) fn leading_margin_is_auto(&self, axis: FlexDirection, direction: Direction) -> bool {
        self.margin.resolve(axis.leading_edge(), direction).is_auto()
    }

    pub(crate) fn trailing_margin_is_auto(&self, axis: FlexDirection, direction: Direction) -> bool {
        self.margin.resolve(axis.trailing_edge(), direction).is_auto()
    }

    // --- insets ---

    pub(crate) fn is_leading_position_defined(&self, axis: FlexDirection, direction: Direction) -> bool {
        self.edge_inset(axis.leading_edge(), direction).is_defined()
    }

    pub(crate) fn is_trailing_position_defined(&self, axis: FlexDirection, direction: Direction) -> bool {
        self.edge_inset(axis.trailing_edge(), direction).is_defined()
    }

    pub(crate) fn leading_position(&self, axis: FlexDirection, direction: Direction, size: Option<f32>) -> f32 {
        self.edge_inset(axis.leading_edge(), direction).resolve(size).unwrap_or(0.0)
    }

    pub(crate) fn trailing_position(&self, axis: FlexDirection, direction: Direction, size: Option<f32>) -> f32 {
        self.edge_inset(axis.trailing_edge(), direction).resolve(size).unwrap_or(0.0)
    }

    /// Offset of a relatively positioned box, measured along `axis`.
    ///
    /// Left beats right and top beats bottom, whatever the axis direction.
    pub(crate) fn relative_offset(&self, axis: FlexDirection, direction: Direction, size: Option<f32>) -> f32 {
        let (start, end) = if axis.is_row() {
            (PhysicalEdge::Left, PhysicalEdge::Right)
        } else {
            (PhysicalEdge::Top, PhysicalEdge::Bottom)
        };
        let start_inset = self.edge_inset(start, direction).resolve(size);
        let physical = match start_inset {
            Some(offset) => offset,
            None => -self.edge_inset(end, direction).resolve(size).unwrap_or(0.0),
        };
        if axis.leading_edge() == start { physical } else { -physical }
    }

    // --- dimensions ---

    pub(crate) fn min_dimension(&self, row: bool) -> StyleValue {
        self.min_dimensions[if row { 0 } else { 1 }]
    }

    pub(crate) fn max_dimension(&self, row: bool) -> StyleValue {
        self.max_dimensions[if row { 0 } else { 1 }]
    }

    /// Preferred size of an axis. Equal min and max points pin the size.
    pub(crate) fn resolved_dimension(&self, row: bool) -> StyleValue {
        let max = self.max_dimension(row);
        let min = self.min_dimension(row);
        if max.unit == Unit::Point && min.unit == Unit::Point && max.value == min.value {
            max
        } else {
            self.dimensions[if row { 0 } else { 1 }]
        }
    }

    /// Preferred size of an axis in points. Negative sizes clamp to zero.
    pub(crate) fn resolved_size(&self, row: bool, owner_size: Option<f32>) -> Option<f32> {
        self.resolved_dimension(row)
            .resolve(owner_size)
            .filter(|value| value.is_finite())
            .map(|value| value.max(0.0))
    }

    /// Whether the preferred size of an axis resolves to a usable value
    pub(crate) fn is_dimension_defined(&self, row: bool, owner_size: Option<f32>) -> bool {
        self.resolved_size(row, owner_size).is_some()
    }

    // --- flex factors ---

    pub(crate) fn resolved_flex_grow(&self) -> f32 {
        match (self.flex_grow, self.flex) {
            (Some(grow), _) => grow,
            (None, Some(flex)) if flex > 0.0 => flex,
            _ => 0.0,
        }
    }

    pub(crate) fn resolved_flex_shrink(&self, config: &Config) -> f32 {
        match (self.flex_shrink, self.flex) {
            (Some(shrink), _) => shrink,
            (None, Some(flex)) if !config.use_web_defaults && flex < 0.0 => -flex,
            _ => config.default_flex_shrink(),
        }
    }

    pub(crate) fn resolved_flex_basis(&self, config: &Config) -> StyleValue {
        if self.flex_basis.is_defined() {
            return self.flex_basis;
        }
        match self.flex {
            Some(flex) if flex > 0.0 && !config.use_web_defaults => StyleValue::ZERO,
            _ => StyleValue::AUTO,
        }
    }

    pub(crate) fn is_flexible(&self, config: &Config) -> bool {
        self.position_type == crate::style::PositionType::Relative
            && (self.resolved_flex_grow() != 0.0 || self.resolved_flex_shrink(config) != 0.0)
    }
}

/// Cross alignment of `child` inside a container
pub(crate) fn align_item(container: &Style, child: &Style) -> Align {
    let align = if child.align_self == Align::Auto { container.align_items } else { child.align_self };
    if align == Align::Baseline && container.flex_direction.is_column() {
        Align::FlexStart
    } else {
        align
    }
}

/// Clamp a value to the min/max of an axis
pub(crate) fn bound_within_min_max(style: &Style, row: bool, value: f32, axis_size: Option<f32>) -> f32 {
    let mut bound = value;
    if let Some(max) = style.max_dimension(row).resolve(axis_size).filter(|m| *m >= 0.0) {
        if bound > max {
            bound = max;
        }
    }
    if let Some(min) = style.min_dimension(row).resolve(axis_size).filter(|m| *m >= 0.0) {
        if bound < min {
            bound = min;
        }
    }
    bound
}

/// Clamp to min/max and never below padding plus border
pub(crate) fn bound_axis(
    style: &Style,
    direction: Direction,
    row: bool,
    value: f32,
    axis_size: Option<f32>,
    width: Option<f32>,
) -> f32 {
    let axis = if row { FlexDirection::Row } else { FlexDirection::Column };
    bound_within_min_max(style, row, value, axis_size)
        .max(style.padding_and_border_for_axis(axis, direction, width))
}
