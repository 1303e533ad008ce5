//! Style Model
//!
//! Per-node flexbox style. Properties are grouped by the shape of their
//! value: dimensions ([`DimensionProperty`]), edge-indexed insets
//! ([`EdgeProperty`]), plain factors ([`FactorProperty`]), gaps ([`Gutter`])
//! and the enumerated properties. [`StyleProperty`] is the tagged union a
//! host uses to push any one of them through a single entry point.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::{Direction, Edge, PhysicalEdge, StyleValue, Unit};

/// Flex direction (main axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    pub fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Justify content (main axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Justify {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Cross axis alignment, shared by align-items, align-self and align-content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Align {
    #[default]
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
}

/// Position type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositionType {
    #[default]
    Relative,
    Absolute,
}

/// Flex wrap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

/// Overflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

/// Display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// Gap selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gutter {
    /// Gap between columns (along a row)
    Column,
    /// Gap between rows (along a column)
    Row,
    All,
}

/// Sized properties holding a single [`StyleValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimensionProperty {
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    FlexBasis,
}

impl DimensionProperty {
    fn accepts(self, unit: Unit) -> bool {
        match self {
            Self::Width | Self::Height | Self::FlexBasis => true,
            _ => unit != Unit::Auto,
        }
    }
}

/// Properties indexed by [`Edge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeProperty {
    Margin,
    Padding,
    Border,
    Position,
}

impl EdgeProperty {
    fn accepts(self, unit: Unit) -> bool {
        match self {
            Self::Margin => true,
            Self::Padding | Self::Position => unit != Unit::Auto,
            Self::Border => matches!(unit, Unit::Point | Unit::Undefined),
        }
    }
}

/// Unitless scalar properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactorProperty {
    Flex,
    FlexGrow,
    FlexShrink,
    AspectRatio,
}

/// One style property together with its new value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StyleProperty {
    Dimension(DimensionProperty, StyleValue),
    Edge(EdgeProperty, Edge, StyleValue),
    Factor(FactorProperty, Option<f32>),
    Gap(Gutter, StyleValue),
    Direction(Direction),
    FlexDirection(FlexDirection),
    JustifyContent(Justify),
    AlignContent(Align),
    AlignItems(Align),
    AlignSelf(Align),
    PositionType(PositionType),
    FlexWrap(Wrap),
    Overflow(Overflow),
    Display(Display),
}

/// Edge-indexed values with shorthand resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edges {
    values: [StyleValue; Edge::COUNT],
}

impl Edges {
    pub fn get(&self, edge: Edge) -> StyleValue {
        self.values[edge.index()]
    }

    /// Store a value, returning whether it changed
    pub fn set(&mut self, edge: Edge, value: StyleValue) -> bool {
        let slot = &mut self.values[edge.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Value that applies to a physical edge.
    ///
    /// Start/End (as laid out in `direction`) beat the exact edge, which
    /// beats Horizontal/Vertical, which beats All.
    pub fn resolve(&self, edge: PhysicalEdge, direction: Direction) -> StyleValue {
        let axis = if edge.is_horizontal() { Edge::Horizontal } else { Edge::Vertical };
        let candidates = [edge.logical(direction), Some(edge.as_edge()), Some(axis), Some(Edge::All)];
        candidates
            .into_iter()
            .flatten()
            .map(|e| self.get(e))
            .find(|v| !v.is_undefined())
            .unwrap_or(StyleValue::UNDEFINED)
    }

    /// Iterate the explicitly set edges
    pub fn iter_set(&self) -> impl Iterator<Item = (Edge, StyleValue)> + '_ {
        Edge::ALL_EDGES
            .into_iter()
            .map(|e| (e, self.get(e)))
            .filter(|(_, v)| !v.is_undefined())
    }
}

/// Complete style of a node
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub(crate) direction: Direction,
    pub(crate) flex_direction: FlexDirection,
    pub(crate) justify_content: Justify,
    pub(crate) align_content: Align,
    pub(crate) align_items: Align,
    pub(crate) align_self: Align,
    pub(crate) position_type: PositionType,
    pub(crate) flex_wrap: Wrap,
    pub(crate) overflow: Overflow,
    pub(crate) display: Display,
    pub(crate) flex: Option<f32>,
    pub(crate) flex_grow: Option<f32>,
    pub(crate) flex_shrink: Option<f32>,
    pub(crate) flex_basis: StyleValue,
    pub(crate) margin: Edges,
    pub(crate) position: Edges,
    pub(crate) padding: Edges,
    pub(crate) border: Edges,
    pub(crate) gap: [StyleValue; 3],
    pub(crate) dimensions: [StyleValue; 2],
    pub(crate) min_dimensions: [StyleValue; 2],
    pub(crate) max_dimensions: [StyleValue; 2],
    pub(crate) aspect_ratio: Option<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: StyleValue::AUTO,
            margin: Edges::default(),
            position: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            gap: [StyleValue::UNDEFINED; 3],
            dimensions: [StyleValue::AUTO; 2],
            min_dimensions: [StyleValue::UNDEFINED; 2],
            max_dimensions: [StyleValue::UNDEFINED; 2],
            aspect_ratio: None,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults matching CSS: row direction and stretched content lines
    pub fn web() -> Self {
        Self {
            flex_direction: FlexDirection::Row,
            align_content: Align::Stretch,
            ..Self::default()
        }
    }

    // --- enumerated properties ---

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn flex_direction(&self) -> FlexDirection {
        self.flex_direction
    }

    pub fn justify_content(&self) -> Justify {
        self.justify_content
    }

    pub fn align_content(&self) -> Align {
        self.align_content
    }

    pub fn align_items(&self) -> Align {
        self.align_items
    }

    pub fn align_self(&self) -> Align {
        self.align_self
    }

    pub fn position_type(&self) -> PositionType {
        self.position_type
    }

    pub fn flex_wrap(&self) -> Wrap {
        self.flex_wrap
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn display(&self) -> Display {
        self.display
    }

    // --- factors ---

    pub fn flex(&self) -> Option<f32> {
        self.flex
    }

    pub fn flex_grow(&self) -> Option<f32> {
        self.flex_grow
    }

    pub fn flex_shrink(&self) -> Option<f32> {
        self.flex_shrink
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        self.aspect_ratio
    }

    pub fn factor(&self, property: FactorProperty) -> Option<f32> {
        match property {
            FactorProperty::Flex => self.flex,
            FactorProperty::FlexGrow => self.flex_grow,
            FactorProperty::FlexShrink => self.flex_shrink,
            FactorProperty::AspectRatio => self.aspect_ratio,
        }
    }

    // --- dimensions ---

    pub fn width(&self) -> StyleValue {
        self.dimensions[0]
    }

    pub fn height(&self) -> StyleValue {
        self.dimensions[1]
    }

    pub fn min_width(&self) -> StyleValue {
        self.min_dimensions[0]
    }

    pub fn min_height(&self) -> StyleValue {
        self.min_dimensions[1]
    }

    pub fn max_width(&self) -> StyleValue {
        self.max_dimensions[0]
    }

    pub fn max_height(&self) -> StyleValue {
        self.max_dimensions[1]
    }

    pub fn flex_basis(&self) -> StyleValue {
        self.flex_basis
    }

    pub fn dimension(&self, property: DimensionProperty) -> StyleValue {
        match property {
            DimensionProperty::Width => self.dimensions[0],
            DimensionProperty::Height => self.dimensions[1],
            DimensionProperty::MinWidth => self.min_dimensions[0],
            DimensionProperty::MinHeight => self.min_dimensions[1],
            DimensionProperty::MaxWidth => self.max_dimensions[0],
            DimensionProperty::MaxHeight => self.max_dimensions[1],
            DimensionProperty::FlexBasis => self.flex_basis,
        }
    }

    fn dimension_mut(&mut self, property: DimensionProperty) -> &mut StyleValue {
        match property {
            DimensionProperty::Width => &mut self.dimensions[0],
            DimensionProperty::Height => &mut self.dimensions[1],
            DimensionProperty::MinWidth => &mut self.min_dimensions[0],
            DimensionProperty::MinHeight => &mut self.min_dimensions[1],
            DimensionProperty::MaxWidth => &mut self.max_dimensions[0],
            DimensionProperty::MaxHeight => &mut self.max_dimensions[1],
            DimensionProperty::FlexBasis => &mut self.flex_basis,
        }
    }

    // --- edges ---

    pub fn margin(&self, edge: Edge) -> StyleValue {
        self.margin.get(edge)
    }

    pub fn padding(&self, edge: Edge) -> StyleValue {
        self.padding.get(edge)
    }

    pub fn border(&self, edge: Edge) -> StyleValue {
        self.border.get(edge)
    }

    pub fn position(&self, edge: Edge) -> StyleValue {
        self.position.get(edge)
    }

    pub fn edges(&self, property: EdgeProperty) -> &Edges {
        match property {
            EdgeProperty::Margin => &self.margin,
            EdgeProperty::Padding => &self.padding,
            EdgeProperty::Border => &self.border,
            EdgeProperty::Position => &self.position,
        }
    }

    fn edges_mut(&mut self, property: EdgeProperty) -> &mut Edges {
        match property {
            EdgeProperty::Margin => &mut self.margin,
            EdgeProperty::Padding => &mut self.padding,
            EdgeProperty::Border => &mut self.border,
            EdgeProperty::Position => &mut self.position,
        }
    }

    // --- gaps ---

    pub fn gap(&self, gutter: Gutter) -> StyleValue {
        self.gap[gutter as usize]
    }

    /// Gap that applies to a gutter, falling back to `All`
    pub(crate) fn resolved_gap(&self, gutter: Gutter, reference: Option<f32>) -> f32 {
        let specific = self.gap[gutter as usize];
        let value = if specific.is_undefined() { self.gap[Gutter::All as usize] } else { specific };
        value.resolve(reference).unwrap_or(0.0).max(0.0)
    }

    /// Apply one property, returning whether the style changed
    pub fn apply(&mut self, property: StyleProperty) -> bool {
        match property {
            StyleProperty::Dimension(prop, value) => {
                let value = if prop.accepts(value.unit) {
                    value
                } else {
                    tracing::debug!("{:?} does not accept {:?}; storing undefined", prop, value.unit);
                    StyleValue::UNDEFINED
                };
                replace(self.dimension_mut(prop), value)
            }
            StyleProperty::Edge(prop, edge, value) => {
                let value = if prop.accepts(value.unit) {
                    value
                } else {
                    tracing::debug!("{:?} does not accept {:?}; storing undefined", prop, value.unit);
                    StyleValue::UNDEFINED
                };
                self.edges_mut(prop).set(edge, value)
            }
            StyleProperty::Factor(prop, value) => {
                let value = value.filter(|v| !v.is_nan());
                let value = match prop {
                    FactorProperty::AspectRatio => value.filter(|v| v.is_finite() && *v > 0.0),
                    _ => value,
                };
                let slot = match prop {
                    FactorProperty::Flex => &mut self.flex,
                    FactorProperty::FlexGrow => &mut self.flex_grow,
                    FactorProperty::FlexShrink => &mut self.flex_shrink,
                    FactorProperty::AspectRatio => &mut self.aspect_ratio,
                };
                replace(slot, value)
            }
            StyleProperty::Gap(gutter, value) => {
                let value = if value.is_auto() { StyleValue::UNDEFINED } else { value };
                replace(&mut self.gap[gutter as usize], value)
            }
            StyleProperty::Direction(v) => replace(&mut self.direction, v),
            StyleProperty::FlexDirection(v) => replace(&mut self.flex_direction, v),
            StyleProperty::JustifyContent(v) => replace(&mut self.justify_content, v),
            StyleProperty::AlignContent(v) => replace(&mut self.align_content, v),
            StyleProperty::AlignItems(v) => replace(&mut self.align_items, v),
            StyleProperty::AlignSelf(v) => replace(&mut self.align_self, v),
            StyleProperty::PositionType(v) => replace(&mut self.position_type, v),
            StyleProperty::FlexWrap(v) => replace(&mut self.flex_wrap, v),
            StyleProperty::Overflow(v) => replace(&mut self.overflow, v),
            StyleProperty::Display(v) => replace(&mut self.display, v),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
