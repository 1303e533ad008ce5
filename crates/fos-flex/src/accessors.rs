//! Style Setters
//!
//! Unit-qualified setters on [`FlexTree`]. Every setter funnels into
//! [`FlexTree::set_style_property`], which dirties the node only when the
//! stored value actually changes.

use crate::error::FlexResult;
use crate::invalidation::DirtyReason;
use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{
    Align, DimensionProperty, Display, EdgeProperty, FactorProperty, FlexDirection, Gutter, Justify,
    Overflow, PositionType, StyleProperty, Wrap,
};
use crate::value::{Direction, Edge, StyleValue};

macro_rules! dimension_setters {
    ($($prop:ident => $points:ident, $percent:ident $(, $auto:ident)?;)*) => {
        $(
            pub fn $points(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
                self.set_dimension(node, DimensionProperty::$prop, StyleValue::points(value))
            }

            pub fn $percent(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
                self.set_dimension(node, DimensionProperty::$prop, StyleValue::percent(value))
            }

            $(
                pub fn $auto(&mut self, node: NodeId) -> FlexResult<bool> {
                    self.set_dimension(node, DimensionProperty::$prop, StyleValue::AUTO)
                }
            )?
        )*
    };
}

macro_rules! enum_setters {
    ($($name:ident($ty:ty) => $variant:ident;)*) => {
        $(
            pub fn $name(&mut self, node: NodeId, value: $ty) -> FlexResult<bool> {
                self.set_style_property(node, StyleProperty::$variant(value))
            }
        )*
    };
}

impl FlexTree {
    /// Apply one style property. Returns whether the style changed.
    pub fn set_style_property(&mut self, node: NodeId, property: StyleProperty) -> FlexResult<bool> {
        let changed = self.node_mut(node)?.style.apply(property);
        if changed {
            self.mark_dirty_with_reason(node, DirtyReason::StyleChanged);
        }
        Ok(changed)
    }

    pub fn set_dimension(
        &mut self,
        node: NodeId,
        property: DimensionProperty,
        value: StyleValue,
    ) -> FlexResult<bool> {
        self.set_style_property(node, StyleProperty::Dimension(property, value))
    }

    pub fn set_edge(
        &mut self,
        node: NodeId,
        property: EdgeProperty,
        edge: Edge,
        value: StyleValue,
    ) -> FlexResult<bool> {
        self.set_style_property(node, StyleProperty::Edge(property, edge, value))
    }

    pub fn set_factor(&mut self, node: NodeId, property: FactorProperty, value: Option<f32>) -> FlexResult<bool> {
        self.set_style_property(node, StyleProperty::Factor(property, value))
    }

    dimension_setters! {
        Width => set_width, set_width_percent, set_width_auto;
        Height => set_height, set_height_percent, set_height_auto;
        MinWidth => set_min_width, set_min_width_percent;
        MinHeight => set_min_height, set_min_height_percent;
        MaxWidth => set_max_width, set_max_width_percent;
        MaxHeight => set_max_height, set_max_height_percent;
        FlexBasis => set_flex_basis, set_flex_basis_percent, set_flex_basis_auto;
    }

    // --- edges ---

    pub fn set_margin(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Margin, edge, StyleValue::points(value))
    }

    pub fn set_margin_percent(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Margin, edge, StyleValue::percent(value))
    }

    pub fn set_margin_auto(&mut self, node: NodeId, edge: Edge) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Margin, edge, StyleValue::AUTO)
    }

    pub fn set_padding(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Padding, edge, StyleValue::points(value))
    }

    pub fn set_padding_percent(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Padding, edge, StyleValue::percent(value))
    }

    pub fn set_border(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Border, edge, StyleValue::points(value))
    }

    pub fn set_position(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Position, edge, StyleValue::points(value))
    }

    pub fn set_position_percent(&mut self, node: NodeId, edge: Edge, value: f32) -> FlexResult<bool> {
        self.set_edge(node, EdgeProperty::Position, edge, StyleValue::percent(value))
    }

    // --- gaps ---

    pub fn set_gap(&mut self, node: NodeId, gutter: Gutter, value: f32) -> FlexResult<bool> {
        self.set_style_property(node, StyleProperty::Gap(gutter, StyleValue::points(value)))
    }

    pub fn set_gap_percent(&mut self, node: NodeId, gutter: Gutter, value: f32) -> FlexResult<bool> {
        self.set_style_property(node, StyleProperty::Gap(gutter, StyleValue::percent(value)))
    }

    // --- factors ---

    pub fn set_flex(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
        self.set_factor(node, FactorProperty::Flex, Some(value))
    }

    pub fn set_flex_grow(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
        self.set_factor(node, FactorProperty::FlexGrow, Some(value))
    }

    pub fn set_flex_shrink(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
        self.set_factor(node, FactorProperty::FlexShrink, Some(value))
    }

    pub fn set_aspect_ratio(&mut self, node: NodeId, value: f32) -> FlexResult<bool> {
        self.set_factor(node, FactorProperty::AspectRatio, Some(value))
    }

    // --- enums ---

    enum_setters! {
        set_direction(Direction) => Direction;
        set_flex_direction(FlexDirection) => FlexDirection;
        set_justify_content(Justify) => JustifyContent;
        set_align_content(Align) => AlignContent;
        set_align_items(Align) => AlignItems;
        set_align_self(Align) => AlignSelf;
        set_position_type(PositionType) => PositionType;
        set_flex_wrap(Wrap) => FlexWrap;
        set_overflow(Overflow) => Overflow;
        set_display(Display) => Display;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_reports_change() {
        let mut tree = FlexTree::new();
        let node = tree.new_node();
        assert!(tree.set_width(node, 10.0).unwrap());
        assert!(!tree.set_width(node, 10.0).unwrap());
        assert!(tree.set_width_percent(node, 10.0).unwrap());
        assert_eq!(tree.style(node).unwrap().width(), StyleValue::percent(10.0));
    }

    #[test]
    fn test_redundant_setter_keeps_clean() {
        let mut tree = FlexTree::new();
        let root = tree.new_node();
        tree.set_width(root, 50.0).unwrap();
        tree.set_flex_direction(root, FlexDirection::Row).unwrap();
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
        assert!(!tree.is_dirty(root).unwrap());

        tree.set_width(root, 50.0).unwrap();
        tree.set_flex_direction(root, FlexDirection::Row).unwrap();
        assert!(!tree.is_dirty(root).unwrap());

        tree.set_margin(root, Edge::Left, 5.0).unwrap();
        assert!(tree.is_dirty(root).unwrap());
    }

    #[test]
    fn test_nan_unsets_property() {
        let mut tree = FlexTree::new();
        let node = tree.new_node();
        tree.set_padding(node, Edge::All, 4.0).unwrap();
        tree.set_padding(node, Edge::All, f32::NAN).unwrap();
        assert!(tree.style(node).unwrap().padding(Edge::All).is_undefined());

        tree.set_flex_grow(node, 2.0).unwrap();
        tree.set_flex_grow(node, f32::NAN).unwrap();
        assert_eq!(tree.style(node).unwrap().flex_grow(), None);
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut tree = FlexTree::new();
        let node = tree.new_node();
        tree.free(node).unwrap();
        assert!(tree.set_width(node, 1.0).is_err());
    }
}
