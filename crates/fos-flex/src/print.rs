//! Tree Printer
//!
//! Renders a subtree as nested `<div>` elements for debugging. The `style`
//! attribute only lists properties that differ from the tree's default
//! style.

use std::fmt::Write;

use crate::error::FlexResult;
use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{
    Align, DimensionProperty, Display, EdgeProperty, FactorProperty, FlexDirection, Gutter, Justify, Overflow,
    PositionType, Style, Wrap,
};
use crate::value::{Direction, Edge, StyleValue, Unit};

/// What [`FlexTree::print_tree`] includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub layout: bool,
    pub style: bool,
    pub children: bool,
}

impl PrintOptions {
    pub const LAYOUT: Self = Self { layout: true, style: false, children: false };
    pub const STYLE: Self = Self { layout: false, style: true, children: false };
    pub const CHILDREN: Self = Self { layout: false, style: false, children: true };
    pub const ALL: Self = Self { layout: true, style: true, children: true };

    pub fn with_layout(mut self, enabled: bool) -> Self {
        self.layout = enabled;
        self
    }

    pub fn with_style(mut self, enabled: bool) -> Self {
        self.style = enabled;
        self
    }

    pub fn with_children(mut self, enabled: bool) -> Self {
        self.children = enabled;
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::ALL
    }
}

trait CssName {
    fn css_name(self) -> &'static str;
}

impl CssName for Direction {
    fn css_name(self) -> &'static str {
        match self {
            Direction::Inherit => "inherit",
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl CssName for FlexDirection {
    fn css_name(self) -> &'static str {
        match self {
            FlexDirection::Column => "column",
            FlexDirection::ColumnReverse => "column-reverse",
            FlexDirection::Row => "row",
            FlexDirection::RowReverse => "row-reverse",
        }
    }
}

impl CssName for Justify {
    fn css_name(self) -> &'static str {
        match self {
            Justify::FlexStart => "flex-start",
            Justify::Center => "center",
            Justify::FlexEnd => "flex-end",
            Justify::SpaceBetween => "space-between",
            Justify::SpaceAround => "space-around",
            Justify::SpaceEvenly => "space-evenly",
        }
    }
}

impl CssName for Align {
    fn css_name(self) -> &'static str {
        match self {
            Align::Auto => "auto",
            Align::FlexStart => "flex-start",
            Align::Center => "center",
            Align::FlexEnd => "flex-end",
            Align::Stretch => "stretch",
            Align::Baseline => "baseline",
            Align::SpaceBetween => "space-between",
            Align::SpaceAround => "space-around",
        }
    }
}

impl CssName for PositionType {
    fn css_name(self) -> &'static str {
        match self {
            PositionType::Relative => "relative",
            PositionType::Absolute => "absolute",
        }
    }
}

impl CssName for Wrap {
    fn css_name(self) -> &'static str {
        match self {
            Wrap::NoWrap => "nowrap",
            Wrap::Wrap => "wrap",
            Wrap::WrapReverse => "wrap-reverse",
        }
    }
}

impl CssName for Overflow {
    fn css_name(self) -> &'static str {
        match self {
            Overflow::Visible => "visible",
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
        }
    }
}

impl CssName for Display {
    fn css_name(self) -> &'static str {
        match self {
            Display::Flex => "flex",
            Display::None => "none",
        }
    }
}

fn write_value(out: &mut String, name: &str, value: StyleValue) {
    match value.unit {
        Unit::Undefined => {}
        Unit::Auto => {
            write!(out, "{name}: auto; ").ok();
        }
        Unit::Point => {
            write!(out, "{name}: {}px; ", value.value).ok();
        }
        Unit::Percent => {
            write!(out, "{name}: {}%; ", value.value).ok();
        }
    }
}

fn write_enum<T: CssName + PartialEq + Copy>(out: &mut String, name: &str, value: T, default: T) {
    if value != default {
        write!(out, "{name}: {}; ", value.css_name()).ok();
    }
}

fn write_style(out: &mut String, style: &Style, default: &Style) {
    write_enum(out, "direction", style.direction(), default.direction());
    write_enum(out, "flex-direction", style.flex_direction(), default.flex_direction());
    write_enum(out, "justify-content", style.justify_content(), default.justify_content());
    write_enum(out, "align-content", style.align_content(), default.align_content());
    write_enum(out, "align-items", style.align_items(), default.align_items());
    write_enum(out, "align-self", style.align_self(), default.align_self());
    write_enum(out, "position", style.position_type(), default.position_type());
    write_enum(out, "flex-wrap", style.flex_wrap(), default.flex_wrap());
    write_enum(out, "overflow", style.overflow(), default.overflow());
    write_enum(out, "display", style.display(), default.display());

    for (property, name) in [
        (FactorProperty::Flex, "flex"),
        (FactorProperty::FlexGrow, "flex-grow"),
        (FactorProperty::FlexShrink, "flex-shrink"),
        (FactorProperty::AspectRatio, "aspect-ratio"),
    ] {
        if let Some(value) = style.factor(property) {
            write!(out, "{name}: {value}; ").ok();
        }
    }

    for (property, name) in [
        (DimensionProperty::FlexBasis, "flex-basis"),
        (DimensionProperty::Width, "width"),
        (DimensionProperty::Height, "height"),
        (DimensionProperty::MinWidth, "min-width"),
        (DimensionProperty::MinHeight, "min-height"),
        (DimensionProperty::MaxWidth, "max-width"),
        (DimensionProperty::MaxHeight, "max-height"),
    ] {
        let value = style.dimension(property);
        if value != default.dimension(property) {
            write_value(out, name, value);
        }
    }

    for (property, prefix) in [
        (EdgeProperty::Margin, Some("margin")),
        (EdgeProperty::Padding, Some("padding")),
        (EdgeProperty::Border, Some("border")),
        (EdgeProperty::Position, None),
    ] {
        for (edge, value) in style.edges(property).iter_set() {
            let name = match (prefix, edge) {
                (Some(prefix), Edge::All) => prefix.to_string(),
                (Some(prefix), edge) => format!("{prefix}-{}", edge.name()),
                (None, edge) => edge.name().to_string(),
            };
            write_value(out, &name, value);
        }
    }

    for (gutter, name) in [(Gutter::All, "gap"), (Gutter::Column, "column-gap"), (Gutter::Row, "row-gap")] {
        write_value(out, name, style.gap(gutter));
    }
}

impl FlexTree {
    /// Render `node` (and optionally its subtree) as HTML-like text
    pub fn print_tree(&self, node: NodeId, options: PrintOptions) -> FlexResult<String> {
        self.check(node)?;
        let default = if self.config.use_web_defaults { Style::web() } else { Style::default() };
        let mut out = String::new();
        self.print_node(&mut out, node, options, &default, 0);
        Ok(out)
    }

    fn print_node(&self, out: &mut String, id: NodeId, options: PrintOptions, default: &Style, level: usize) {
        let node = &self[id];
        let indent = "  ".repeat(level);
        write!(out, "{indent}<div").ok();

        if options.layout {
            let layout = &node.layout;
            write!(
                out,
                " layout=\"width: {}; height: {}; top: {}; left: {};\"",
                layout.width(),
                layout.height(),
                layout.top(),
                layout.left()
            )
            .ok();
        }

        if options.style {
            let mut style = String::new();
            write_style(&mut style, &node.style, default);
            let style = style.trim_end();
            if !style.is_empty() {
                write!(out, " style=\"{style}\"").ok();
            }
        }

        if node.measure.is_some() {
            out.push_str(" has-custom-measure=\"true\"");
        }
        out.push('>');

        if options.children && !node.children.is_empty() {
            for &child in &node.children {
                out.push('\n');
                self.print_node(out, child, options, default, level + 1);
            }
            write!(out, "\n{indent}").ok();
        }
        out.push_str("</div>");
    }
}
