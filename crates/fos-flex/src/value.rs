//! Style Values
//!
//! Unit-qualified values plus the small enums shared by styles and
//! computed layouts (edges, direction, measure modes).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit of a [`StyleValue`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    #[default]
    Undefined,
    Point,
    Percent,
    Auto,
}

/// A style value with its unit
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleValue {
    pub value: f32,
    pub unit: Unit,
}

impl StyleValue {
    pub const UNDEFINED: Self = Self { value: 0.0, unit: Unit::Undefined };
    pub const AUTO: Self = Self { value: 0.0, unit: Unit::Auto };
    pub const ZERO: Self = Self { value: 0.0, unit: Unit::Point };

    /// Absolute value in points. NaN unsets the value.
    pub fn points(value: f32) -> Self {
        if value.is_nan() {
            Self::UNDEFINED
        } else {
            Self { value, unit: Unit::Point }
        }
    }

    /// Percentage of the reference size. NaN unsets the value.
    pub fn percent(value: f32) -> Self {
        if value.is_nan() {
            Self::UNDEFINED
        } else {
            Self { value, unit: Unit::Percent }
        }
    }

    /// Point or percent
    pub fn is_defined(self) -> bool {
        matches!(self.unit, Unit::Point | Unit::Percent)
    }

    pub fn is_undefined(self) -> bool {
        self.unit == Unit::Undefined
    }

    pub fn is_auto(self) -> bool {
        self.unit == Unit::Auto
    }

    /// Resolve against a reference size.
    ///
    /// Percentages only resolve against a definite reference.
    pub fn resolve(self, reference: Option<f32>) -> Option<f32> {
        match self.unit {
            Unit::Point => Some(self.value),
            Unit::Percent => reference.map(|r| self.value * r / 100.0),
            Unit::Undefined | Unit::Auto => None,
        }
    }
}

impl Default for StyleValue {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl PartialEq for StyleValue {
    fn eq(&self, other: &Self) -> bool {
        if self.unit != other.unit {
            return false;
        }
        match self.unit {
            Unit::Undefined | Unit::Auto => true,
            Unit::Point | Unit::Percent => {
                self.value == other.value || (self.value.is_nan() && other.value.is_nan())
            }
        }
    }
}

/// Style edge, including the logical and shorthand edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    Start,
    End,
    Horizontal,
    Vertical,
    All,
}

impl Edge {
    pub const COUNT: usize = 9;

    /// Every edge, in storage order
    pub const ALL_EDGES: [Edge; Self::COUNT] = [
        Edge::Left,
        Edge::Top,
        Edge::Right,
        Edge::Bottom,
        Edge::Start,
        Edge::End,
        Edge::Horizontal,
        Edge::Vertical,
        Edge::All,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// CSS-ish name used by the tree printer
    pub fn name(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Start => "start",
            Edge::End => "end",
            Edge::Horizontal => "horizontal",
            Edge::Vertical => "vertical",
            Edge::All => "all",
        }
    }
}

/// Edge of a box on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl PhysicalEdge {
    pub const ALL: [PhysicalEdge; 4] = [
        PhysicalEdge::Left,
        PhysicalEdge::Top,
        PhysicalEdge::Right,
        PhysicalEdge::Bottom,
    ];

    pub fn opposite(self) -> Self {
        match self {
            PhysicalEdge::Left => PhysicalEdge::Right,
            PhysicalEdge::Top => PhysicalEdge::Bottom,
            PhysicalEdge::Right => PhysicalEdge::Left,
            PhysicalEdge::Bottom => PhysicalEdge::Top,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, PhysicalEdge::Left | PhysicalEdge::Right)
    }

    /// The style edge with the same name
    pub fn as_edge(self) -> Edge {
        match self {
            PhysicalEdge::Left => Edge::Left,
            PhysicalEdge::Top => Edge::Top,
            PhysicalEdge::Right => Edge::Right,
            PhysicalEdge::Bottom => Edge::Bottom,
        }
    }

    /// The logical edge that lands on this edge in `direction`
    pub(crate) fn logical(self, direction: Direction) -> Option<Edge> {
        let rtl = direction == Direction::Rtl;
        match self {
            PhysicalEdge::Left if rtl => Some(Edge::End),
            PhysicalEdge::Left => Some(Edge::Start),
            PhysicalEdge::Right if rtl => Some(Edge::Start),
            PhysicalEdge::Right => Some(Edge::End),
            PhysicalEdge::Top | PhysicalEdge::Bottom => None,
        }
    }
}

/// Layout direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Inherit,
    Ltr,
    Rtl,
}

impl Direction {
    /// Resolve `Inherit` against the owner's direction
    pub fn resolve(self, owner: Direction) -> Direction {
        match self {
            Direction::Inherit if owner == Direction::Inherit => Direction::Ltr,
            Direction::Inherit => owner,
            resolved => resolved,
        }
    }
}

/// How an available size constrains a measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasureMode {
    /// No constraint; the size is meaningless
    #[default]
    Undefined,
    /// The node must be exactly this size
    Exactly,
    /// The node may be at most this size
    AtMost,
}

/// Compare two layout floats with a small tolerance.
///
/// Non-finite values only equal themselves.
pub(crate) fn inexact_eq(a: f32, b: f32) -> bool {
    if a.is_finite() && b.is_finite() {
        (a - b).abs() < 0.0001
    } else {
        a == b || (a.is_nan() && b.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_unsets() {
        assert_eq!(StyleValue::points(f32::NAN), StyleValue::UNDEFINED);
        assert_eq!(StyleValue::percent(f32::NAN), StyleValue::UNDEFINED);
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(StyleValue::points(10.0), StyleValue::points(10.0));
        assert_ne!(StyleValue::points(10.0), StyleValue::percent(10.0));
        assert_eq!(StyleValue::AUTO, StyleValue::AUTO);
        assert_ne!(StyleValue::AUTO, StyleValue::UNDEFINED);
    }

    #[test]
    fn test_resolve_percent_needs_reference() {
        assert_eq!(StyleValue::percent(50.0).resolve(Some(200.0)), Some(100.0));
        assert_eq!(StyleValue::percent(50.0).resolve(None), None);
        assert_eq!(StyleValue::points(12.0).resolve(None), Some(12.0));
        assert_eq!(StyleValue::AUTO.resolve(Some(100.0)), None);
    }

    #[test]
    fn test_direction_resolve() {
        assert_eq!(Direction::Inherit.resolve(Direction::Inherit), Direction::Ltr);
        assert_eq!(Direction::Inherit.resolve(Direction::Rtl), Direction::Rtl);
        assert_eq!(Direction::Ltr.resolve(Direction::Rtl), Direction::Ltr);
    }

    #[test]
    fn test_logical_edges() {
        assert_eq!(PhysicalEdge::Left.logical(Direction::Ltr), Some(Edge::Start));
        assert_eq!(PhysicalEdge::Left.logical(Direction::Rtl), Some(Edge::End));
        assert_eq!(PhysicalEdge::Top.logical(Direction::Rtl), None);
    }

    #[test]
    fn test_inexact_eq() {
        assert!(inexact_eq(1.0, 1.00001));
        assert!(!inexact_eq(1.0, 1.1));
        assert!(inexact_eq(f32::INFINITY, f32::INFINITY));
        assert!(!inexact_eq(f32::INFINITY, 1.0));
    }
}
