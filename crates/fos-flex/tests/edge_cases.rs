//! Edge case and stress tests for fos-flex
//!
//! Degenerate sizes, conflicting constraints, misbehaving measure callbacks
//! and large trees.

use std::cell::Cell;
use std::rc::Rc;

use fos_flex::{
    Align, Config, Direction, Display, Edge, FlexDirection, FlexTree, MeasureError, MeasureMode, NodeId,
    NodeType, Overflow, PositionType, Size,
};

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 0.01, "expected {expected}, got {actual}");
}

// ============================================================================
// DEGENERATE SIZES
// ============================================================================

#[test]
fn test_zero_available_space() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.set_flex_grow(child, 1.0).unwrap();
    tree.append_child(root, child).unwrap();
    tree.calculate_layout(root, Some(0.0), Some(0.0), Direction::Ltr).unwrap();

    assert_eq!(tree.layout(root).unwrap().size(), Size::ZERO);
    assert_eq!(tree.layout(child).unwrap().size(), Size::ZERO);
}

#[test]
fn test_negative_root_width_clamps_to_zero() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, -10.0).unwrap();
    tree.calculate_layout(root, Some(200.0), None, Direction::Ltr).unwrap();

    let layout = tree.layout(root).unwrap();
    assert_eq!(layout.width(), 0.0);
    assert_eq!(layout.height(), 0.0);
}

#[test]
fn test_negative_width_clamps_at_padding() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, -10.0).unwrap();
    tree.set_padding(root, Edge::Horizontal, 2.0).unwrap();
    tree.calculate_layout(root, Some(200.0), None, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(root).unwrap().width(), 4.0);
}

#[test]
fn test_negative_child_width_does_not_stretch() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, 100.0).unwrap();
    tree.set_height(root, 100.0).unwrap();

    let child = tree.new_node();
    tree.set_width(child, -50.0).unwrap();
    tree.set_height(child, 20.0).unwrap();
    tree.append_child(root, child).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.width(), 0.0);
    assert_eq!(layout.height(), 20.0);
}

#[test]
fn test_padding_wider_than_box() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, 10.0).unwrap();
    tree.set_height(root, 10.0).unwrap();
    tree.set_padding(root, Edge::All, 20.0).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    // The box never shrinks below its padding
    assert_close(tree.layout(root).unwrap().width(), 40.0);
    assert_close(tree.layout(root).unwrap().height(), 40.0);
}

#[test]
fn test_min_greater_than_max_prefers_min() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 200.0).unwrap();
    tree.set_height(root, 50.0).unwrap();
    let child = tree.new_node();
    tree.set_flex_grow(child, 1.0).unwrap();
    tree.set_min_width(child, 80.0).unwrap();
    tree.set_max_width(child, 40.0).unwrap();
    tree.append_child(root, child).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_close(tree.layout(child).unwrap().width(), 80.0);
}

#[test]
fn test_overflowing_items_flag_overflow() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 50.0).unwrap();
    tree.set_height(root, 10.0).unwrap();
    for _ in 0..2 {
        let child = tree.new_node();
        tree.set_width(child, 40.0).unwrap();
        tree.append_child(root, child).unwrap();
    }
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert!(tree.layout(root).unwrap().had_overflow());
}

#[test]
fn test_hidden_overflow_still_lays_out() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_height(root, 20.0).unwrap();
    tree.set_overflow(root, Overflow::Hidden).unwrap();
    let child = tree.new_node();
    tree.set_height(child, 100.0).unwrap();
    tree.append_child(root, child).unwrap();
    tree.calculate_layout(root, Some(30.0), None, Direction::Ltr).unwrap();

    assert_close(tree.layout(root).unwrap().height(), 20.0);
    assert_close(tree.layout(child).unwrap().height(), 100.0);
}

// ============================================================================
// HIDDEN AND ABSOLUTE CHILDREN
// ============================================================================

#[test]
fn test_only_hidden_children() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    for _ in 0..3 {
        let child = tree.new_node();
        tree.set_width(child, 10.0).unwrap();
        tree.set_height(child, 10.0).unwrap();
        tree.set_display(child, Display::None).unwrap();
        tree.append_child(root, child).unwrap();
    }
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(root).unwrap().size(), Size::ZERO);
}

#[test]
fn test_only_absolute_children() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.set_position_type(child, PositionType::Absolute).unwrap();
    tree.set_width(child, 30.0).unwrap();
    tree.set_height(child, 30.0).unwrap();
    tree.set_position(child, Edge::Right, 0.0).unwrap();
    tree.append_child(root, child).unwrap();
    tree.calculate_layout(root, Some(100.0), Some(100.0), Direction::Ltr).unwrap();

    // Content-free root still fills the available space
    assert_close(tree.layout(root).unwrap().width(), 100.0);
    assert_close(tree.layout(child).unwrap().left(), 70.0);
}

// ============================================================================
// MEASURE CALLBACKS
// ============================================================================

#[test]
fn test_measure_respects_at_most() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, 100.0).unwrap();
    tree.set_align_items(root, Align::FlexStart).unwrap();
    let text = tree.new_node();
    tree.set_node_type(text, NodeType::Text).unwrap();
    tree.set_measure_func(
        text,
        Some(Box::new(|width: f32, mode: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
            // 300 points of text wrapped into lines of at most `width`
            let line = if mode == MeasureMode::Undefined { 300.0 } else { width.min(300.0) };
            let lines = (300.0 / line).ceil();
            Ok(Size::new(line, lines * 10.0))
        })),
    )
    .unwrap();
    tree.append_child(root, text).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_close(tree.layout(text).unwrap().width(), 100.0);
    assert_close(tree.layout(text).unwrap().height(), 30.0);
    assert_close(tree.layout(root).unwrap().height(), 30.0);
}

#[test]
fn test_infinite_measurement_is_clamped() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_align_items(root, Align::FlexStart).unwrap();
    let leaf = tree.new_node();
    tree.set_measure_func(
        leaf,
        Some(Box::new(|_: f32, _: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
            Ok(Size::new(f32::INFINITY, 12.0))
        })),
    )
    .unwrap();
    tree.append_child(root, leaf).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let layout = tree.layout(leaf).unwrap();
    assert!(layout.width().is_finite());
    assert_close(layout.height(), 12.0);
}

#[test]
fn test_mark_dirty_remeasures() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, 100.0).unwrap();
    tree.set_align_items(root, Align::FlexStart).unwrap();
    let leaf = tree.new_node();
    let text_width = Rc::new(Cell::new(20.0_f32));
    let source = text_width.clone();
    tree.set_measure_func(
        leaf,
        Some(Box::new(move |_: f32, _: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
            Ok(Size::new(source.get(), 10.0))
        })),
    )
    .unwrap();
    tree.append_child(root, leaf).unwrap();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    assert_close(tree.layout(leaf).unwrap().width(), 20.0);

    // Changing content behind the callback needs an explicit dirty mark
    text_width.set(35.0);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    assert_close(tree.layout(leaf).unwrap().width(), 20.0);

    tree.mark_dirty(leaf).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    assert_close(tree.layout(leaf).unwrap().width(), 35.0);
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_deep_nesting() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let mut parent = root;
    for _ in 0..50 {
        tree.set_padding(parent, Edge::All, 1.0).unwrap();
        let child = tree.new_node();
        tree.append_child(parent, child).unwrap();
        parent = child;
    }
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    // Fifty padded ancestors around an empty leaf
    assert_close(tree.layout(root).unwrap().width(), 100.0);
    assert_close(tree.layout(root).unwrap().height(), 100.0);
    let leaf = tree.absolute_layout(parent).unwrap();
    assert_close(leaf.left, 50.0);
    assert_close(leaf.top, 50.0);
}

#[test]
fn test_wide_tree() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 1000.0).unwrap();
    tree.set_height(root, 10.0).unwrap();
    let children: Vec<NodeId> = (0..1000)
        .map(|_| {
            let child = tree.new_node();
            tree.set_flex_grow(child, 1.0).unwrap();
            tree.append_child(root, child).unwrap();
            child
        })
        .collect();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_close(tree.layout(children[0]).unwrap().width(), 1.0);
    assert_close(tree.layout(children[999]).unwrap().left(), 999.0);
    assert_eq!(tree.node_count(), 1001);
}

#[test]
fn test_rounding_with_fractional_scale() {
    let mut tree = FlexTree::with_config(Config::new().with_point_scale_factor(2.0));
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 10.0).unwrap();
    tree.set_height(root, 10.0).unwrap();
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            let child = tree.new_node();
            tree.set_flex_grow(child, 1.0).unwrap();
            tree.append_child(root, child).unwrap();
            child
        })
        .collect();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let total: f32 = children.iter().map(|&c| tree.layout(c).unwrap().width()).sum();
    assert_close(total, 10.0);
    for &child in &children {
        let width = tree.layout(child).unwrap().width();
        // Half-point grid
        assert_close((width * 2.0).fract(), 0.0);
    }
}

#[test]
fn test_rounded_relayout_is_stable() {
    let mut tree = FlexTree::with_config(Config::new().with_point_scale_factor(3.0));
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 100.3).unwrap();

    let mut nodes = vec![root];
    for grow in [1.0, 2.0, 3.0] {
        let text = tree.new_node();
        tree.set_node_type(text, NodeType::Text).unwrap();
        tree.set_flex_grow(text, grow).unwrap();
        tree.append_child(root, text).unwrap();

        let inner = tree.new_node();
        tree.set_width(inner, 3.33).unwrap();
        tree.set_height(inner, 1.7).unwrap();
        tree.append_child(text, inner).unwrap();
        nodes.extend([text, inner]);
    }

    let geometry = |tree: &FlexTree| -> Vec<(f32, f32, f32, f32, f32, f32)> {
        nodes
            .iter()
            .map(|&n| {
                let l = tree.layout(n).unwrap();
                (l.left(), l.top(), l.right(), l.bottom(), l.width(), l.height())
            })
            .collect()
    };

    tree.calculate_layout(root, Some(333.3), Some(50.0), Direction::Ltr).unwrap();
    let first = geometry(&tree);
    tree.calculate_layout(root, Some(333.3), Some(50.0), Direction::Ltr).unwrap();
    let second = geometry(&tree);
    tree.calculate_layout(root, Some(333.3), Some(50.0), Direction::Ltr).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, geometry(&tree));
}
