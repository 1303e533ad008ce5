//! Tree mutation tests for fos-flex
//!
//! Structure errors, dirty propagation, cache reuse and incremental
//! relayout.

use std::cell::Cell;
use std::rc::Rc;

use fos_flex::{
    Align, Direction, FlexDirection, FlexError, FlexTree, MeasureError, MeasureMode, NodeId, PrintOptions, Size,
};

fn leaf_measure(calls: Rc<Cell<u32>>) -> Box<dyn fos_flex::Measure> {
    Box::new(move |_: f32, _: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
        calls.set(calls.get() + 1);
        Ok(Size::new(10.0, 10.0))
    })
}

/// Row root with two fixed-size children
fn sample(tree: &mut FlexTree) -> (NodeId, NodeId, NodeId) {
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row).unwrap();
    tree.set_width(root, 100.0).unwrap();
    tree.set_height(root, 40.0).unwrap();
    let a = tree.new_node();
    let b = tree.new_node();
    for child in [a, b] {
        tree.set_width(child, 20.0).unwrap();
        tree.append_child(root, child).unwrap();
    }
    (root, a, b)
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_insert_and_query_children() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    let c = tree.new_node();
    tree.insert_child(root, c, 1).unwrap();

    assert_eq!(tree.children(root).unwrap(), &[a, c, b]);
    assert_eq!(tree.child(root, 1).unwrap(), c);
    assert_eq!(tree.parent(c).unwrap(), Some(root));
    assert_eq!(tree.child_count(root).unwrap(), 3);
}

#[test]
fn test_insert_errors() {
    let mut tree = FlexTree::new();
    let (root, a, _) = sample(&mut tree);
    let other = tree.new_node();

    assert_eq!(tree.append_child(other, a), Err(FlexError::AlreadyHasParent { child: a, parent: root }));
    assert_eq!(
        tree.insert_child(root, other, 5),
        Err(FlexError::ChildIndexOutOfRange { index: 5, count: 2 })
    );
    assert_eq!(tree.append_child(a, root), Err(FlexError::WouldCreateCycle { parent: a, child: root }));

    let lone = tree.new_node();
    assert_eq!(tree.append_child(lone, lone), Err(FlexError::WouldCreateCycle { parent: lone, child: lone }));
}

#[test]
fn test_cycle_rejected() {
    let mut tree = FlexTree::new();
    let top = tree.new_node();
    let middle = tree.new_node();
    let bottom = tree.new_node();
    tree.append_child(top, middle).unwrap();
    tree.append_child(middle, bottom).unwrap();

    assert_eq!(
        tree.append_child(bottom, top),
        Err(FlexError::WouldCreateCycle { parent: bottom, child: top })
    );
    // Failed insertions leave the tree untouched
    assert_eq!(tree.child_count(bottom).unwrap(), 0);
    assert_eq!(tree.parent(top).unwrap(), None);
}

#[test]
fn test_measure_and_children_are_exclusive() {
    let mut tree = FlexTree::new();
    let leaf = tree.new_node();
    tree.set_measure_func(leaf, Some(leaf_measure(Rc::new(Cell::new(0))))).unwrap();
    let child = tree.new_node();
    assert_eq!(tree.append_child(leaf, child), Err(FlexError::MeasuredNodeCannotHaveChildren(leaf)));

    let parent = tree.new_node();
    tree.append_child(parent, child).unwrap();
    assert!(matches!(
        tree.set_measure_func(parent, Some(leaf_measure(Rc::new(Cell::new(0))))),
        Err(FlexError::ChildrenPreventMeasureFunc(_))
    ));
    // Clearing is always allowed
    tree.set_measure_func(parent, None).unwrap();
}

#[test]
fn test_remove_child_errors() {
    let mut tree = FlexTree::new();
    let (root, a, _) = sample(&mut tree);
    let stranger = tree.new_node();

    assert_eq!(tree.remove_child(root, stranger), Err(FlexError::NotAChild { parent: root, child: stranger }));
    assert_eq!(
        tree.remove_child_at_index(root, 7),
        Err(FlexError::ChildIndexOutOfRange { index: 7, count: 2 })
    );
    assert_eq!(tree.remove_child_at_index(root, 0).unwrap(), a);
    assert_eq!(tree.parent(a).unwrap(), None);
}

#[test]
fn test_free_reuses_slot_with_new_generation() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    tree.free(a).unwrap();

    assert!(!tree.contains(a));
    assert_eq!(tree.children(root).unwrap(), &[b]);
    assert_eq!(tree.layout(a).unwrap_err(), FlexError::InvalidNode(a));

    let reused = tree.new_node();
    assert_eq!(reused.index(), a.index());
    assert_ne!(reused.generation(), a.generation());
    assert!(tree.set_width(a, 5.0).is_err());
    assert!(tree.set_width(reused, 5.0).is_ok());
}

#[test]
fn test_free_subtree() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    assert_eq!(tree.node_count(), 3);
    tree.free(root).unwrap();

    assert_eq!(tree.node_count(), 0);
    for node in [root, a, b] {
        assert!(!tree.contains(node));
    }
}

#[test]
fn test_remove_all_children() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    tree.remove_all_children(root).unwrap();

    assert_eq!(tree.child_count(root).unwrap(), 0);
    assert_eq!(tree.parent(a).unwrap(), None);
    assert_eq!(tree.parent(b).unwrap(), None);
    assert!(tree.is_dirty(root).unwrap());
}

// ============================================================================
// DIRTY PROPAGATION
// ============================================================================

#[test]
fn test_layout_cleans_tree() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    assert!(tree.is_dirty(root).unwrap());
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    for node in [root, a, b] {
        assert!(!tree.is_dirty(node).unwrap());
    }
}

#[test]
fn test_dirty_reaches_ancestors_not_siblings() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    let grandchild = tree.new_node();
    tree.append_child(a, grandchild).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    tree.set_height(grandchild, 5.0).unwrap();
    assert!(tree.is_dirty(grandchild).unwrap());
    assert!(tree.is_dirty(a).unwrap());
    assert!(tree.is_dirty(root).unwrap());
    assert!(!tree.is_dirty(b).unwrap());
}

#[test]
fn test_style_replacement_dirties_only_on_change() {
    let mut tree = FlexTree::new();
    let (root, a, _) = sample(&mut tree);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let style = *tree.style(a).unwrap();
    tree.set_style(a, style).unwrap();
    assert!(!tree.is_dirty(a).unwrap());

    tree.copy_style(a, root).unwrap();
    assert!(tree.is_dirty(a).unwrap());
    assert_eq!(tree.style(a).unwrap(), tree.style(root).unwrap());
}

// ============================================================================
// INCREMENTAL LAYOUT
// ============================================================================

#[test]
fn test_relayout_is_idempotent() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    let before: Vec<_> = [root, a, b].iter().map(|&n| *tree.layout(n).unwrap()).collect();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    let after: Vec<_> = [root, a, b].iter().map(|&n| *tree.layout(n).unwrap()).collect();
    assert_eq!(before, after);
    assert_eq!(tree.stats().layouts_computed, 0);
}

#[test]
fn test_incremental_matches_fresh_layout() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    tree.set_width(a, 50.0).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let mut fresh = FlexTree::new();
    let (f_root, f_a, f_b) = sample(&mut fresh);
    fresh.set_width(f_a, 50.0).unwrap();
    fresh.calculate_layout(f_root, None, None, Direction::Ltr).unwrap();

    let geometry = |tree: &FlexTree, node: NodeId| {
        let layout = tree.layout(node).unwrap();
        (layout.left(), layout.top(), layout.width(), layout.height())
    };
    for (node, fresh_node) in [(root, f_root), (a, f_a), (b, f_b)] {
        assert_eq!(geometry(&tree, node), geometry(&fresh, fresh_node));
    }
    assert_eq!(tree.layout(b).unwrap().left(), 50.0);
}

#[test]
fn test_sibling_measure_not_repeated() {
    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, 100.0).unwrap();
    tree.set_align_items(root, Align::FlexStart).unwrap();
    let first_calls = Rc::new(Cell::new(0));
    let second_calls = Rc::new(Cell::new(0));
    let first = tree.new_node();
    let second = tree.new_node();
    tree.set_measure_func(first, Some(leaf_measure(first_calls.clone()))).unwrap();
    tree.set_measure_func(second, Some(leaf_measure(second_calls.clone()))).unwrap();
    tree.append_child(root, first).unwrap();
    tree.append_child(root, second).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    let second_before = second_calls.get();

    tree.mark_dirty(first).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
    assert!(first_calls.get() > 0);
    assert_eq!(second_calls.get(), second_before);
}

#[test]
fn test_moved_child_lays_out_in_new_parent() {
    let mut tree = FlexTree::new();
    let (root, a, b) = sample(&mut tree);
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    tree.remove_child(root, b).unwrap();
    tree.insert_child(root, b, 0).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(b).unwrap().left(), 0.0);
    assert_eq!(tree.layout(a).unwrap().left(), 20.0);
}

#[test]
fn test_print_after_mutation() {
    let mut tree = FlexTree::new();
    let (root, _, b) = sample(&mut tree);
    tree.remove_child(root, b).unwrap();
    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let text = tree.print_tree(root, PrintOptions::ALL).unwrap();
    assert_eq!(text.matches("<div").count(), 2);
    assert!(text.contains("flex-direction: row;"));
    assert!(text.contains("width: 20px;"));
}

#[cfg(feature = "serde")]
#[test]
fn test_style_and_config_serde() {
    use fos_flex::{Config, Edge, StyleProperty, StyleValue};

    let mut tree = FlexTree::new();
    let node = tree.new_node();
    tree.set_width_percent(node, 40.0).unwrap();
    tree.set_margin(node, Edge::Horizontal, 3.0).unwrap();
    tree.set_flex_grow(node, 2.0).unwrap();
    let style = *tree.style(node).unwrap();

    let json = serde_json::to_string(&style).unwrap();
    let back: fos_flex::Style = serde_json::from_str(&json).unwrap();
    assert_eq!(back, style);

    let property = StyleProperty::Dimension(fos_flex::DimensionProperty::Height, StyleValue::points(12.0));
    let json = serde_json::to_string(&property).unwrap();
    assert_eq!(serde_json::from_str::<StyleProperty>(&json).unwrap(), property);

    let config = Config::new().with_point_scale_factor(2.0);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
}
