//! Flex lines and flexible lengths

use crate::layout_tree::FlexTree;
use crate::node::NodeId;
use crate::style::{Align, Display, PositionType};
use crate::value::MeasureMode;

use super::axis::{align_item, bound_axis, bound_within_min_max, is_defined};
use super::basis::constrain_max_size_for_mode;
use super::container::Container;

/// One line of in-flow items
#[derive(Debug, Clone, Default)]
pub(super) struct FlexLine {
    /// In-flow children on the line, in order
    pub items: Vec<NodeId>,
    /// Index in the container's children just past the line
    pub end: usize,
    /// Sum of outer hypothetical main sizes, gaps included
    pub size_consumed: f32,
    pub total_grow: f32,
    /// Sum of `-shrink * basis`, never positive
    pub total_shrink_scaled: f32,
    pub remaining_free_space: f32,
    /// Main size used by the line, padding and border included
    pub main_dim: f32,
    pub cross_dim: f32,
    /// Sizes fixed by the first distribution pass
    frozen: Vec<Option<f32>>,
}

impl FlexTree {
    /// Gather the items of the line starting at `start`
    pub(super) fn collect_line(&mut self, ctx: &Container, start: usize, line_index: usize) -> FlexLine {
        let config = self.config;
        let available_main = ctx.available_inner_main();
        let mut line = FlexLine { end: start, ..FlexLine::default() };

        while line.end < ctx.children.len() {
            let child = ctx.children[line.end];
            let node = &mut self[child];
            let style = node.style;
            if style.display == Display::None || style.position_type == PositionType::Absolute {
                line.end += 1;
                continue;
            }

            let direction = style.direction.resolve(ctx.direction);
            let margin = style.margin_for_axis(ctx.main_axis, direction, ctx.inner_width());
            let gap = if line.items.is_empty() { 0.0 } else { ctx.main_gap };
            let basis = node.layout.computed_flex_basis.unwrap_or(0.0);
            let bounded = bound_within_min_max(&style, ctx.is_main_row, basis, ctx.inner_main());

            if ctx.wrap && !line.items.is_empty() && line.size_consumed + bounded + margin + gap > available_main {
                break;
            }

            node.layout.line_index = line_index;
            line.size_consumed += bounded + margin + gap;
            if style.is_flexible(&config) {
                line.total_grow += style.resolved_flex_grow();
                line.total_shrink_scaled -= style.resolved_flex_shrink(&config) * basis;
            }
            line.items.push(child);
            line.end += 1;
        }

        line.frozen = vec![None; line.items.len()];
        line
    }

    /// Distribute the line's free space and lay out every item at its
    /// final main size
    pub(super) fn resolve_flexible_length(&mut self, ctx: &Container, line: &mut FlexLine, basis_overflows: bool) {
        let original = line.remaining_free_space;
        self.freeze_violations(ctx, line);
        let distributed = self.distribute_free_space(ctx, line, basis_overflows);
        line.remaining_free_space = original - distributed;
    }

    fn bounded_basis(&self, ctx: &Container, child: NodeId) -> f32 {
        let node = &self[child];
        let basis = node.layout.computed_flex_basis.unwrap_or(0.0);
        bound_within_min_max(&node.style, ctx.is_main_row, basis, ctx.inner_main())
    }

    /// First pass: fix the size of items whose flexed size hits min/max
    fn freeze_violations(&mut self, ctx: &Container, line: &mut FlexLine) {
        let config = self.config;
        let remaining = line.remaining_free_space;
        let mut delta = 0.0;

        for (i, &child) in line.items.iter().enumerate() {
            let basis = self.bounded_basis(ctx, child);
            let style = &self[child].style;
            let direction = style.direction.resolve(ctx.direction);

            if remaining < 0.0 {
                let factor = -style.resolved_flex_shrink(&config) * basis;
                if is_defined(factor) && factor != 0.0 {
                    let base = basis + remaining / line.total_shrink_scaled * factor;
                    let bound =
                        bound_axis(style, direction, ctx.is_main_row, base, ctx.inner_main(), ctx.inner_width());
                    if is_defined(base) && is_defined(bound) && base != bound {
                        delta += bound - basis;
                        line.total_shrink_scaled -= factor;
                        line.frozen[i] = Some(bound);
                    }
                }
            } else if is_defined(remaining) && remaining > 0.0 {
                let grow = style.resolved_flex_grow();
                if is_defined(grow) && grow != 0.0 {
                    let base = basis + remaining / line.total_grow * grow;
                    let bound =
                        bound_axis(style, direction, ctx.is_main_row, base, ctx.inner_main(), ctx.inner_width());
                    if is_defined(base) && is_defined(bound) && base != bound {
                        delta += bound - basis;
                        line.total_grow -= grow;
                        line.frozen[i] = Some(bound);
                    }
                }
            }
        }

        line.remaining_free_space -= delta;
    }

    /// Second pass: size every item and lay it out. Returns the space
    /// handed out.
    fn distribute_free_space(&mut self, ctx: &Container, line: &mut FlexLine, basis_overflows: bool) -> f32 {
        let config = self.config;
        let remaining = line.remaining_free_space;
        let mut delta = 0.0;
        let main_row = ctx.is_main_row;

        for (i, &child) in line.items.iter().enumerate() {
            let basis = self.bounded_basis(ctx, child);
            let style = self[child].style;
            let direction = style.direction.resolve(ctx.direction);

            let main_size = match line.frozen[i] {
                Some(size) => size,
                None if remaining < 0.0 => {
                    let factor = -style.resolved_flex_shrink(&config) * basis;
                    if factor != 0.0 {
                        let size = if line.total_shrink_scaled == 0.0 {
                            basis + factor
                        } else {
                            basis + remaining / line.total_shrink_scaled * factor
                        };
                        bound_axis(&style, direction, main_row, size, ctx.inner_main(), ctx.inner_width())
                    } else {
                        basis
                    }
                }
                None if is_defined(remaining) && remaining > 0.0 => {
                    let grow = style.resolved_flex_grow();
                    if is_defined(grow) && grow != 0.0 {
                        let size = basis + remaining / line.total_grow * grow;
                        bound_axis(&style, direction, main_row, size, ctx.inner_main(), ctx.inner_width())
                    } else {
                        basis
                    }
                }
                None => basis,
            };
            delta += main_size - basis;

            let margin_main = style.margin_for_axis(ctx.main_axis, direction, ctx.inner_width());
            let margin_cross = style.margin_for_axis(ctx.cross_axis, direction, ctx.inner_width());
            let mut child_main = main_size + margin_main;
            let mut main_mode = MeasureMode::Exactly;

            let align = align_item(&ctx.style, &style);
            let auto_cross_margin = style.leading_margin_is_auto(ctx.cross_axis, direction)
                || style.trailing_margin_is_auto(ctx.cross_axis, direction);
            let cross_defined = style.is_dimension_defined(!main_row, ctx.inner_cross());
            let available_cross = ctx.available_inner_cross();

            let (mut child_cross, mut cross_mode) = if let Some(ratio) = style.aspect_ratio {
                let cross = if main_row { main_size / ratio } else { main_size * ratio };
                (cross + margin_cross, MeasureMode::Exactly)
            } else if is_defined(available_cross)
                && !cross_defined
                && ctx.cross_mode() == MeasureMode::Exactly
                && !(ctx.wrap && basis_overflows)
                && align == Align::Stretch
                && !auto_cross_margin
            {
                (available_cross, MeasureMode::Exactly)
            } else if !cross_defined {
                let mode = if is_defined(available_cross) { MeasureMode::AtMost } else { MeasureMode::Undefined };
                (available_cross, mode)
            } else {
                let cross = style.resolved_size(!main_row, ctx.inner_cross()).unwrap_or(0.0);
                (cross + margin_cross, MeasureMode::Exactly)
            };

            constrain_max_size_for_mode(
                &style,
                direction,
                main_row,
                ctx.inner_main(),
                ctx.inner_width(),
                &mut main_mode,
                &mut child_main,
            );
            constrain_max_size_for_mode(
                &style,
                direction,
                !main_row,
                ctx.inner_cross(),
                ctx.inner_width(),
                &mut cross_mode,
                &mut child_cross,
            );

            let requires_stretch = !cross_defined && align == Align::Stretch && !auto_cross_margin;
            let request = if main_row {
                ctx.child_request(child_main, main_mode, child_cross, cross_mode, ctx.perform_layout && !requires_stretch)
            } else {
                ctx.child_request(child_cross, cross_mode, child_main, main_mode, ctx.perform_layout && !requires_stretch)
            };
            self.layout_node(child, &request);

            if self[child].layout.had_overflow {
                self[ctx.id].layout.had_overflow = true;
            }
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use crate::layout_tree::FlexTree;
    use crate::style::{FlexDirection, Wrap};
    use crate::value::Direction;

    fn row(tree: &mut FlexTree, width: f32, height: f32) -> crate::NodeId {
        let root = tree.new_node();
        tree.set_flex_direction(root, FlexDirection::Row).unwrap();
        tree.set_width(root, width).unwrap();
        tree.set_height(root, height).unwrap();
        root
    }

    fn item(tree: &mut FlexTree, parent: crate::NodeId, width: f32) -> crate::NodeId {
        let child = tree.new_node();
        tree.set_width(child, width).unwrap();
        tree.append_child(parent, child).unwrap();
        child
    }

    #[test]
    fn test_wrap_breaks_lines() {
        let mut tree = FlexTree::new();
        let root = row(&mut tree, 100.0, 100.0);
        tree.set_flex_wrap(root, Wrap::Wrap).unwrap();
        let items: Vec<_> = (0..3).map(|_| item(&mut tree, root, 40.0)).collect();
        for &child in &items {
            tree.set_height(child, 10.0).unwrap();
        }
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

        assert_eq!(tree.layout(items[1]).unwrap().left(), 40.0);
        assert_eq!(tree.layout(items[2]).unwrap().left(), 0.0);
        assert_eq!(tree.layout(items[2]).unwrap().top(), 10.0);
    }

    #[test]
    fn test_max_constraint_freezes_item() {
        let mut tree = FlexTree::new();
        let root = row(&mut tree, 100.0, 20.0);
        let a = tree.new_node();
        let b = tree.new_node();
        for child in [a, b] {
            tree.set_flex_grow(child, 1.0).unwrap();
            tree.append_child(root, child).unwrap();
        }
        tree.set_max_width(a, 20.0).unwrap();
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

        assert_eq!(tree.layout(a).unwrap().width(), 20.0);
        assert_eq!(tree.layout(b).unwrap().width(), 80.0);
    }

    #[test]
    fn test_shrink_by_scaled_basis() {
        let mut tree = FlexTree::new();
        let root = row(&mut tree, 100.0, 20.0);
        let a = item(&mut tree, root, 100.0);
        let b = item(&mut tree, root, 50.0);
        tree.set_flex_shrink(a, 1.0).unwrap();
        tree.set_flex_shrink(b, 1.0).unwrap();
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

        // 50 overflow, split 2:1 by basis
        let wa = tree.layout(a).unwrap().width();
        let wb = tree.layout(b).unwrap().width();
        assert!((wa - 66.666).abs() < 0.01, "{wa}");
        assert!((wb - 33.333).abs() < 0.01, "{wb}");
    }

    #[test]
    fn test_fractional_grow_fills_line() {
        let mut tree = FlexTree::new();
        let root = row(&mut tree, 100.0, 20.0);
        let a = item(&mut tree, root, 10.0);
        let b = item(&mut tree, root, 30.0);
        tree.set_flex_grow(a, 0.1).unwrap();
        tree.set_flex_grow(b, 0.3).unwrap();
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

        // 60 free, split 1:3
        let wa = tree.layout(a).unwrap().width();
        let wb = tree.layout(b).unwrap().width();
        assert!((wa - 25.0).abs() < 0.01, "{wa}");
        assert!((wb - 75.0).abs() < 0.01, "{wb}");
    }

    #[test]
    fn test_main_gap_between_items() {
        let mut tree = FlexTree::new();
        let root = row(&mut tree, 100.0, 20.0);
        tree.set_gap(root, crate::Gutter::Column, 10.0).unwrap();
        let a = item(&mut tree, root, 20.0);
        let b = item(&mut tree, root, 20.0);
        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

        assert_eq!(tree.layout(a).unwrap().left(), 0.0);
        assert_eq!(tree.layout(b).unwrap().left(), 30.0);
    }
}
