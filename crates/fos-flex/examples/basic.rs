//! Example: A toolbar laid out with fos-flex
//!
//! Run with `RUST_LOG=fos_flex=debug` to see the layout pass statistics.

use fos_flex::{Align, Direction, Edge, FlexDirection, FlexTree, Justify, MeasureError, MeasureMode, PrintOptions, Size};
use tracing_subscriber::EnvFilter;

/// Fixed-advance text measurement: 7 points per character, 16 per line
fn text(label: &'static str) -> impl FnMut(f32, MeasureMode, f32, MeasureMode) -> Result<Size, MeasureError> {
    move |width: f32, mode: MeasureMode, _: f32, _: MeasureMode| -> Result<Size, MeasureError> {
        let natural = label.len() as f32 * 7.0;
        let width = match mode {
            MeasureMode::Exactly => width,
            MeasureMode::AtMost => natural.min(width),
            MeasureMode::Undefined => natural,
        };
        let lines = if width > 0.0 { (natural / width).ceil().max(1.0) } else { 1.0 };
        Ok(Size::new(width, lines * 16.0))
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = FlexTree::new();

    let toolbar = tree.new_node();
    tree.set_flex_direction(toolbar, FlexDirection::Row)?;
    tree.set_justify_content(toolbar, Justify::SpaceBetween)?;
    tree.set_align_items(toolbar, Align::Center)?;
    tree.set_padding(toolbar, Edge::Horizontal, 12.0)?;
    tree.set_height(toolbar, 48.0)?;

    let title = tree.new_node();
    tree.set_measure_func(title, Some(Box::new(text("fOS Flex"))))?;
    tree.append_child(toolbar, title)?;

    let spacer = tree.new_node();
    tree.set_flex_grow(spacer, 1.0)?;
    tree.append_child(toolbar, spacer)?;

    for label in ["Back", "Reload"] {
        let button = tree.new_node();
        tree.set_margin(button, Edge::Start, 8.0)?;
        tree.set_measure_func(button, Some(Box::new(text(label))))?;
        tree.append_child(toolbar, button)?;
    }

    tree.calculate_layout(toolbar, Some(320.0), None, Direction::Ltr)?;

    println!("fos-flex v{}", fos_flex::VERSION);
    println!("{}", tree.print_tree(toolbar, PrintOptions::LAYOUT.with_children(true))?);

    let stats = tree.stats();
    println!(
        "{} nodes visited, {} measure calls, {:.0}% cache hits",
        stats.nodes_visited,
        stats.measure_calls,
        stats.hit_rate() * 100.0
    );
    Ok(())
}
