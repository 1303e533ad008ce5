//! fOS Flex
//!
//! Flexbox layout engine. Hosts build a [`FlexTree`] of nodes, set styles
//! through the typed setters, attach [`Measure`] callbacks to content
//! leaves, and call [`FlexTree::calculate_layout`] to get positions and
//! sizes back.
//!
//! ```
//! use fos_flex::{Direction, FlexDirection, FlexTree};
//!
//! let mut tree = FlexTree::new();
//! let root = tree.new_node();
//! tree.set_flex_direction(root, FlexDirection::Row).unwrap();
//! tree.set_width(root, 200.0).unwrap();
//! tree.set_height(root, 100.0).unwrap();
//!
//! let child = tree.new_node();
//! tree.set_flex_grow(child, 1.0).unwrap();
//! tree.append_child(root, child).unwrap();
//!
//! tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
//! assert_eq!(tree.layout(child).unwrap().width(), 200.0);
//! ```

mod accessors;
mod box_model;
mod config;
mod error;
mod flex;
mod invalidation;
mod layout_cache;
mod layout_tree;
mod measure;
mod node;
mod print;
mod rounding;
mod style;
mod value;

pub use box_model::{AbsoluteLayout, EdgeSizes, Layout, Size};
pub use config::Config;
pub use error::{FlexError, FlexResult, MeasureError};
pub use invalidation::DirtyReason;
pub use layout_cache::{
    CachedMeasurement, Constraints, LayoutCache, LayoutStats, MAX_CACHED_MEASUREMENTS, Relaxation,
};
pub use layout_tree::FlexTree;
pub use measure::{Measure, NodeType};
pub use node::NodeId;
pub use print::PrintOptions;
pub use style::{
    Align, DimensionProperty, Display, EdgeProperty, Edges, FactorProperty, FlexDirection, Gutter, Justify,
    Overflow, PositionType, Style, StyleProperty, Wrap,
};
pub use value::{Direction, Edge, MeasureMode, PhysicalEdge, StyleValue, Unit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
