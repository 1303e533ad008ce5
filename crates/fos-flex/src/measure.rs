//! Measure Callbacks
//!
//! Leaf nodes whose size depends on content (text, images) supply a
//! [`Measure`] implementation. The engine calls it with the inner available
//! space of the node and the mode of each axis.

use crate::box_model::Size;
use crate::error::MeasureError;
use crate::value::MeasureMode;

/// Content measurement for a leaf node.
///
/// An unconstrained axis is passed as `f32::INFINITY` with
/// [`MeasureMode::Undefined`].
pub trait Measure {
    fn measure(
        &mut self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Result<Size, MeasureError>;
}

impl<F> Measure for F
where
    F: FnMut(f32, MeasureMode, f32, MeasureMode) -> Result<Size, MeasureError>,
{
    fn measure(
        &mut self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Result<Size, MeasureError> {
        self(width, width_mode, height, height_mode)
    }
}

/// Kind of node, used by pixel rounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeType {
    #[default]
    Default,
    /// Text rounds its size up so glyphs are never clipped
    Text,
}
