//! Measurement Cache
//!
//! Every node remembers the results of recent layout requests. A request is
//! keyed by the available space and measure mode of both axes. Requests
//! that position children (perform layout) use a single slot; pure
//! measurements go to a small ring.
//!
//! Leaves with a measure callback additionally accept compatible
//! constraints: a result measured under a looser constraint can answer a
//! tighter one as long as the measured size still fits.

use crate::box_model::Size;
use crate::rounding::round_value_to_pixel_grid;
use crate::value::{inexact_eq, MeasureMode};

/// Number of measurement slots per node
pub const MAX_CACHED_MEASUREMENTS: usize = 8;

/// Available space and mode for both axes.
///
/// An axis with [`MeasureMode::Undefined`] carries `f32::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub available_width: f32,
    pub width_mode: MeasureMode,
    pub available_height: f32,
    pub height_mode: MeasureMode,
}

impl Constraints {
    pub fn new(
        available_width: f32,
        width_mode: MeasureMode,
        available_height: f32,
        height_mode: MeasureMode,
    ) -> Self {
        Self { available_width, width_mode, available_height, height_mode }
    }

    pub fn exact(width: f32, height: f32) -> Self {
        Self::new(width, MeasureMode::Exactly, height, MeasureMode::Exactly)
    }

    /// Pair every non-finite size with `Undefined` and vice versa
    pub(crate) fn normalized(self) -> Self {
        let axis = |size: f32, mode: MeasureMode| {
            if mode == MeasureMode::Undefined || !size.is_finite() {
                (f32::INFINITY, MeasureMode::Undefined)
            } else {
                (size, mode)
            }
        };
        let (available_width, width_mode) = axis(self.available_width, self.width_mode);
        let (available_height, height_mode) = axis(self.available_height, self.height_mode);
        Self { available_width, width_mode, available_height, height_mode }
    }

    fn matches(&self, other: &Constraints) -> bool {
        self.width_mode == other.width_mode
            && self.height_mode == other.height_mode
            && inexact_eq(self.available_width, other.available_width)
            && inexact_eq(self.available_height, other.available_height)
    }
}

/// One cached result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedMeasurement {
    pub constraints: Constraints,
    pub computed: Size,
}

/// Inputs for the compatible-constraint rules of measured leaves
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Relaxation {
    /// Margins of the node along the row axis
    pub margin_row: f32,
    /// Margins of the node along the column axis
    pub margin_column: f32,
    /// Grid used to compare sizes; zero compares raw values
    pub point_scale_factor: f32,
}

/// Per-node cache of layout and measurement results
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    layout: Option<CachedMeasurement>,
    measurements: [Option<CachedMeasurement>; MAX_CACHED_MEASUREMENTS],
    next_measurement: usize,
    /// Layout pass that last visited the node
    pub(crate) generation: u32,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a result for `constraints`.
    ///
    /// Without a relaxation, perform-layout requests only read the layout
    /// slot and measurements only read the ring, both by exact key. With a
    /// relaxation every slot is eligible under the compatible rules.
    pub fn query(
        &self,
        perform_layout: bool,
        constraints: &Constraints,
        relaxation: Option<&Relaxation>,
    ) -> Option<Size> {
        if let Some(relaxation) = relaxation {
            return self
                .layout
                .iter()
                .chain(self.measurements.iter().flatten())
                .find(|entry| can_use_cached_measurement(constraints, entry, relaxation))
                .map(|entry| entry.computed);
        }

        if perform_layout {
            self.layout
                .filter(|entry| entry.constraints.matches(constraints))
                .map(|entry| entry.computed)
        } else {
            self.measurements
                .iter()
                .flatten()
                .find(|entry| entry.constraints.matches(constraints))
                .map(|entry| entry.computed)
        }
    }

    /// Record a freshly computed result
    pub fn store(&mut self, perform_layout: bool, entry: CachedMeasurement) {
        if perform_layout {
            self.layout = Some(entry);
        } else {
            self.measurements[self.next_measurement] = Some(entry);
            self.next_measurement = (self.next_measurement + 1) % MAX_CACHED_MEASUREMENTS;
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.layout = None;
        self.measurements = [None; MAX_CACHED_MEASUREMENTS];
        self.next_measurement = 0;
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.layout.iter().count() + self.measurements.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn size_is_exact_and_matches_old_measured_size(mode: MeasureMode, size: f32, last_computed: f32) -> bool {
    mode == MeasureMode::Exactly && inexact_eq(size, last_computed)
}

fn old_size_is_unspecified_and_still_fits(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_computed: f32,
) -> bool {
    mode == MeasureMode::AtMost
        && last_mode == MeasureMode::Undefined
        && (size >= last_computed || inexact_eq(size, last_computed))
}

fn new_size_is_stricter_and_still_valid(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_size: f32,
    last_computed: f32,
) -> bool {
    last_mode == MeasureMode::AtMost
        && mode == MeasureMode::AtMost
        && last_size.is_finite()
        && size.is_finite()
        && last_size > size
        && (last_computed <= size || inexact_eq(size, last_computed))
}

fn axis_is_compatible(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_size: f32,
    last_computed: f32,
    margin: f32,
) -> bool {
    (last_mode == mode && inexact_eq(last_size, size))
        || size_is_exact_and_matches_old_measured_size(mode, size - margin, last_computed)
        || old_size_is_unspecified_and_still_fits(mode, size - margin, last_mode, last_computed)
        || new_size_is_stricter_and_still_valid(mode, size - margin, last_mode, last_size, last_computed)
}

/// Whether a previous measurement answers a new request
pub(crate) fn can_use_cached_measurement(
    constraints: &Constraints,
    entry: &CachedMeasurement,
    relaxation: &Relaxation,
) -> bool {
    let last = &entry.constraints;
    if entry.computed.width < 0.0 || entry.computed.height < 0.0 {
        return false;
    }

    let scale = relaxation.point_scale_factor;
    let snap = |value: f32| {
        if scale != 0.0 && value.is_finite() {
            round_value_to_pixel_grid(value, scale, false, false)
        } else {
            value
        }
    };

    let width_ok = axis_is_compatible(
        constraints.width_mode,
        snap(constraints.available_width),
        last.width_mode,
        snap(last.available_width),
        entry.computed.width,
        relaxation.margin_row,
    );
    let height_ok = axis_is_compatible(
        constraints.height_mode,
        snap(constraints.available_height),
        last.height_mode,
        snap(last.available_height),
        entry.computed.height,
        relaxation.margin_column,
    );

    width_ok && height_ok
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters for one `calculate_layout` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub nodes_visited: u64,
    pub layouts_computed: u64,
    pub measurements_computed: u64,
    pub cache_hits: u64,
    pub measure_calls: u64,
    pub measure_failures: u64,
}

impl LayoutStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.layouts_computed + self.measurements_computed;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
