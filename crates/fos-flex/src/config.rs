//! Engine Configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings shared by every node of a [`FlexTree`](crate::FlexTree)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Physical pixels per layout point. Zero disables rounding.
    pub point_scale_factor: f32,
    /// Use CSS defaults: row direction, shrinkable items, stretched lines
    pub use_web_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_scale_factor: 0.0,
            use_web_defaults: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round layouts to a grid of `1 / factor` points
    pub fn with_point_scale_factor(mut self, factor: f32) -> Self {
        self.point_scale_factor = if factor.is_finite() && factor > 0.0 { factor } else { 0.0 };
        self
    }

    pub fn with_web_defaults(mut self, enabled: bool) -> Self {
        self.use_web_defaults = enabled;
        self
    }

    pub(crate) fn default_flex_shrink(&self) -> f32 {
        if self.use_web_defaults { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::new().with_point_scale_factor(2.0).with_web_defaults(true);
        assert_eq!(config.point_scale_factor, 2.0);
        assert!(config.use_web_defaults);
        assert_eq!(config.default_flex_shrink(), 1.0);
    }

    #[test]
    fn test_invalid_scale_disables_rounding() {
        assert_eq!(Config::new().with_point_scale_factor(-1.0).point_scale_factor, 0.0);
        assert_eq!(Config::new().with_point_scale_factor(f32::NAN).point_scale_factor, 0.0);
    }
}
