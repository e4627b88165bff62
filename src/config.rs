//! Defaults for framing requests.

use bevy::prelude::*;

use crate::fit::DEFAULT_MIN_EXTENT;
use crate::fit::DEFAULT_PADDING;
use crate::fit::FitOptions;

/// Configuration for framing behavior, used where a request leaves a value unset.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct FramingConfig {
    /// Percentage of the frame left blank on each side, in `[0, 50)`.
    pub padding:                f32,
    /// Fit into the whole viewport instead of the region inside the letterbox bars.
    pub include_letterbox_bars: bool,
    /// Minimum fitted span in world units along each screen axis.
    pub min_extent:             f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            padding:                DEFAULT_PADDING,
            include_letterbox_bars: false,
            min_extent:             DEFAULT_MIN_EXTENT,
        }
    }
}

impl FramingConfig {
    /// Fit options with per-request overrides applied on top of this configuration.
    pub fn fit_options(&self, padding: Option<f32>, include_letterbox_bars: Option<bool>) -> FitOptions {
        FitOptions::new(
            padding.unwrap_or(self.padding),
            include_letterbox_bars.unwrap_or(self.include_letterbox_bars),
        )
        .with_min_extent(self.min_extent)
    }
}
