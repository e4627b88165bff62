//! Field-of-view and aspect-ratio conversions.
//!
//! "Bounded" values are measured inside the letterbox bars (the content region), "full" values
//! across the whole physical viewport. Bars only ever add to the visible region, so a full
//! value is never smaller than its bounded counterpart.

use crate::snapshot::CameraSnapshot;

/// Rescales a field of view (degrees) across a change of aspect ratio by `ratio`.
///
/// Pinhole identity `2·atan(tan(angle/2)·ratio)`.
pub fn convert_fov(angle_degrees: f32, ratio: f32) -> f32 {
    2.0 * ((angle_degrees.to_radians() * 0.5).tan() * ratio)
        .atan()
        .to_degrees()
}

impl CameraSnapshot {
    /// Pixel aspect ratio of the physical viewport.
    pub fn viewport_aspect_ratio(&self) -> f32 {
        self.viewport_width_px as f32 / self.viewport_height_px as f32
    }

    /// Explicit aspect ratio when set, otherwise the viewport's.
    pub fn current_aspect_ratio(&self) -> f32 {
        if self.explicit_aspect_ratio == 0.0 {
            self.viewport_aspect_ratio()
        } else {
            self.explicit_aspect_ratio
        }
    }

    /// `> 1` means bars above and below, `< 1` bars left and right, `1` no bars.
    pub fn aspect_ratio_ratio(&self) -> f32 {
        self.current_aspect_ratio() / self.viewport_aspect_ratio()
    }

    pub fn fov_bounded_vertical(&self) -> f32 {
        if self.fov_is_height {
            self.fov_degrees
        } else {
            convert_fov(self.fov_degrees, 1.0 / self.current_aspect_ratio())
        }
    }

    pub fn fov_bounded_horizontal(&self) -> f32 {
        if self.fov_is_height {
            convert_fov(self.fov_degrees, self.current_aspect_ratio())
        } else {
            self.fov_degrees
        }
    }

    pub fn fov_full_vertical(&self) -> f32 {
        convert_fov(self.fov_bounded_vertical(), self.aspect_ratio_ratio().max(1.0))
    }

    pub fn fov_full_horizontal(&self) -> f32 {
        convert_fov(
            self.fov_bounded_horizontal(),
            (1.0 / self.aspect_ratio_ratio()).max(1.0),
        )
    }

    // Orthographic analogues. `ortho_height` is already the full height.

    pub const fn full_height(&self) -> f32 { self.ortho_height }

    pub fn full_width(&self) -> f32 { self.ortho_height * self.viewport_aspect_ratio() }

    pub fn height(&self) -> f32 { self.full_height() / self.aspect_ratio_ratio().max(1.0) }

    pub fn width(&self) -> f32 { self.full_width() / (1.0 / self.aspect_ratio_ratio()).max(1.0) }
}
