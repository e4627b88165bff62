//! Extension trait for writing a framing through `PanOrbitCamera`.
//!
//! A `PanOrbitCamera` owns its camera's transform (and, for orthographic projection, its
//! scale), so a fitted eye has to be expressed as a focus and radius instead.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::fit::Framing;
use crate::snapshot::CameraSnapshot;
use crate::snapshot::unscaled_ortho_height;

/// Smallest orbit radius written for a perspective framing.
const MIN_RADIUS: f32 = 0.05;

/// Extension trait for `PanOrbitCamera` providing framing write-back.
pub trait PanOrbitCameraExt {
    /// Sets the target focus/radius so the camera ends up at the fitted eye with the fitted
    /// extent. `fitted` is the snapshot after fitting, `projection` the camera's current one.
    fn apply_framing(&mut self, fitted: &CameraSnapshot, framing: &Framing, projection: &Projection);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn apply_framing(&mut self, fitted: &CameraSnapshot, framing: &Framing, projection: &Projection) {
        match projection {
            Projection::Orthographic(ortho) => {
                // PanOrbitCamera keeps an orthographic camera at `(near + far) / 2` from the
                // focus and maps the radius onto `scale`.
                let distance = (ortho.near + ortho.far) * 0.5;
                self.target_focus = framing.eye + fitted.forward_axis * distance;

                let viewport = UVec2::new(fitted.viewport_width_px, fitted.viewport_height_px);
                let base_height = unscaled_ortho_height(ortho, viewport);
                if base_height > f32::EPSILON {
                    self.target_radius = fitted.ortho_height / base_height;
                } else {
                    warn!("PanOrbitCameraExt: orthographic scaling mode has no height, radius unchanged");
                }
            },
            _ => {
                let radius = framing.focus_distance.max(MIN_RADIUS);
                self.target_focus = framing.eye + fitted.forward_axis * radius;
                self.target_radius = radius;
            },
        }
        self.force_update = true;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::camera::CameraProjection;
    use bevy::camera::ScalingMode;

    use super::*;
    use crate::fit::Extent;
    use crate::snapshot::ProjectionMode;

    fn framing(eye: Vec3, focus_distance: f32) -> Framing {
        Framing {
            eye,
            extent: Extent::Perspective { fov_degrees: 45.0 },
            aspect_ratio: 1.0,
            focus_distance,
            extreme_points: [Vec3::ZERO; 4],
        }
    }

    #[test]
    fn perspective_framing_orbits_fitted_eye() {
        let fitted = CameraSnapshot::looking(Vec3::new(0.0, 0.0, 8.0), Vec3::NEG_Z, Vec3::Y);
        let mut camera = PanOrbitCamera::default();
        camera.apply_framing(
            &fitted,
            &framing(fitted.eye, 8.0),
            &Projection::Perspective(PerspectiveProjection::default()),
        );

        assert_relative_eq!(camera.target_radius, 8.0);
        assert_relative_eq!(camera.target_focus.z, 0.0);
        assert!(camera.force_update);
        // focus + back * radius lands on the eye
        let eye = camera.target_focus - fitted.forward_axis * camera.target_radius;
        assert_relative_eq!(eye.z, 8.0);
    }

    #[test]
    fn perspective_radius_has_floor() {
        let fitted = CameraSnapshot::looking(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let mut camera = PanOrbitCamera::default();
        camera.apply_framing(
            &fitted,
            &framing(fitted.eye, 0.0),
            &Projection::Perspective(PerspectiveProjection::default()),
        );
        assert_relative_eq!(camera.target_radius, MIN_RADIUS);
    }

    fn fitted_parallel(ortho_height: f32) -> CameraSnapshot {
        CameraSnapshot::looking(Vec3::new(1.0, 2.0, 10.0), Vec3::NEG_Z, Vec3::Y)
            .with_projection(ProjectionMode::Parallel)
            .with_ortho_height(ortho_height)
            .with_viewport(800, 600)
    }

    #[test]
    fn orthographic_radius_shows_fitted_height() {
        // Freshly swapped in: `area` is still the `default_3d` rect.
        let mut ortho = OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: 1.0,
            },
            ..OrthographicProjection::default_3d()
        };
        let fitted = fitted_parallel(4.0);
        let mut camera = PanOrbitCamera::default();
        camera.apply_framing(
            &fitted,
            &framing(fitted.eye, 10.0),
            &Projection::Orthographic(ortho.clone()),
        );

        assert_relative_eq!(camera.target_radius, 4.0);
        assert!(camera.force_update);

        // PanOrbitCamera drives `scale` from the radius; the next update shows the fitted height.
        ortho.scale = camera.target_radius;
        ortho.update(800.0, 600.0);
        assert_relative_eq!(ortho.area.height(), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn orthographic_focus_sits_at_mid_clip_depth() {
        let ortho = OrthographicProjection {
            near: 0.0,
            far: 100.0,
            ..OrthographicProjection::default_3d()
        };
        let fitted = fitted_parallel(4.0);
        let mut camera = PanOrbitCamera::default();
        camera.apply_framing(
            &fitted,
            &framing(fitted.eye, 10.0),
            &Projection::Orthographic(ortho),
        );

        assert_relative_eq!(camera.target_focus.x, 1.0);
        assert_relative_eq!(camera.target_focus.y, 2.0);
        assert_relative_eq!(camera.target_focus.z, -40.0);
        // `WindowSize` shows one unit per pixel at scale 1.
        assert_relative_eq!(camera.target_radius, 4.0 / 600.0);
    }
}
