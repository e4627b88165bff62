//! Camera snapshot: the viewing state the framing core reads and rewrites.
//!
//! A snapshot is taken from the host camera at call time, mutated by the fitter and handed
//! back. Bevy is the host here: `from_bevy` reads a camera entity's transform, projection and
//! viewport, and `write_to` stores the fitted eye and extent/FOV back into its components.

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::error::FramingError;
use crate::fov::convert_fov;

/// Projection model of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectionMode {
    /// Orthographic projection; extent is `ortho_height`.
    Parallel,
    /// Perspective projection; extent is `fov_degrees`.
    Perspective,
}

/// Viewing state of a camera at one point in time.
///
/// `x_axis`, `up_axis` and `forward_axis` are orthonormal and right-handed
/// (`x_axis × up_axis = -forward_axis`), so the camera looks down its local −Z like Bevy's.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct CameraSnapshot {
    pub eye:                   Vec3,
    pub x_axis:                Vec3,
    pub up_axis:               Vec3,
    pub forward_axis:          Vec3,
    pub projection:            ProjectionMode,
    /// Field of view in degrees, measured inside any letterbox bars.
    pub fov_degrees:           f32,
    /// Whether `fov_degrees` is the vertical (true) or horizontal (false) angle.
    pub fov_is_height:         bool,
    /// Full (letterbox-inclusive) visible height of the orthographic projection.
    pub ortho_height:          f32,
    /// Letterbox aspect ratio, `0.0` when none is set.
    pub explicit_aspect_ratio: f32,
    pub viewport_width_px:     u32,
    pub viewport_height_px:    u32,
}

impl CameraSnapshot {
    /// Perspective snapshot at `eye` looking along `forward`, with `up` as the approximate up
    /// direction. The basis is re-orthogonalized.
    pub fn looking(eye: Vec3, forward: Vec3, up: Vec3) -> Self {
        let forward_axis = forward.normalize();
        let x_axis = forward_axis.cross(up).normalize();
        let up_axis = x_axis.cross(forward_axis);
        Self {
            eye,
            x_axis,
            up_axis,
            forward_axis,
            projection: ProjectionMode::Perspective,
            fov_degrees: 45.0,
            fov_is_height: true,
            ortho_height: 1.0,
            explicit_aspect_ratio: 0.0,
            viewport_width_px: 1280,
            viewport_height_px: 720,
        }
    }

    pub const fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    pub const fn with_fov(mut self, fov_degrees: f32, fov_is_height: bool) -> Self {
        self.fov_degrees = fov_degrees;
        self.fov_is_height = fov_is_height;
        self
    }

    pub const fn with_ortho_height(mut self, ortho_height: f32) -> Self {
        self.ortho_height = ortho_height;
        self
    }

    pub const fn with_explicit_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.explicit_aspect_ratio = aspect_ratio;
        self
    }

    pub const fn with_viewport(mut self, width_px: u32, height_px: u32) -> Self {
        self.viewport_width_px = width_px;
        self.viewport_height_px = height_px;
        self
    }

    /// Reads a snapshot from a Bevy camera.
    ///
    /// Bevy's perspective `fov` spans the full viewport vertically, so it is converted to the
    /// bounded vertical angle when an explicit aspect ratio adds horizontal bars.
    pub fn from_bevy(
        cam_global: &GlobalTransform,
        projection: &Projection,
        camera: &Camera,
        explicit_aspect_ratio: Option<f32>,
    ) -> Result<Self, FramingError> {
        let viewport = camera
            .physical_viewport_size()
            .filter(|size| size.x > 0 && size.y > 0)
            .ok_or(FramingError::ViewportUnavailable)?;

        let rot = cam_global.rotation();
        let mut snapshot = Self {
            eye:                   cam_global.translation(),
            x_axis:                rot * Vec3::X,
            up_axis:               rot * Vec3::Y,
            forward_axis:          rot * Vec3::NEG_Z,
            projection:            ProjectionMode::Perspective,
            fov_degrees:           45.0,
            fov_is_height:         true,
            ortho_height:          1.0,
            explicit_aspect_ratio: explicit_aspect_ratio.unwrap_or(0.0),
            viewport_width_px:     viewport.x,
            viewport_height_px:    viewport.y,
        };

        match projection {
            Projection::Perspective(perspective) => {
                let full_vertical = perspective.fov.to_degrees();
                let bars = snapshot.aspect_ratio_ratio().max(1.0);
                snapshot.fov_degrees = convert_fov(full_vertical, 1.0 / bars);
            },
            Projection::Orthographic(ortho) => {
                snapshot.projection = ProjectionMode::Parallel;
                snapshot.ortho_height = unscaled_ortho_height(ortho, viewport) * ortho.scale;
            },
            Projection::Custom(_) => return Err(FramingError::UnsupportedProjection),
        }

        Ok(snapshot)
    }

    /// Writes the eye and extent/FOV back onto a Bevy camera.
    ///
    /// The translation is written as-is, so the camera entity is expected to have no parent.
    pub fn write_to(&self, transform: &mut Transform, projection: &mut Projection) {
        transform.translation = self.eye;
        match (self.projection, projection) {
            (ProjectionMode::Perspective, Projection::Perspective(perspective)) => {
                perspective.fov = self.fov_full_vertical().to_radians();
            },
            (ProjectionMode::Parallel, Projection::Orthographic(ortho)) => {
                ortho.scaling_mode = ScalingMode::FixedVertical {
                    viewport_height: self.ortho_height,
                };
                ortho.scale = 1.0;
            },
            (mode, _) => {
                warn!("CameraSnapshot: projection changed since snapshot ({mode:?}), extent not written");
            },
        }
    }
}

/// Visible height of `ortho` at `scale == 1` on a viewport of `viewport` pixels.
///
/// Derived from `scaling_mode` rather than `area`, which Bevy only refreshes once per frame and
/// is stale right after the projection is replaced or edited.
pub(crate) fn unscaled_ortho_height(ortho: &OrthographicProjection, viewport: UVec2) -> f32 {
    let width = viewport.x as f32;
    let height = viewport.y as f32;
    match ortho.scaling_mode {
        ScalingMode::WindowSize => height,
        ScalingMode::Fixed { height, .. } => height,
        ScalingMode::FixedVertical { viewport_height } => viewport_height,
        ScalingMode::FixedHorizontal { viewport_width } => height * viewport_width / width,
        ScalingMode::AutoMin {
            min_width,
            min_height,
        } => {
            if width * min_height > min_width * height {
                min_height
            } else {
                height * min_width / width
            }
        },
        ScalingMode::AutoMax {
            max_width,
            max_height,
        } => {
            if width * max_height > max_width * height {
                max_width * height / width
            } else {
                max_height
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::camera::CameraProjection;
    use bevy::camera::Viewport;

    use super::*;

    fn camera_with_viewport(width: u32, height: u32) -> Camera {
        Camera {
            viewport: Some(Viewport {
                physical_size: UVec2::new(width, height),
                ..default()
            }),
            ..default()
        }
    }

    #[test]
    fn looking_builds_right_handed_basis() {
        let snapshot = CameraSnapshot::looking(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        assert_relative_eq!(snapshot.x_axis.x, 1.0);
        assert_relative_eq!(snapshot.up_axis.y, 1.0);
        let back = snapshot.x_axis.cross(snapshot.up_axis);
        assert_relative_eq!(back.dot(snapshot.forward_axis), -1.0);
    }

    #[test]
    fn looking_reorthogonalizes_tilted_up() {
        let snapshot =
            CameraSnapshot::looking(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0), Vec3::Y);
        assert_relative_eq!(snapshot.up_axis.dot(snapshot.forward_axis), 0.0, epsilon = 1e-6);
        assert_relative_eq!(snapshot.up_axis.length(), 1.0, epsilon = 1e-6);
        assert!(snapshot.up_axis.y > 0.0);
    }

    #[test]
    fn write_to_sets_translation_and_fov() {
        let snapshot = CameraSnapshot::looking(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Z, Vec3::Y)
            .with_fov(60.0, true)
            .with_viewport(800, 600);
        let mut transform = Transform::default();
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        snapshot.write_to(&mut transform, &mut projection);

        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        let Projection::Perspective(perspective) = projection else {
            panic!("projection kind changed");
        };
        assert_relative_eq!(perspective.fov, 60.0_f32.to_radians(), epsilon = 1e-5);
    }

    #[test]
    fn write_to_sets_orthographic_height() {
        let snapshot = CameraSnapshot::looking(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_projection(ProjectionMode::Parallel)
            .with_ortho_height(7.5);
        let mut transform = Transform::default();
        let mut projection = Projection::Orthographic(OrthographicProjection::default_3d());
        snapshot.write_to(&mut transform, &mut projection);

        let Projection::Orthographic(ortho) = projection else {
            panic!("projection kind changed");
        };
        assert_eq!(ortho.scale, 1.0);
        assert!(matches!(
            ortho.scaling_mode,
            ScalingMode::FixedVertical { viewport_height } if viewport_height == 7.5
        ));
    }

    #[test]
    fn orthographic_height_ignores_stale_area() {
        let mut ortho = OrthographicProjection::default_3d();
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: 3.0,
        };
        ortho.scale = 2.0;
        // `area` still holds the `default_3d` rect; no frame has run `update` yet.
        let snapshot = CameraSnapshot::from_bevy(
            &GlobalTransform::IDENTITY,
            &Projection::Orthographic(ortho.clone()),
            &camera_with_viewport(800, 600),
            None,
        )
        .unwrap();
        assert_relative_eq!(snapshot.ortho_height, 6.0);

        ortho.update(800.0, 600.0);
        assert_relative_eq!(ortho.area.height(), snapshot.ortho_height);
    }

    #[test]
    fn unscaled_height_matches_bevy_for_every_scaling_mode() {
        let viewport = UVec2::new(800, 600);
        for scaling_mode in [
            ScalingMode::WindowSize,
            ScalingMode::Fixed {
                width:  5.0,
                height: 2.0,
            },
            ScalingMode::FixedVertical {
                viewport_height: 4.0,
            },
            ScalingMode::FixedHorizontal {
                viewport_width: 4.0,
            },
            ScalingMode::AutoMin {
                min_width:  4.0,
                min_height: 4.0,
            },
            ScalingMode::AutoMax {
                max_width:  4.0,
                max_height: 4.0,
            },
        ] {
            let mut ortho = OrthographicProjection {
                scaling_mode,
                ..OrthographicProjection::default_3d()
            };
            ortho.update(viewport.x as f32, viewport.y as f32);
            assert_relative_eq!(
                unscaled_ortho_height(&ortho, viewport),
                ortho.area.height(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn letterboxed_perspective_fov_survives_read_and_write() {
        let fov = 50.0_f32.to_radians();
        let mut projection = Projection::Perspective(PerspectiveProjection {
            fov,
            ..default()
        });
        let snapshot = CameraSnapshot::from_bevy(
            &GlobalTransform::IDENTITY,
            &projection,
            &camera_with_viewport(800, 600),
            Some(2.0),
        )
        .unwrap();

        // 2.0 over a 4:3 viewport puts bars top and bottom, so the bounded angle is narrower.
        assert!(snapshot.fov_degrees < 50.0);
        assert_relative_eq!(snapshot.fov_full_vertical(), 50.0, epsilon = 1e-4);

        let mut transform = Transform::default();
        snapshot.write_to(&mut transform, &mut projection);
        let Projection::Perspective(perspective) = projection else {
            panic!("projection kind changed");
        };
        assert_relative_eq!(perspective.fov, fov, epsilon = 1e-5);
    }
}
