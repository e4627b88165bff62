//! Four-plane camera frustum (left, right, bottom, top), without near/far planes.
//!
//! Perspective planes all pass through the eye and are tilted by the half field of view.
//! Parallel planes are offset from the eye by the half extent. Normals face into the frustum.

use bevy::math::Affine3A;
use bevy::prelude::*;

use crate::error::FramingError;
use crate::error::validate_padding;
use crate::snapshot::CameraSnapshot;
use crate::snapshot::ProjectionMode;

/// Below this squared length two plane normals are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-10;

/// A half-space boundary through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Plane {
    pub point:  Vec3,
    pub normal: Vec3,
}

/// An infinite line through `point` along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Line {
    pub point:     Vec3,
    pub direction: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from `point` to the plane, positive on the side the normal faces.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 { self.normal.dot(point - self.point) }

    /// Line where this plane meets `other`. `None` when the planes are parallel.
    pub fn intersect(&self, other: &Self) -> Option<Line> {
        let direction = self.normal.cross(other.normal);
        let length_squared = direction.length_squared();
        if length_squared < PARALLEL_EPSILON {
            return None;
        }

        // Planes as n·p = d; the point below is the one on the line closest to the origin.
        let d1 = self.normal.dot(self.point);
        let d2 = other.normal.dot(other.point);
        let point = (d1 * other.normal.cross(direction) + d2 * direction.cross(self.normal))
            / length_squared;

        Some(Line {
            point,
            direction: direction / length_squared.sqrt(),
        })
    }

    /// Same plane with its anchor moved by `affine` and its normal rotated by it.
    /// `affine` must be rigid.
    pub fn transformed(&self, affine: &Affine3A) -> Self {
        Self {
            point:  affine.transform_point3(self.point),
            normal: affine.transform_vector3(self.normal),
        }
    }
}

/// Frustum side planes in the fixed order `[left, right, bottom, top]`.
///
/// Index 0/1 is the horizontal pair, 2/3 the vertical pair; the fitter relies on the order.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Frustum {
    pub planes: [Plane; 4],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;

    pub const fn left(&self) -> &Plane { &self.planes[Self::LEFT] }

    pub const fn right(&self) -> &Plane { &self.planes[Self::RIGHT] }

    pub const fn bottom(&self) -> &Plane { &self.planes[Self::BOTTOM] }

    pub const fn top(&self) -> &Plane { &self.planes[Self::TOP] }

    /// True when `point` is on the inner side of all four planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= 0.0)
    }

    pub fn transformed(&self, affine: &Affine3A) -> Self {
        Self {
            planes: self.planes.map(|plane| plane.transformed(affine)),
        }
    }
}

/// Builds the frustum of `camera` with `padding` percent left blank on each side.
///
/// With `include_letterbox_bars` the frustum spans the whole viewport, otherwise only the
/// content region inside the bars.
pub fn compute_frustum(
    camera: &CameraSnapshot,
    padding: f32,
    include_letterbox_bars: bool,
) -> Result<Frustum, FramingError> {
    validate_padding(padding)?;
    let padding_factor = 1.0 - padding / 50.0;

    let eye = camera.eye;
    let x_axis = camera.x_axis;
    let up_axis = camera.up_axis;

    let planes = match camera.projection {
        ProjectionMode::Perspective => {
            let (fov_h, fov_v) = if include_letterbox_bars {
                (camera.fov_full_horizontal(), camera.fov_full_vertical())
            } else {
                (camera.fov_bounded_horizontal(), camera.fov_bounded_vertical())
            };
            let half_h = (fov_h * 0.5 * padding_factor).to_radians();
            let half_v = (fov_v * 0.5 * padding_factor).to_radians();

            [
                Plane::new(eye, Quat::from_axis_angle(up_axis, half_h) * x_axis),
                Plane::new(eye, Quat::from_axis_angle(up_axis, -half_h) * -x_axis),
                Plane::new(eye, Quat::from_axis_angle(x_axis, -half_v) * up_axis),
                Plane::new(eye, Quat::from_axis_angle(x_axis, half_v) * -up_axis),
            ]
        },
        ProjectionMode::Parallel => {
            let (width, height) = if include_letterbox_bars {
                (camera.full_width(), camera.full_height())
            } else {
                (camera.width(), camera.height())
            };
            let half_w = width * 0.5 / padding_factor;
            let half_h = height * 0.5 / padding_factor;

            [
                Plane::new(eye - x_axis * half_w, x_axis),
                Plane::new(eye + x_axis * half_w, -x_axis),
                Plane::new(eye - up_axis * half_h, up_axis),
                Plane::new(eye + up_axis * half_h, -up_axis),
            ]
        },
    };

    debug!(
        "compute_frustum: {:?} padding={padding:.1} bars={include_letterbox_bars}",
        camera.projection
    );

    Ok(Frustum { planes })
}
