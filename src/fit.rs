//! Fit algorithm for framing a point set in the camera view.
//!
//! The camera orientation is kept; the eye and the extent (orthographic) are solved in closed
//! form from four extreme points, one per frustum side:
//!
//! - **Parallel**: the extent is the camera-space span of the extreme points divided by the padding
//!   factor, and the eye slides laterally to their midpoint.
//! - **Perspective**: each opposite pair of extreme planes meets in a line (the apex for that pair).
//!   The eye takes x from the left/right line, y from the bottom/top line, and the depth of the one
//!   further back. The aspect ratio is then measured in screen space.

use bevy::math::Affine3A;
use bevy::prelude::*;

use crate::error::FramingError;
use crate::error::validate_padding;
use crate::frustum::Frustum;
use crate::frustum::Plane;
use crate::frustum::compute_frustum;
use crate::snapshot::CameraSnapshot;
use crate::snapshot::ProjectionMode;

// ============================================================================
// Constants
// ============================================================================

/// Padding percentage on each side when none is given.
pub const DEFAULT_PADDING: f32 = 5.0;
/// Smallest span (world units) fitted along either screen axis.
pub const DEFAULT_MIN_EXTENT: f32 = 0.01;

// ============================================================================
// Types
// ============================================================================

/// Options for `fit_camera_to_points`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct FitOptions {
    /// Percentage of the frame left blank on each side, in `[0, 50)`.
    pub padding:                f32,
    /// Fit into the whole viewport rather than the region inside the letterbox bars.
    pub include_letterbox_bars: bool,
    /// Spans narrower than this are widened to it before fitting, so coincident or collinear
    /// points still produce a finite frame.
    pub min_extent:             f32,
}

impl Default for FitOptions {
    fn default() -> Self { Self::new(DEFAULT_PADDING, false) }
}

impl FitOptions {
    pub const fn new(padding: f32, include_letterbox_bars: bool) -> Self {
        Self {
            padding,
            include_letterbox_bars,
            min_extent: DEFAULT_MIN_EXTENT,
        }
    }

    pub const fn with_min_extent(mut self, min_extent: f32) -> Self {
        self.min_extent = min_extent;
        self
    }
}

/// Fitted extent of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Extent {
    /// Orthographic content size, padding included.
    Parallel { width: f32, height: f32 },
    /// Perspective field of view in degrees; fitting moves the eye and keeps the angle.
    Perspective { fov_degrees: f32 },
}

/// Result of a fit.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Framing {
    /// New world-space eye position.
    pub eye:            Vec3,
    pub extent:         Extent,
    /// Width over height of the fitted content, for callers that want to pin an explicit
    /// aspect ratio matching it.
    pub aspect_ratio:   f32,
    /// Depth from the new eye to the center of the fitted points.
    pub focus_distance: f32,
    /// World-space point touching each frustum side, in `[left, right, bottom, top]` order.
    pub extreme_points: [Vec3; 4],
}

impl Framing {
    /// World-space point the camera looks at, `focus_distance` in front of the eye.
    pub fn focus(&self, forward_axis: Vec3) -> Vec3 { self.eye + forward_axis * self.focus_distance }
}

/// Rigid transform between world space and eye space (origin at the eye, axes
/// `x_axis`, `up_axis`, `-forward_axis`).
#[derive(Debug, Clone, Copy)]
struct CameraBasis {
    to_camera: Affine3A,
    to_world:  Affine3A,
}

impl CameraBasis {
    fn from_snapshot(camera: &CameraSnapshot) -> Self {
        let rotation = Mat3::from_cols(camera.x_axis, camera.up_axis, -camera.forward_axis);
        let to_world = Affine3A::from_mat3_translation(rotation, camera.eye);
        Self {
            to_camera: to_world.inverse(),
            to_world,
        }
    }
}

// ============================================================================
// Fitting
// ============================================================================

/// Moves the eye (and, for parallel projection, the extent) of `camera` so every point in
/// `points` is visible with the requested padding.
///
/// Returns `Ok(None)` and leaves the camera untouched when `points` is empty.
pub fn fit_camera_to_points(
    camera: &mut CameraSnapshot,
    points: &[Vec3],
    options: &FitOptions,
) -> Result<Option<Framing>, FramingError> {
    validate_padding(options.padding)?;
    if points.is_empty() {
        debug!("fit_camera_to_points: no points, camera unchanged");
        return Ok(None);
    }

    let basis = CameraBasis::from_snapshot(camera);
    // Only directions matter here; the planes are re-anchored on the extreme points below.
    let frustum = compute_frustum(camera, options.padding, options.include_letterbox_bars)?
        .transformed(&basis.to_camera);

    let mut candidates: Vec<Vec3> = points
        .iter()
        .map(|point| basis.to_camera.transform_point3(*point))
        .collect();
    apply_extent_floor(&mut candidates, options.min_extent);

    let extremes = frustum
        .planes
        .map(|plane| extreme_point(&plane, &candidates));
    let padding_factor = 1.0 - options.padding / 50.0;

    let (local_eye, extent, aspect_ratio) = match camera.projection {
        ProjectionMode::Parallel => {
            let (local_eye, width, height) = solve_parallel(&extremes, padding_factor);
            camera.ortho_height =
                reconcile_ortho_height(camera, width, height, options.include_letterbox_bars);
            (local_eye, Extent::Parallel { width, height }, width / height)
        },
        ProjectionMode::Perspective => {
            let local_eye = solve_perspective(&frustum, &extremes)?;
            let aspect_ratio = screen_space_aspect_ratio(&candidates, local_eye);
            let extent = Extent::Perspective {
                fov_degrees: camera.fov_degrees,
            };
            (local_eye, extent, aspect_ratio)
        },
    };

    let (min, max) = bounds(&candidates);
    let focus_distance = local_eye.z - (min.z + max.z) * 0.5;

    camera.eye = basis.to_world.transform_point3(local_eye);

    debug!(
        "fit_camera_to_points: {:?} eye={:.3?} extent={extent:?} aspect={aspect_ratio:.3} \
         focus_distance={focus_distance:.3}",
        camera.projection, camera.eye
    );

    Ok(Some(Framing {
        eye: camera.eye,
        extent,
        aspect_ratio,
        focus_distance,
        extreme_points: extremes.map(|point| basis.to_world.transform_point3(point)),
    }))
}

/// The point furthest outside `plane` (smallest signed distance).
fn extreme_point(plane: &Plane, points: &[Vec3]) -> Vec3 {
    points
        .iter()
        .fold((Vec3::ZERO, f32::INFINITY), |(best, best_distance), point| {
            let distance = plane.signed_distance(*point);
            if distance < best_distance {
                (*point, distance)
            } else {
                (best, best_distance)
            }
        })
        .0
}

fn bounds(points: &[Vec3]) -> (Vec3, Vec3) {
    points.iter().fold(
        (Vec3::INFINITY, Vec3::NEG_INFINITY),
        |(min, max), point| (min.min(*point), max.max(*point)),
    )
}

/// Widens camera-space x/y spans narrower than `min_extent` by adding two points at
/// `center ± min_extent / 2` on that axis, at the depth nearest the eye.
fn apply_extent_floor(points: &mut Vec<Vec3>, min_extent: f32) {
    let (min, max) = bounds(points);
    let center = (min + max) * 0.5;
    let half = min_extent * 0.5;
    // Eye space looks down -z.
    let near_z = max.z;

    if max.x - min.x < min_extent {
        debug!("fit_camera_to_points: horizontal span {:.5} below floor", max.x - min.x);
        points.push(Vec3::new(center.x - half, center.y, near_z));
        points.push(Vec3::new(center.x + half, center.y, near_z));
    }
    if max.y - min.y < min_extent {
        debug!("fit_camera_to_points: vertical span {:.5} below floor", max.y - min.y);
        points.push(Vec3::new(center.x, center.y - half, near_z));
        points.push(Vec3::new(center.x, center.y + half, near_z));
    }
}

/// Returns the eye-space eye position and the padded `(width, height)`.
fn solve_parallel(extremes: &[Vec3; 4], padding_factor: f32) -> (Vec3, f32, f32) {
    let [left, right, bottom, top] = *extremes;
    let width = (right.x - left.x) / padding_factor;
    let height = (top.y - bottom.y) / padding_factor;
    let local_eye = Vec3::new((left.x + right.x) * 0.5, (bottom.y + top.y) * 0.5, 0.0);
    (local_eye, width, height)
}

/// Full orthographic height that shows a `width` x `height` region.
///
/// Whichever dimension is relatively larger than the target region drives the fit. The target
/// region is the whole viewport with `include_letterbox_bars`, otherwise the area inside the bars.
fn reconcile_ortho_height(
    camera: &CameraSnapshot,
    width: f32,
    height: f32,
    include_letterbox_bars: bool,
) -> f32 {
    let target_aspect = if include_letterbox_bars {
        camera.viewport_aspect_ratio()
    } else {
        camera.current_aspect_ratio()
    };

    let target_height = if target_aspect > width / height {
        height
    } else {
        width / target_aspect
    };

    if include_letterbox_bars {
        target_height
    } else {
        target_height * camera.aspect_ratio_ratio().max(1.0)
    }
}

/// Intersects the extreme planes pairwise and returns the eye-space eye position.
fn solve_perspective(frustum: &Frustum, extremes: &[Vec3; 4]) -> Result<Vec3, FramingError> {
    let through = |side: usize| Plane::new(extremes[side], frustum.planes[side].normal);

    // Left/right meet in a line parallel to the up axis, bottom/top in one parallel to x.
    let horizontal = through(Frustum::LEFT)
        .intersect(&through(Frustum::RIGHT))
        .ok_or(FramingError::DegenerateFrustum)?;
    let vertical = through(Frustum::BOTTOM)
        .intersect(&through(Frustum::TOP))
        .ok_or(FramingError::DegenerateFrustum)?;

    // Backing up from either apex only adds slack; the further-back one is the tightest eye
    // that keeps all four extreme points inside.
    Ok(Vec3::new(
        horizontal.point.x,
        vertical.point.y,
        horizontal.point.z.max(vertical.point.z),
    ))
}

/// Projects an eye-space point to normalized screen coordinates.
/// Returns `(x / depth, y / depth, depth)`, or `None` if the point is not in front of the eye.
fn project_point(relative: Vec3) -> Option<(f32, f32, f32)> {
    let depth = -relative.z;
    if depth <= f32::EPSILON {
        return None;
    }
    Some((relative.x / depth, relative.y / depth, depth))
}

/// Ratio of the largest horizontal to the largest vertical screen offset from center, as seen
/// from `local_eye`.
fn screen_space_aspect_ratio(points: &[Vec3], local_eye: Vec3) -> f32 {
    let mut half_x = 0.0_f32;
    let mut half_y = 0.0_f32;
    for point in points {
        let Some((norm_x, norm_y, _)) = project_point(*point - local_eye) else {
            continue;
        };
        half_x = half_x.max(norm_x.abs());
        half_y = half_y.max(norm_y.abs());
    }

    if half_y > 0.0 {
        half_x / half_y
    } else {
        warn!("fit_camera_to_points: no point projects in front of the fitted eye");
        1.0
    }
}
