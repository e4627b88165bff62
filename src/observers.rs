//! Observers that wire framing events to camera behavior.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::components::CurrentFitTarget;
use crate::components::ExplicitAspectRatio;
use crate::components::LastFraming;
use crate::config::FramingConfig;
use crate::events::FrameToFit;
use crate::events::FramePoints;
use crate::events::FramingBegin;
use crate::events::FramingEnd;
use crate::extension::PanOrbitCameraExt;
use crate::fit::FitOptions;
use crate::fit::Framing;
use crate::fit::fit_camera_to_points;
use crate::snapshot::CameraSnapshot;
use crate::support::extract_mesh_vertices;

type CameraQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static mut Projection,
        &'static GlobalTransform,
        &'static Camera,
        Option<&'static ExplicitAspectRatio>,
        Option<&'static mut PanOrbitCamera>,
    ),
>;

/// Observer for `FrameToFit` event - frames a target entity's meshes in the camera view.
/// Requires the target entity to have a `Mesh3d` (direct or on descendants).
pub fn on_frame_to_fit(
    frame: On<FrameToFit>,
    mut commands: Commands,
    config: Res<FramingConfig>,
    mut camera_query: CameraQuery,
    mesh_query: Query<&Mesh3d>,
    children_query: Query<&Children>,
    global_transform_query: Query<&GlobalTransform>,
    meshes: Res<Assets<Mesh>>,
) {
    let camera_entity = frame.camera_entity;
    let target_entity = frame.target;

    info!("FrameToFit: camera={camera_entity:?} target={target_entity:?}");

    let Some(vertices) = extract_mesh_vertices(
        target_entity,
        &children_query,
        &mesh_query,
        &global_transform_query,
        &meshes,
    ) else {
        warn!("FrameToFit: Failed to extract mesh vertices for entity {target_entity:?}");
        return;
    };

    let options = config.fit_options(frame.padding, frame.include_letterbox_bars);
    if frame_camera(&mut commands, &mut camera_query, camera_entity, &vertices, &options).is_some() {
        commands
            .entity(camera_entity)
            .insert(CurrentFitTarget(target_entity));
    }
}

/// Observer for `FramePoints` event - frames explicit world-space points in the camera view.
pub fn on_frame_points(
    frame: On<FramePoints>,
    mut commands: Commands,
    config: Res<FramingConfig>,
    mut camera_query: CameraQuery,
) {
    let camera_entity = frame.camera_entity;

    info!(
        "FramePoints: camera={camera_entity:?} points={}",
        frame.points.len()
    );

    let options = config.fit_options(frame.padding, frame.include_letterbox_bars);
    frame_camera(&mut commands, &mut camera_query, camera_entity, &frame.points, &options);
}

/// Snapshots the camera, fits it to `points` and writes the result back.
///
/// Cameras driven by a `PanOrbitCamera` are updated through its focus and radius; others get
/// their `Transform` and `Projection` written directly. Failures are logged and leave the
/// camera untouched without firing any lifecycle event; `FramingBegin` and `FramingEnd` are
/// only triggered as a pair around a successful write.
fn frame_camera(
    commands: &mut Commands,
    camera_query: &mut CameraQuery,
    camera_entity: Entity,
    points: &[Vec3],
    options: &FitOptions,
) -> Option<Framing> {
    let Ok((mut transform, mut projection, cam_global, camera, explicit, pan_orbit)) =
        camera_query.get_mut(camera_entity)
    else {
        warn!("Framing: {camera_entity:?} is not a camera");
        return None;
    };

    let mut snapshot = match CameraSnapshot::from_bevy(
        cam_global,
        &projection,
        camera,
        explicit.map(|ratio| ratio.0),
    ) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            warn!("Framing: cannot snapshot camera {camera_entity:?}: {error}");
            return None;
        },
    };

    let framing = match fit_camera_to_points(&mut snapshot, points, options) {
        Ok(Some(framing)) => framing,
        Ok(None) => {
            debug!("Framing: no points for camera {camera_entity:?}, nothing to do");
            return None;
        },
        Err(error) => {
            warn!("Framing: fit failed for camera {camera_entity:?}: {error}");
            return None;
        },
    };

    commands.trigger(FramingBegin { camera_entity });
    if let Some(mut pan_orbit) = pan_orbit {
        pan_orbit.apply_framing(&snapshot, &framing, &projection);
    } else {
        snapshot.write_to(&mut transform, &mut projection);
    }

    commands
        .entity(camera_entity)
        .insert(LastFraming(framing.clone()));
    commands.trigger(FramingEnd {
        camera_entity,
        framing: framing.clone(),
    });

    Some(framing)
}
