//! Click a mesh to frame it with `bevy_camera_framing`.
//!
//! - Click a mesh to frame it
//! - Click the ground to frame every mesh in the scene
//! - Press 'D' to toggle the framing gizmo
//! - Press 'P' to switch between perspective and orthographic projection
//! - Press 'A' to toggle a 2:1 explicit aspect ratio
//! - Press 'L' to toggle fitting into the letterbox bars

use std::f32::consts::PI;

use bevy::camera::ScalingMode;
use bevy::color::palettes::basic::SILVER;
use bevy::prelude::*;
use bevy_camera_framing::CameraFramingPlugin;
use bevy_camera_framing::CurrentFitTarget;
use bevy_camera_framing::ExplicitAspectRatio;
use bevy_camera_framing::FramePoints;
use bevy_camera_framing::FrameToFit;
use bevy_camera_framing::FramingConfig;
use bevy_camera_framing::FramingEnd;
use bevy_camera_framing::FramingGizmo;
use bevy_camera_framing::FramingVisualizationPlugin;
use bevy_camera_framing::extract_mesh_vertices;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

const PADDING: f32 = 10.0;
const LETTERBOX_ASPECT_RATIO: f32 = 2.0;
const MESH_CENTER_Y: f32 = 1.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PanOrbitCameraPlugin,
            CameraFramingPlugin,
            FramingVisualizationPlugin,
            MeshPickingPlugin,
        ))
        .insert_resource(FramingConfig {
            padding: PADDING,
            ..default()
        })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                toggle_gizmo,
                toggle_projection,
                toggle_aspect_ratio,
                toggle_letterbox,
                update_status,
            ),
        )
        .add_observer(on_framing_end)
        .run();
}

#[derive(Resource)]
struct SceneEntities {
    camera: Entity,
    meshes: Vec<Entity>,
}

#[derive(Component)]
struct StatusText;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands
        .spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(50.0, 50.0))),
            MeshMaterial3d(materials.add(Color::from(SILVER))),
        ))
        .observe(on_ground_clicked);

    commands.spawn((
        DirectionalLight {
            illuminance: 1500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, PI / 4.0, -PI / 4.0)),
    ));

    let shapes: [(Mesh, Color, f32); 3] = [
        (Cuboid::new(1.0, 2.0, 1.0).into(), Color::srgb(0.5, 0.5, 0.9), -2.5),
        (Sphere::new(0.5).into(), Color::srgb(0.9, 0.3, 0.2), 0.0),
        (Torus::new(0.25, 0.75).into(), Color::srgb(0.3, 0.8, 0.4), 2.5),
    ];
    let mesh_entities = shapes
        .into_iter()
        .map(|(mesh, color, x)| {
            commands
                .spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(materials.add(color)),
                    Transform::from_xyz(x, MESH_CENTER_Y, 0.0),
                ))
                .observe(on_mesh_clicked)
                .id()
        })
        .collect();

    let camera = commands
        .spawn(PanOrbitCamera {
            button_orbit: MouseButton::Middle,
            button_pan: MouseButton::Middle,
            modifier_pan: Some(KeyCode::ShiftLeft),
            radius: Some(8.0),
            pitch: Some(0.3),
            ..default()
        })
        .id();

    commands.spawn((
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));

    commands.insert_resource(SceneEntities {
        camera,
        meshes: mesh_entities,
    });
}

fn on_mesh_clicked(click: On<Pointer<Click>>, mut commands: Commands, scene: Res<SceneEntities>) {
    commands.trigger(FrameToFit::new(scene.camera, click.entity));
}

/// Frames the union of all scene meshes.
fn on_ground_clicked(
    _click: On<Pointer<Click>>,
    mut commands: Commands,
    scene: Res<SceneEntities>,
    children_query: Query<&Children>,
    mesh_query: Query<&Mesh3d>,
    global_transform_query: Query<&GlobalTransform>,
    meshes: Res<Assets<Mesh>>,
) {
    let points: Vec<Vec3> = scene
        .meshes
        .iter()
        .filter_map(|&entity| {
            extract_mesh_vertices(
                entity,
                &children_query,
                &mesh_query,
                &global_transform_query,
                &meshes,
            )
        })
        .flatten()
        .collect();

    commands
        .entity(scene.camera)
        .remove::<CurrentFitTarget>();
    commands.trigger(FramePoints::new(scene.camera, points));
}

fn on_framing_end(end: On<FramingEnd>) {
    info!(
        "Framed {:?}: extent {:?}, aspect ratio {:.3}",
        end.camera_entity, end.framing.extent, end.framing.aspect_ratio
    );
}

fn toggle_gizmo(keyboard: Res<ButtonInput<KeyCode>>, mut config_store: ResMut<GizmoConfigStore>) {
    if keyboard.just_pressed(KeyCode::KeyD) {
        let (config, _) = config_store.config_mut::<FramingGizmo>();
        config.enabled = !config.enabled;
    }
}

fn toggle_projection(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    scene: Res<SceneEntities>,
    mut cameras: Query<(&mut Projection, Option<&CurrentFitTarget>)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyP) {
        return;
    }
    let Ok((mut projection, target)) = cameras.get_mut(scene.camera) else {
        return;
    };

    *projection = match *projection {
        Projection::Orthographic(_) => Projection::Perspective(PerspectiveProjection::default()),
        _ => Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: 1.0,
            },
            ..OrthographicProjection::default_3d()
        }),
    };

    if let Some(CurrentFitTarget(target)) = target {
        commands.trigger(FrameToFit::new(scene.camera, *target));
    }
}

fn toggle_aspect_ratio(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    scene: Res<SceneEntities>,
    cameras: Query<Has<ExplicitAspectRatio>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyA) {
        return;
    }
    let Ok(has_ratio) = cameras.get(scene.camera) else {
        return;
    };

    let mut camera = commands.entity(scene.camera);
    if has_ratio {
        camera.remove::<ExplicitAspectRatio>();
    } else {
        camera.insert(ExplicitAspectRatio(LETTERBOX_ASPECT_RATIO));
    }
}

fn toggle_letterbox(keyboard: Res<ButtonInput<KeyCode>>, mut config: ResMut<FramingConfig>) {
    if keyboard.just_pressed(KeyCode::KeyL) {
        config.include_letterbox_bars = !config.include_letterbox_bars;
    }
}

fn update_status(
    scene: Res<SceneEntities>,
    config: Res<FramingConfig>,
    cameras: Query<(&Projection, Option<&ExplicitAspectRatio>)>,
    mut status: Single<&mut Text, With<StatusText>>,
) {
    let Ok((projection, explicit)) = cameras.get(scene.camera) else {
        return;
    };

    let projection = match projection {
        Projection::Orthographic(_) => "orthographic",
        _ => "perspective",
    };
    let aspect_ratio = explicit.map_or_else(|| "viewport".to_string(), |ratio| format!("{:.1}", ratio.0));

    status.0 = format!(
        "[D] gizmo  [P] projection: {projection}  [A] aspect ratio: {aspect_ratio}  [L] letterbox bars: {}",
        config.include_letterbox_bars
    );
}
