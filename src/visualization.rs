//! Visualization of the last framing for debugging.
//!
//! Draws the extreme point touching each frustum side, the outline joining them, and the focus
//! point. Uses Bevy's GizmoConfigGroup pattern.

use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;

use crate::components::LastFraming;

/// Gizmo config group for framing visualization.
/// Toggle via `GizmoConfigStore::config_mut::<FramingGizmo>().enabled`
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct FramingGizmo {}

/// Configuration for framing visualization colors and appearance
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct FramingVisualizationConfig {
    /// Colors for the `[left, right, bottom, top]` extreme points.
    pub side_colors:   [Color; 4],
    pub outline_color: Color,
    pub focus_color:   Color,
    pub point_radius:  f32,
    pub line_width:    f32,
}

impl Default for FramingVisualizationConfig {
    fn default() -> Self {
        Self {
            side_colors:   [
                Color::srgb(1.0, 0.0, 0.0), // Left: red
                Color::srgb(1.0, 0.5, 0.0), // Right: orange
                Color::srgb(0.0, 0.4, 1.0), // Bottom: blue
                Color::srgb(0.0, 1.0, 1.0), // Top: cyan
            ],
            outline_color: Color::srgb(0.8, 0.8, 0.8),
            focus_color:   Color::srgb(1.0, 1.0, 0.0),
            point_radius:  0.05,
            line_width:    2.0,
        }
    }
}

/// Plugin that adds framing visualization functionality
pub struct FramingVisualizationPlugin;

impl Plugin for FramingVisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<FramingGizmo>()
            .init_resource::<FramingVisualizationConfig>()
            .add_systems(Startup, init_framing_gizmo)
            .add_systems(
                Update,
                (sync_gizmo_render_layers, draw_last_framing).chain(),
            );
    }
}

/// Initialize the framing gizmo config (disabled by default)
fn init_framing_gizmo(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<FramingVisualizationConfig>,
) {
    let (config, _) = config_store.config_mut::<FramingGizmo>();
    config.enabled = false;
    config.line.width = viz_config.line_width;
    config.depth_bias = -1.0;
}

/// Syncs the gizmo render layers and line width with the framed camera and config
fn sync_gizmo_render_layers(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<FramingVisualizationConfig>,
    camera_query: Query<Option<&RenderLayers>, With<LastFraming>>,
) {
    let Ok(render_layers) = camera_query.single() else {
        return;
    };

    let (gizmo_config, _) = config_store.config_mut::<FramingGizmo>();
    if let Some(layers) = render_layers {
        gizmo_config.render_layers = layers.clone();
    }
    gizmo_config.line.width = viz_config.line_width;
}

fn draw_last_framing(
    mut gizmos: Gizmos<FramingGizmo>,
    viz_config: Res<FramingVisualizationConfig>,
    camera_query: Query<(&GlobalTransform, &LastFraming)>,
) {
    for (cam_global, LastFraming(framing)) in &camera_query {
        for (point, color) in framing
            .extreme_points
            .iter()
            .zip(viz_config.side_colors)
        {
            gizmos.sphere(
                Isometry3d::from_translation(*point),
                viz_config.point_radius,
                color,
            );
        }

        let [left, right, bottom, top] = framing.extreme_points;
        gizmos.linestrip([left, top, right, bottom, left], viz_config.outline_color);

        let focus = framing.focus(*cam_global.forward());
        gizmos.cross(
            Isometry3d::from_translation(focus),
            viz_config.point_radius * 2.0,
            viz_config.focus_color,
        );
    }
}
