// bevy_camera_framing
// Camera framing ("zoom to fit") for Bevy cameras:
// - FOV and aspect-ratio conversions with letterbox bookkeeping
// - Four-plane frustum construction for parallel and perspective projection
// - Closed-form fitting of eye position and extent to a point set
// - Events and observers that frame meshes or points on a camera entity

use bevy::prelude::*;

mod components;
mod config;
mod error;
mod events;
mod extension;
mod fit;
mod fov;
mod frustum;
mod observers;
pub mod prelude;
mod snapshot;
mod support;
#[cfg(feature = "visualization")]
mod visualization;

// Public API - Geometry core
pub use error::FramingError;
pub use fit::DEFAULT_MIN_EXTENT;
pub use fit::DEFAULT_PADDING;
pub use fit::Extent;
pub use fit::FitOptions;
pub use fit::Framing;
pub use fit::fit_camera_to_points;
pub use fov::convert_fov;
pub use frustum::Frustum;
pub use frustum::Line;
pub use frustum::Plane;
pub use frustum::compute_frustum;
pub use snapshot::CameraSnapshot;
pub use snapshot::ProjectionMode;

// Public API - Point collection
pub use support::SceneNode;
pub use support::collect_points;
pub use support::extract_mesh_vertices;

// Public API - Events
pub use events::FramePoints;
pub use events::FrameToFit;
pub use events::FramingBegin;
pub use events::FramingEnd;

// Public API - Components
pub use components::CurrentFitTarget;
pub use components::ExplicitAspectRatio;
pub use components::LastFraming;

// Public API - Traits
pub use extension::PanOrbitCameraExt;

// Public API - Configuration resources
pub use config::FramingConfig;

// Public API - Visualization
#[cfg(feature = "visualization")]
pub use visualization::FramingGizmo;
#[cfg(feature = "visualization")]
pub use visualization::FramingVisualizationConfig;
#[cfg(feature = "visualization")]
pub use visualization::FramingVisualizationPlugin;

// Internal - used by plugin, not for external use
use observers::on_frame_points;
use observers::on_frame_to_fit;

/// Plugin that adds camera framing functionality
pub struct CameraFramingPlugin;

impl Plugin for CameraFramingPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_frame_to_fit)
            .add_observer(on_frame_points)
            .init_resource::<FramingConfig>();
    }
}
