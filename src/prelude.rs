//! Convenient re-exports for common types and traits

pub use crate::CameraFramingPlugin;
pub use crate::components::CurrentFitTarget;
pub use crate::components::ExplicitAspectRatio;
pub use crate::components::LastFraming;
pub use crate::config::FramingConfig;
pub use crate::events::FramePoints;
pub use crate::events::FrameToFit;
pub use crate::events::FramingEnd;
pub use crate::extension::PanOrbitCameraExt;
pub use crate::fit::Extent;
pub use crate::fit::FitOptions;
pub use crate::fit::Framing;
pub use crate::fit::fit_camera_to_points;
pub use crate::frustum::compute_frustum;
pub use crate::snapshot::CameraSnapshot;
pub use crate::snapshot::ProjectionMode;
