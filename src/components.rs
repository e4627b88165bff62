//! Components used by the camera framing system.

use bevy::prelude::*;

use crate::fit::Framing;

/// Letterbox aspect ratio (width / height) the host pins the camera's content region to.
/// Cameras without it use the viewport's own aspect ratio.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct ExplicitAspectRatio(pub f32);

/// Marks the entity that the camera was last framed on.
#[derive(Component, Reflect, Debug)]
#[reflect(Component)]
pub struct CurrentFitTarget(pub Entity);

/// Result of the most recent fit applied to this camera.
/// Persists after the fit so callers and the visualization can read it.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct LastFraming(pub Framing);
