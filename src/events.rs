//! Framing requests and lifecycle events.

use bevy::prelude::*;

use crate::fit::Framing;

// ============================================================================
// Requests
// ============================================================================

/// Event to frame a target entity's meshes (including descendants) in the camera view.
/// Unset options fall back to `FramingConfig`.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct FrameToFit {
    #[event_target]
    pub camera_entity:          Entity,
    pub target:                 Entity,
    pub padding:                Option<f32>,
    pub include_letterbox_bars: Option<bool>,
}

impl FrameToFit {
    pub const fn new(camera_entity: Entity, target: Entity) -> Self {
        Self {
            camera_entity,
            target,
            padding: None,
            include_letterbox_bars: None,
        }
    }

    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub const fn with_letterbox_bars(mut self, include_letterbox_bars: bool) -> Self {
        self.include_letterbox_bars = Some(include_letterbox_bars);
        self
    }
}

/// Event to frame an explicit set of world-space points in the camera view.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct FramePoints {
    #[event_target]
    pub camera_entity:          Entity,
    pub points:                 Vec<Vec3>,
    pub padding:                Option<f32>,
    pub include_letterbox_bars: Option<bool>,
}

impl FramePoints {
    pub const fn new(camera_entity: Entity, points: Vec<Vec3>) -> Self {
        Self {
            camera_entity,
            points,
            padding: None,
            include_letterbox_bars: None,
        }
    }

    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub const fn with_letterbox_bars(mut self, include_letterbox_bars: bool) -> Self {
        self.include_letterbox_bars = Some(include_letterbox_bars);
        self
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Fired once a fit has succeeded, just before it is written to the camera.
/// Always followed by a `FramingEnd` for the same camera.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct FramingBegin {
    #[event_target]
    pub camera_entity: Entity,
}

/// Fired after a framing has been written back to the camera.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct FramingEnd {
    #[event_target]
    pub camera_entity: Entity,
    pub framing:       Framing,
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS_REQUEST: FramePoints = FramePoints::new(Entity::PLACEHOLDER, Vec::new())
        .with_padding(12.0)
        .with_letterbox_bars(true);

    const MESH_REQUEST: FrameToFit = FrameToFit::new(Entity::PLACEHOLDER, Entity::PLACEHOLDER)
        .with_padding(12.0)
        .with_letterbox_bars(true);

    #[test]
    fn builders_are_usable_in_const_context() {
        let points = POINTS_REQUEST;
        assert_eq!(points.padding, Some(12.0));
        assert_eq!(points.include_letterbox_bars, Some(true));

        let mesh = MESH_REQUEST;
        assert_eq!(mesh.padding, points.padding);
        assert_eq!(mesh.include_letterbox_bars, points.include_letterbox_bars);
    }

    #[test]
    fn unset_overrides_stay_none() {
        let request = FramePoints::new(Entity::PLACEHOLDER, vec![Vec3::ZERO]);
        assert_eq!(request.padding, None);
        assert_eq!(request.include_letterbox_bars, None);
    }
}
