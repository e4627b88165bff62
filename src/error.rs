//! Error type shared by the framing core and the ECS layer.

use thiserror::Error;

/// Errors produced while building a frustum or fitting a camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FramingError {
    /// An argument was outside its accepted range (padding must be in `[0, 50)`).
    #[error("invalid argument `{argument}`: {value} is outside the accepted range")]
    InvalidArgument {
        argument: &'static str,
        value:    f32,
    },
    /// Opposite frustum planes are parallel, so no apex exists (zero or 180 degree field of view).
    #[error("frustum planes are parallel; the field of view is degenerate")]
    DegenerateFrustum,
    /// The camera has no viewport size yet (render target not resolved).
    #[error("camera viewport size is unavailable")]
    ViewportUnavailable,
    /// Only perspective and orthographic projections can be framed.
    #[error("custom projections are not supported")]
    UnsupportedProjection,
}

/// Padding is a percentage per side; 50% or more would leave no visible region.
pub(crate) fn validate_padding(padding: f32) -> Result<(), FramingError> {
    if (0.0..50.0).contains(&padding) {
        Ok(())
    } else {
        Err(FramingError::InvalidArgument {
            argument: "padding",
            value:    padding,
        })
    }
}
