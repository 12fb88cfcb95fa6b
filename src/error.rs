use thiserror::Error;

use crate::Num;

/// A [`crate::SceneConfig`] that cannot be turned into a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("celestial body #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("`{name}` has a non-positive orbital radius ({radius})")]
    NonPositiveOrbitalRadius { name: String, radius: Num },

    #[error("`{name}` has a non-positive body radius ({radius})")]
    NonPositiveBodyRadius { name: String, radius: Num },

    #[error("`{name}` has a non-finite angular speed ({speed})")]
    NonFiniteAngularSpeed { name: String, speed: f64 },

    #[error(
        "ring half width {half_width} must be positive and below the innermost orbit ({limit})"
    )]
    InvalidRingWidth { half_width: Num, limit: Num },

    #[error("rings need {min} to {max} segments, got {segments}")]
    RingSegmentsOutOfRange { segments: u32, min: u32, max: u32 },

    #[error(
        "satellite `{name}` orbits body #{parent}, but only {count} bodies are configured"
    )]
    UnknownSatelliteParent {
        name: String,
        parent: usize,
        count: usize,
    },
}

/// Returned by a [`crate::component::Renderer`]. The frame loop never
/// retries after one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("the rendering surface is no longer attached")]
    SurfaceLost,
}
