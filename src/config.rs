use std::borrow::Cow;

use crate::body::{SatelliteConfig, SunConfig};
use crate::constants::*;
use crate::error::ConfigError;
use crate::{CelestialBodyConfig, Num, Rgb, SOLAR_SYSTEM};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingStyle {
    pub half_width: Num,
    pub segments: u32,
    pub color: Rgb,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            half_width: RING_HALF_WIDTH,
            segments: RING_SEGMENTS,
            color: Rgb(RING_COLOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelStyle {
    pub font_family: Cow<'static, str>,
    pub font_size: u32,
    pub color: Rgb,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Sprite size in world units
    pub scale: [Num; 3],
    /// Gap between the top of the body and the label's centre
    pub clearance: Num,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: Cow::Borrowed(LABEL_FONT_FAMILY),
            font_size: LABEL_FONT_SIZE,
            color: Rgb(LABEL_COLOR),
            canvas_width: LABEL_CANVAS_WIDTH,
            canvas_height: LABEL_CANVAS_HEIGHT,
            scale: LABEL_SCALE,
            clearance: LABEL_CLEARANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraConfig {
    /// Distance above the orbital plane, looking straight down
    pub height: Num,
    pub fov_degrees: Num,
    pub near: Num,
    pub far: Num,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            height: CAMERA_HEIGHT,
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Everything the scene builder reads. The default is the reference solar
/// system: nine bodies from Mercury to Pluto and a moon around the Earth.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    pub sun: SunConfig,
    pub bodies: Vec<CelestialBodyConfig>,
    pub satellites: Vec<SatelliteConfig>,
    pub ring: RingStyle,
    pub label: LabelStyle,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sun: SunConfig::default(),
            bodies: SOLAR_SYSTEM.to_vec(),
            satellites: vec![SatelliteConfig::moon()],
            ring: RingStyle::default(),
            label: LabelStyle::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius(&self.sun.name, self.sun.body_radius, |name, radius| {
            ConfigError::NonPositiveBodyRadius { name, radius }
        })?;

        for (index, body) in self.bodies.iter().enumerate() {
            if body.name.is_empty() {
                return Err(ConfigError::EmptyName { index });
            }

            check_radius(&body.name, body.orbital_radius, |name, radius| {
                ConfigError::NonPositiveOrbitalRadius { name, radius }
            })?;
            check_radius(&body.name, body.body_radius, |name, radius| {
                ConfigError::NonPositiveBodyRadius { name, radius }
            })?;
            check_speed(&body.name, body.angular_speed)?;
        }

        for satellite in &self.satellites {
            if satellite.parent >= self.bodies.len() {
                return Err(ConfigError::UnknownSatelliteParent {
                    name: satellite.name.to_string(),
                    parent: satellite.parent,
                    count: self.bodies.len(),
                });
            }

            check_radius(&satellite.name, satellite.orbital_radius, |name, radius| {
                ConfigError::NonPositiveOrbitalRadius { name, radius }
            })?;
            check_radius(&satellite.name, satellite.body_radius, |name, radius| {
                ConfigError::NonPositiveBodyRadius { name, radius }
            })?;
            check_speed(&satellite.name, satellite.angular_speed)?;
        }

        self.ring.validate(&self.bodies)
    }
}

impl RingStyle {
    /// Every ring must keep a positive inner radius, so the half width stays
    /// below the smallest orbit it is drawn around.
    fn validate(&self, bodies: &[CelestialBodyConfig]) -> Result<(), ConfigError> {
        if !(RING_MIN_SEGMENTS..=RING_MAX_SEGMENTS).contains(&self.segments) {
            return Err(ConfigError::RingSegmentsOutOfRange {
                segments: self.segments,
                min: RING_MIN_SEGMENTS,
                max: RING_MAX_SEGMENTS,
            });
        }

        let limit = bodies
            .iter()
            .map(|body| body.orbital_radius)
            .fold(Num::INFINITY, Num::min);

        // Also rejects NaN
        if self.half_width > 0.0 && self.half_width < limit {
            Ok(())
        } else {
            Err(ConfigError::InvalidRingWidth {
                half_width: self.half_width,
                limit,
            })
        }
    }
}

fn check_radius(
    name: &str,
    radius: Num,
    err: impl FnOnce(String, Num) -> ConfigError,
) -> Result<(), ConfigError> {
    // Also rejects NaN
    if radius > 0.0 {
        Ok(())
    } else {
        Err(err(name.to_string(), radius))
    }
}

fn check_speed(name: &str, speed: f64) -> Result<(), ConfigError> {
    if speed.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteAngularSpeed {
            name: name.to_string(),
            speed,
        })
    }
}
