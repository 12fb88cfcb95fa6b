use crate::Num;

#[cfg(feature = "f32")]
pub use std::f32::consts::PI;
#[cfg(feature = "f64")]
pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// Height of the shared orbital plane
pub const ORBIT_PLANE_Y: Num = 0.0;

pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: Num = 1.5;
pub const SUN_COLOR: u32 = 0xffff00;
pub const SUN_SEGMENTS: u32 = 32;

pub const PLANET_SEGMENTS: u32 = 64;

pub const MOON_NAME: &str = "Moon";
/// Index of the Earth in [`crate::SOLAR_SYSTEM`]
pub const MOON_PARENT: usize = 2;
pub const MOON_ORBITAL_RADIUS: Num = 1.0;
pub const MOON_RADIUS: Num = 0.15;
pub const MOON_COLOR: u32 = 0xaaaaaa;
/// Twelve times the Earth's angular speed, kept as a literal.
pub const MOON_ANGULAR_SPEED: f64 = 0.0036;
pub const MOON_SEGMENTS: u32 = 32;

pub const RING_HALF_WIDTH: Num = 0.05;
pub const RING_SEGMENTS: u32 = 64;
pub const RING_MIN_SEGMENTS: u32 = 3;
pub const RING_MAX_SEGMENTS: u32 = 4096;
pub const RING_COLOR: u32 = 0xffffff;

pub const LABEL_FONT_FAMILY: &str = "Arial";
pub const LABEL_FONT_SIZE: u32 = 48;
pub const LABEL_COLOR: u32 = 0xffffff;
/// Default size of an HTML canvas, which the label texture is drawn on
pub const LABEL_CANVAS_WIDTH: u32 = 300;
pub const LABEL_CANVAS_HEIGHT: u32 = 150;
pub const LABEL_SCALE: [Num; 3] = [4.0, 2.0, 1.0];
/// Gap between the top of a body and its label
pub const LABEL_CLEARANCE: Num = 0.5;

pub const CAMERA_HEIGHT: Num = 30.0;
pub const CAMERA_FOV_DEGREES: Num = 75.0;
pub const CAMERA_NEAR: Num = 0.1;
pub const CAMERA_FAR: Num = 1000.0;
