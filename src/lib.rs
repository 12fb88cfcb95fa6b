//! A small solar system: a sun, a ring of circular orbits, labels riding on
//! the planets and a moon riding on the Earth.
//!
//! The crate is split the same way the viewer uses it: [`builder`] creates the
//! scene graph once, [`animation`] moves it once per displayed frame and
//! [`component`] ties both to a host that owns the drawing surface.

#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!("features `f32` and `f64` are mutually exclusive");

pub mod animation;
pub mod body;
pub mod builder;
pub mod clock;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod orbit;
pub mod scene;
pub mod transform;

#[cfg(test)]
mod testing;

#[cfg(feature = "f32")]
pub type Num = f32;
#[cfg(feature = "f64")]
pub type Num = f64;

#[cfg(feature = "f32")]
pub use glam::{vec3, Mat4, Quat, Vec3};
#[cfg(feature = "f64")]
pub use glam::{dvec3 as vec3, DMat4 as Mat4, DQuat as Quat, DVec3 as Vec3};

pub use self::animation::{AnimationDriver, AnimationHandle, FrameScheduler};
pub use self::body::{CelestialBodyConfig, Rgb, SOLAR_SYSTEM};
pub use self::builder::SceneBuilder;
pub use self::clock::{ManualClock, SimulationClock, SystemClock};
pub use self::component::{Mounted, SolarSystem};
pub use self::config::SceneConfig;
pub use self::constants::{PI, TWO_PI};
pub use self::orbit::CircularOrbit;
pub use self::scene::{NodeId, Scene};
pub use self::transform::Transform;
