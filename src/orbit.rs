use std::f64::consts::TAU;

use crate::constants::ORBIT_PLANE_Y;
use crate::{vec3, Num, Vec3};

/// A circular orbit in the XZ plane, parameterised only by time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircularOrbit {
    pub radius: Num,
    /// Radians per millisecond
    pub angular_speed: f64,
}

impl CircularOrbit {
    pub const fn new(radius: Num, angular_speed: f64) -> Self {
        Self {
            radius,
            angular_speed,
        }
    }

    /// Angle at `time_ms`, wrapped to `[0, 2π)`.
    ///
    /// The product is taken in `f64` and wrapped before narrowing, since wall
    /// clock times are around `1e12` ms and would lose every useful digit in
    /// `f32`.
    #[inline]
    pub fn angle_at(&self, time_ms: f64) -> Num {
        (time_ms * self.angular_speed).rem_euclid(TAU) as Num
    }

    /// Position relative to the orbit's centre at `time_ms`.
    ///
    /// angle = t * speed
    /// x = r * cos(angle)
    /// z = r * sin(angle)
    #[inline]
    pub fn position_at(&self, time_ms: f64) -> Vec3 {
        let angle = self.angle_at(time_ms);

        vec3(
            self.radius * angle.cos(),
            ORBIT_PLANE_Y,
            self.radius * angle.sin(),
        )
    }

    /// Where the body is placed before the first frame.
    pub fn initial_position(&self) -> Vec3 {
        vec3(self.radius, ORBIT_PLANE_Y, 0.0)
    }

    /// Milliseconds per revolution, infinite for a body that does not move.
    pub fn period(&self) -> f64 {
        TAU / self.angular_speed.abs()
    }
}
