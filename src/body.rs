use std::borrow::Cow;

use crate::constants::{
    MOON_ANGULAR_SPEED, MOON_COLOR, MOON_NAME, MOON_ORBITAL_RADIUS, MOON_PARENT, MOON_RADIUS,
    SUN_COLOR, SUN_NAME, SUN_RADIUS,
};
use crate::{CircularOrbit, Num};

/// A `0xRRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Self = Self(0xffffff);

    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Channels scaled to `0.0..=1.0`, still in sRGB space.
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
        ]
    }
}

/// Everything needed to put one planet on its orbit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialBodyConfig {
    pub name: Cow<'static, str>,
    pub color: Rgb,
    /// Distance from the sun
    pub orbital_radius: Num,
    /// Radius of the rendered sphere
    pub body_radius: Num,
    /// Radians per millisecond
    pub angular_speed: f64,
}

impl CelestialBodyConfig {
    pub const fn new(
        name: &'static str,
        color: u32,
        orbital_radius: Num,
        body_radius: Num,
        angular_speed: f64,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            color: Rgb(color),
            orbital_radius,
            body_radius,
            angular_speed,
        }
    }

    pub fn orbit(&self) -> CircularOrbit {
        CircularOrbit::new(self.orbital_radius, self.angular_speed)
    }
}

/// The body sitting at the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunConfig {
    pub name: Cow<'static, str>,
    pub color: Rgb,
    pub body_radius: Num,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed(SUN_NAME),
            color: Rgb(SUN_COLOR),
            body_radius: SUN_RADIUS,
        }
    }
}

/// A body orbiting one of the planets instead of the sun.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatelliteConfig {
    pub name: Cow<'static, str>,
    /// Index into [`crate::SceneConfig::bodies`]
    pub parent: usize,
    pub color: Rgb,
    /// Distance from the parent body
    pub orbital_radius: Num,
    pub body_radius: Num,
    /// Radians per millisecond
    pub angular_speed: f64,
}

impl SatelliteConfig {
    pub fn moon() -> Self {
        Self {
            name: Cow::Borrowed(MOON_NAME),
            parent: MOON_PARENT,
            color: Rgb(MOON_COLOR),
            orbital_radius: MOON_ORBITAL_RADIUS,
            body_radius: MOON_RADIUS,
            angular_speed: MOON_ANGULAR_SPEED,
        }
    }

    pub fn orbit(&self) -> CircularOrbit {
        CircularOrbit::new(self.orbital_radius, self.angular_speed)
    }
}

pub const SOLAR_SYSTEM: [CelestialBodyConfig; 9] = [
    CelestialBodyConfig::new("Mercury", 0xb0b0b0, 2.5, 0.3, 0.00047),
    CelestialBodyConfig::new("Venus", 0xffa500, 4.0, 0.5, 0.00035),
    CelestialBodyConfig::new("Earth", 0x0000ff, 6.0, 0.6, 0.00030),
    CelestialBodyConfig::new("Mars", 0xff0000, 8.0, 0.4, 0.00024),
    CelestialBodyConfig::new("Jupiter", 0xffa07a, 11.0, 1.2, 0.00013),
    CelestialBodyConfig::new("Saturn", 0xffd700, 14.5, 1.0, 0.00009),
    CelestialBodyConfig::new("Uranus", 0x00ffff, 17.0, 0.8, 0.00007),
    CelestialBodyConfig::new("Neptune", 0x000080, 20.0, 0.8, 0.00005),
    CelestialBodyConfig::new("Pluto", 0xd2b48c, 22.0, 0.2, 0.00004),
];

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0xffa500, (0xff, 0xa5, 0x00) ; "venus")]
    #[test_case(0x000080, (0x00, 0x00, 0x80) ; "neptune")]
    #[test_case(0xd2b48c, (0xd2, 0xb4, 0x8c) ; "pluto")]
    fn rgb_channels(hex: u32, expected: (u8, u8, u8)) {
        let c = Rgb(hex);

        assert_eq!((c.r(), c.g(), c.b()), expected);
    }

    #[test]
    fn white_is_all_ones() {
        assert_eq!(Rgb::WHITE.to_f32_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn reference_system_is_ordered_outwards() {
        for pair in SOLAR_SYSTEM.windows(2) {
            assert!(
                pair[0].orbital_radius < pair[1].orbital_radius,
                "{} should orbit inside {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn moon_orbits_the_earth_twelve_times_faster() {
        let moon = SatelliteConfig::moon();
        let earth = &SOLAR_SYSTEM[moon.parent];

        assert_eq!(earth.name, "Earth");
        assert!((moon.angular_speed / earth.angular_speed - 12.0).abs() < 1e-9);
    }
}
