use log::{debug, warn};

use crate::body::{SatelliteConfig, SunConfig};
use crate::constants::{MOON_SEGMENTS, ORBIT_PLANE_Y, PLANET_SEGMENTS, SUN_SEGMENTS};
use crate::geometry::{LabelTexture, Material, RingGeometry, SphereGeometry};
use crate::scene::{Body, Label, OrbitRing, OrbitingBody, Satellite, Viewpoint};
use crate::{vec3, CelestialBodyConfig, Num, Quat, Scene, SceneConfig, Transform, Vec3, PI};

/// Assembles a [`Scene`] from a [`SceneConfig`].
///
/// Building never fails: the builder trusts its config, which
/// [`crate::SolarSystem::new`] has already validated. A satellite pointing at
/// a body that does not exist is dropped with a warning.
pub struct SceneBuilder<'a> {
    config: &'a SceneConfig,
    aspect: Num,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a SceneConfig) -> Self {
        Self {
            config,
            aspect: 1.0,
        }
    }

    /// Width over height of the surface the scene is drawn on.
    pub fn aspect(mut self, aspect: Num) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn build(&self) -> Scene {
        let central = self.central_body(&self.config.sun);

        let mut bodies: Vec<_> = self
            .config
            .bodies
            .iter()
            .map(|config| self.orbiting_body(config))
            .collect();

        let rings = self
            .config
            .bodies
            .iter()
            .map(|config| self.orbit_ring(config.orbital_radius))
            .collect();

        for config in &self.config.satellites {
            match bodies.get_mut(config.parent) {
                Some(parent) => parent.satellites.push(self.satellite(config)),
                None => warn!(
                    "Satellite {} orbits missing body #{}, skipping",
                    config.name,
                    config.parent
                ),
            }
        }

        let scene = Scene {
            central,
            bodies,
            rings,
            viewpoint: self.viewpoint(),
        };

        debug!(
            "Built scene with {} orbiting bodies and {} nodes",
            scene.bodies.len(),
            scene.node_ids().len()
        );

        scene
    }

    fn central_body(&self, sun: &SunConfig) -> Body {
        Body {
            name: sun.name.to_string(),
            geometry: SphereGeometry::new(sun.body_radius, SUN_SEGMENTS),
            material: Material::basic(sun.color),
            transform: Transform::IDENTITY,
        }
    }

    fn orbiting_body(&self, config: &CelestialBodyConfig) -> OrbitingBody {
        let orbit = config.orbit();

        OrbitingBody {
            body: Body {
                name: config.name.to_string(),
                geometry: SphereGeometry::new(config.body_radius, PLANET_SEGMENTS),
                material: Material::basic(config.color),
                transform: Transform::from_translation(orbit.initial_position()),
            },
            orbit,
            label: self.label(&config.name, config.body_radius),
            satellites: Vec::new(),
        }
    }

    /// Lies in the orbital plane: the ring geometry faces +Z and is tipped
    /// a quarter turn about X.
    fn orbit_ring(&self, radius: Num) -> OrbitRing {
        let style = &self.config.ring;

        OrbitRing {
            geometry: RingGeometry::around(radius, style.half_width, style.segments),
            material: Material::double_sided(style.color),
            transform: Transform {
                translation: vec3(0.0, ORBIT_PLANE_Y, 0.0),
                rotation: Quat::from_rotation_x(PI / 2.0),
                scale: Vec3::ONE,
            },
        }
    }

    fn label(&self, text: &str, body_radius: Num) -> Label {
        let style = &self.config.label;
        let [sx, sy, sz] = style.scale;

        Label {
            texture: LabelTexture {
                text: text.to_string(),
                font_family: style.font_family.clone(),
                font_size: style.font_size,
                color: style.color,
                width: style.canvas_width,
                height: style.canvas_height,
            },
            transform: Transform::from_translation(vec3(0.0, body_radius + style.clearance, 0.0))
                .with_scale(vec3(sx, sy, sz)),
        }
    }

    fn satellite(&self, config: &SatelliteConfig) -> Satellite {
        let orbit = config.orbit();

        Satellite {
            body: Body {
                name: config.name.to_string(),
                geometry: SphereGeometry::new(config.body_radius, MOON_SEGMENTS),
                material: Material::basic(config.color),
                transform: Transform::from_translation(orbit.initial_position()),
            },
            orbit,
        }
    }

    fn viewpoint(&self) -> Viewpoint {
        let camera = &self.config.camera;

        Viewpoint {
            eye: vec3(0.0, camera.height, 0.0),
            target: Vec3::ZERO,
            // Looking straight down, so "up" on screen is -Z
            up: Vec3::NEG_Z,
            fov_degrees: camera.fov_degrees,
            aspect: self.aspect,
            near: camera.near,
            far: camera.far,
        }
    }
}
