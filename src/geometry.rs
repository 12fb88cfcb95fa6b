//! Descriptions of the GPU resources a scene needs. They are all created up
//! front by the builder and never shared between nodes.

use std::borrow::Cow;

use crate::constants::{RING_MAX_SEGMENTS, RING_MIN_SEGMENTS};
use crate::{Num, Rgb, TWO_PI};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: Num,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: Num, segments: u32) -> Self {
        Self {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }
}

/// A flat annulus in the XY plane, facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub inner_radius: Num,
    pub outer_radius: Num,
    pub theta_segments: u32,
}

impl RingGeometry {
    /// A ring centred on `radius`, `2 * half_width` wide.
    pub fn around(radius: Num, half_width: Num, theta_segments: u32) -> Self {
        Self {
            inner_radius: radius - half_width,
            outer_radius: radius + half_width,
            theta_segments: theta_segments.clamp(RING_MIN_SEGMENTS, RING_MAX_SEGMENTS),
        }
    }

    /// Triangulates the ring with a single band of quads. The seam vertices
    /// are duplicated so uv coordinates stay continuous.
    pub fn mesh(&self) -> MeshData {
        let segments = self.theta_segments;
        let columns = segments + 1;

        let mut mesh = MeshData::with_capacity(2 * columns as usize);

        for radius in [self.inner_radius, self.outer_radius] {
            for i in 0..=segments {
                let theta = i as Num / segments as Num * TWO_PI;
                let x = radius * theta.cos();
                let y = radius * theta.sin();

                mesh.positions.push([x as f32, y as f32, 0.0]);
                mesh.normals.push([0.0, 0.0, 1.0]);
                mesh.uvs.push([
                    ((x / self.outer_radius + 1.0) / 2.0) as f32,
                    ((y / self.outer_radius + 1.0) / 2.0) as f32,
                ]);
            }
        }

        for i in 0..segments {
            let a = i;
            let b = i + columns;
            let c = i + columns + 1;
            let d = i + 1;

            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        mesh
    }
}

/// Vertex buffers ready to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Flat, unlit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub color: Rgb,
    pub double_sided: bool,
}

impl Material {
    pub fn basic(color: Rgb) -> Self {
        Self {
            color,
            double_sided: false,
        }
    }

    pub fn double_sided(color: Rgb) -> Self {
        Self {
            color,
            double_sided: true,
        }
    }
}

/// Text drawn onto an offscreen canvas and used as a sprite texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTexture {
    pub text: String,
    pub font_family: Cow<'static, str>,
    /// Pixels
    pub font_size: u32,
    pub color: Rgb,
    pub width: u32,
    pub height: u32,
}

impl LabelTexture {
    /// Text is drawn from the left edge with its baseline one font size down
    /// the canvas, so the top line of glyphs is fully visible.
    pub fn baseline(&self) -> u32 {
        self.font_size
    }

    /// Whether the text's baseline lands inside the canvas.
    pub fn fits_vertically(&self) -> bool {
        self.baseline() <= self.height
    }
}
