use crate::{Mat4, Quat, Vec3};

/// Position, rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Maps a point from this transform's local frame into its parent's.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (self.scale * point) + self.translation
    }

    /// Composes `self` (the parent) with `child`, giving the child's
    /// transform in the parent's parent frame.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vec3, PI};

    #[test]
    fn identity_leaves_points_alone() {
        let p = vec3(1.0, -2.0, 3.0);

        assert_eq!(Transform::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn composition_matches_matrix_product() {
        let parent = Transform {
            translation: vec3(4.0, 0.0, -1.0),
            rotation: Quat::from_rotation_y(0.7),
            scale: Vec3::ONE,
        };
        let child = Transform::from_translation(vec3(0.0, 1.1, 0.0))
            .with_scale(vec3(4.0, 2.0, 1.0));

        let composed = parent.mul_transform(&child).compute_matrix();
        let expected = parent.compute_matrix() * child.compute_matrix();

        assert!(composed.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn quarter_turn_about_x_lays_xy_onto_xz() {
        let t = Transform::from_rotation(Quat::from_rotation_x(PI / 2.0));

        let p = t.transform_point(vec3(0.0, 5.0, 0.0));

        assert!(p.abs_diff_eq(vec3(0.0, 0.0, 5.0), 1e-5));
    }
}
