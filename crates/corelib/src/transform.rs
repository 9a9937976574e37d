use crate::{Mat4, Vec3};

/// Model placement matrix built by post-multiplying operations onto it,
/// so the last call is applied to the mesh first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    /// Resets to a pure translation.
    #[inline]
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: Mat4::from_translation(Vec3::new(x, y, z)),
        }
    }

    #[inline]
    pub fn translate(mut self, offset: Vec3) -> Self {
        self.matrix *= Mat4::from_translation(offset);
        self
    }

    /// Rotates about `axis` (need not be normalized) by `angle_deg` degrees.
    #[inline]
    pub fn rotate_degrees(mut self, angle_deg: f32, axis: Vec3) -> Self {
        self.matrix *= Mat4::from_axis_angle(axis.normalize(), angle_deg.to_radians());
        self
    }

    #[inline]
    pub fn scale(mut self, factors: Vec3) -> Self {
        self.matrix *= Mat4::from_scale(factors);
        self
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
