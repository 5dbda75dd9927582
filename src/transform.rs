//! Object-space/world-space transform pair

use nalgebra::{Matrix3, Matrix4, Rotation3};

use crate::utils::normalize_or_zero;
use crate::{Point, Vec3};

/// A model matrix kept together with its inverse and the normal matrix
///
/// The model matrix maps object space to world space and is
/// `T * Rz * Ry * Rx * S`. The inverse is assembled from the inverted parts
/// (`S^-1 * R^T * T^-1`), exact because the rotation block is orthonormal.
/// Normals go through the inverse-transpose of the model's 3x3 block so they
/// stay perpendicular to the surface under non-uniform scale.
#[derive(Debug, Clone)]
pub struct Transform {
    model: Matrix4<f64>,
    inverse: Matrix4<f64>,
    normal: Matrix3<f64>,
}

impl Transform {
    /// Build the pair from a position, Euler angles (radians) and per-axis scale
    pub fn from_trs(position: &Point, rotation: &Vec3, scale: &Vec3) -> Self {
        let t = Matrix4::new_translation(&position.coords);
        let r = Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z).to_homogeneous();
        let s = Matrix4::new_nonuniform_scaling(scale);
        let model = t * r * s;

        let t_inv = Matrix4::new_translation(&-position.coords);
        let r_inv = r.transpose();
        let s_inv = Matrix4::new_nonuniform_scaling(&Vec3::new(
            1.0 / scale.x,
            1.0 / scale.y,
            1.0 / scale.z,
        ));
        let inverse = s_inv * r_inv * t_inv;

        let normal = inverse.fixed_view::<3, 3>(0, 0).transpose();

        Self {
            model,
            inverse,
            normal,
        }
    }

    /// Map a world-space position into object space (translation applies)
    pub fn to_local_point(&self, p: &Point) -> Point {
        self.inverse.transform_point(p)
    }

    /// Map a world-space direction into object space (translation ignored)
    pub fn to_local_vector(&self, v: &Vec3) -> Vec3 {
        self.inverse.transform_vector(v)
    }

    /// Map an object-space position into world space
    pub fn to_world_point(&self, p: &Point) -> Point {
        self.model.transform_point(p)
    }

    /// Carry an object-space surface normal into world space, renormalized
    pub fn normal_to_world(&self, n: &Vec3) -> Vec3 {
        normalize_or_zero(&(self.normal * n))
    }

    pub fn model(&self) -> &Matrix4<f64> {
        &self.model
    }

    pub fn inverse(&self) -> &Matrix4<f64> {
        &self.inverse
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            model: Matrix4::identity(),
            inverse: Matrix4::identity(),
            normal: Matrix3::identity(),
        }
    }
}
