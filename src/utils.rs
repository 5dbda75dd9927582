//! Utils

use serde::{Deserialize, Serialize};

use crate::{Point, Vec3};

/// Norm below which a vector counts as zero instead of being normalized
pub const MIN_NORM: f64 = 1e-8;

/// Normalize `v`, returning the zero vector when its norm is below [`MIN_NORM`]
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(MIN_NORM).unwrap_or_else(Vec3::zeros)
}

/// Reflect `v` about the normal `n`: `2 (n . v) n - v`
///
/// `v` points away from the surface, as do the light and view vectors in the
/// shading equations.
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    2.0 * n.dot(v) * n - v
}

/// Plain serde stand-in for vectors and points in config files
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SerdeVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}
impl From<SerdeVector> for Point {
    fn from(v: SerdeVector) -> Self {
        Point::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_near_zero_returns_zero() {
        let v = Vec3::new(1e-12, -1e-12, 0.0);
        assert_eq!(normalize_or_zero(&v), Vec3::zeros());
    }

    #[test]
    fn normalize_returns_unit_vector() {
        let n = normalize_or_zero(&Vec3::new(3.0, 0.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!((n - Vec3::new(0.6, 0.0, 0.8)).norm() < 1e-12);
    }

    #[test]
    fn reflect_about_normal() {
        let r = reflect(&Vec3::new(1.0, 1.0, 0.0), &Vec3::new(0.0, 1.0, 0.0));
        assert!((r - Vec3::new(-1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn reflect_keeps_aligned_vector() {
        let n = Vec3::new(0.0, 0.0, -1.0);
        let r = reflect(&Vec3::new(0.0, 0.0, -1.0), &n);
        assert!((r - n).norm() < 1e-12);
    }
}
