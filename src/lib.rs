//! Recursive sphere ray tracer
//!
//! Casts one ray per pixel from a camera through a viewport, intersects
//! spheres in their own object space and shades hits with ambient, point and
//! directional lights, shadows, specular highlights and mirror reflection.

use nalgebra::{Point3, Vector3};

pub mod camera;
pub mod color;
pub mod lighting;
pub mod lights;
pub mod objects;
pub mod raytracer;
pub mod scene;
pub mod transform;
pub mod utils;

pub type Vec3 = Vector3<f64>;
pub type Point = Point3<f64>;

/// Prelude
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::lights::Light;
    pub use crate::objects::Sphere;
    pub use crate::raytracer::Raytracer;
    pub use crate::scene::{RasterSink, Scene};
    pub use crate::{Point, Ray, Vec3};
}

/// The ray in ray tracing
///
/// Built fresh for every intersection test; the `t` range of interest is
/// passed alongside rather than stored.
#[derive(Debug, Clone)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn get(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }
}
