//! Scene objects and the ray/sphere intersection engine

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::transform::Transform;
use crate::utils::SerdeVector;
use crate::{Point, Ray, Vec3};

/// A sphere, stored as a unit sphere at the origin of its own object space
///
/// `position`/`rotation`/`scale` define the model matrix mapping object space
/// to world space; a uniform scale is the radius. The matrix pair is rebuilt
/// eagerly whenever one of them changes, so it is always current when a
/// render starts.
pub struct Sphere {
    position: Point,
    rotation: Vec3,
    scale: Vec3,
    transform: Transform,
    /// Diffuse surface color
    pub color: Color,
    /// Shininess exponent of the highlight; `None` disables the specular term
    pub specular: Option<f64>,
    /// Mirror contribution in `[0, 1]`
    pub reflective: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64, color: Color) -> Self {
        let mut sphere = Self {
            position: center,
            rotation: Vec3::zeros(),
            scale: Vec3::new(radius, radius, radius),
            transform: Transform::default(),
            color,
            specular: None,
            reflective: 0.0,
        };
        sphere.rebuild_transform();
        sphere
    }

    pub fn from_config(config: SphereConfig) -> Self {
        let mut sphere = Self::new(config.center.into(), config.radius, config.color);
        if let Some(rotation) = config.rotation {
            sphere.set_rotation(rotation.into());
        }
        if let Some(scale) = config.scale {
            sphere.set_scale(scale.into());
        }
        sphere.specular = config.specular;
        sphere.reflective = config.reflective;
        sphere
    }

    /// Builder: enable the specular highlight
    pub fn with_specular(mut self, exponent: f64) -> Self {
        self.specular = Some(exponent);
        self
    }

    /// Builder: set the mirror contribution
    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective;
        self
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.rebuild_transform();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.rebuild_transform();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.rebuild_transform();
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    fn rebuild_transform(&mut self) {
        self.transform = Transform::from_trs(&self.position, &self.rotation, &self.scale);
    }
}

/// Sphere config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: SerdeVector,
    pub radius: f64,
    pub color: Color,
    #[serde(default)]
    pub rotation: Option<SerdeVector>,
    #[serde(default)]
    pub scale: Option<SerdeVector>,
    #[serde(default)]
    pub specular: Option<f64>,
    #[serde(default)]
    pub reflective: f64,
}

/// The closest valid hit along a ray
pub struct Intersection<'a> {
    pub object: &'a Sphere,
    /// Ray parameter of the hit, valid on the world and the local ray alike
    pub t: f64,
    /// The ray mapped into the hit object's space
    pub local: Ray,
}

/// Below this the quadratic's leading coefficient counts as degenerate
const MIN_QUADRATIC_A: f64 = 1e-12;

/// Find the globally closest hit of `ray` against `objects` within `[t_min, t_max]`
///
/// The ray is mapped into each object's space, where the object is a unit
/// sphere at the origin and the quadratic reduces to `a = D.D`,
/// `b = -2 (C.D)`, `c = C.C - 1`. The local direction is not renormalized,
/// which keeps `t` meaningful in both spaces. Ties keep the first object
/// found.
pub fn closest_intersection<'a>(
    ray: &Ray,
    t_min: f64,
    t_max: f64,
    objects: &'a [Sphere],
) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;

    for object in objects {
        let local = Ray::new(
            object.transform().to_local_point(&ray.orig),
            object.transform().to_local_vector(&ray.dir),
        );

        // C points from the ray origin to the sphere center, which sits at
        // the object-space origin
        let co = -local.orig.coords;
        let a = local.dir.dot(&local.dir);
        if a < MIN_QUADRATIC_A {
            continue;
        }
        let b = -2.0 * co.dot(&local.dir);
        let c = co.dot(&co) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            continue;
        }

        let sqrt_disc = discriminant.sqrt();
        for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
            if t < t_min || t > t_max {
                continue;
            }
            if closest.as_ref().map_or(true, |hit| t < hit.t) {
                closest = Some(Intersection {
                    object,
                    t,
                    local: local.clone(),
                });
            }
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new(255.0, 0.0, 0.0)
    }

    #[test]
    fn hit_lands_on_the_surface() {
        let objects = vec![Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red())];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));

        let hit = closest_intersection(&ray, 1.0, f64::INFINITY, &objects).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-9);

        let p = ray.get(hit.t);
        let center = Point::new(0.0, 0.0, 4.0);
        assert!(((p - center).norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn near_root_below_t_min_falls_back_to_far_root() {
        let objects = vec![Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red())];
        let ray = Ray::new(Point::new(0.0, 0.0, 3.5), Vec3::new(0.0, 0.0, 1.0));

        let hit = closest_intersection(&ray, 1.0, f64::INFINITY, &objects).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn miss_returns_none() {
        let objects = vec![Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red())];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 1.0, 0.0));
        assert!(closest_intersection(&ray, 1.0, f64::INFINITY, &objects).is_none());
    }

    #[test]
    fn hit_behind_range_returns_none() {
        let objects = vec![Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red())];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, -1.0));
        assert!(closest_intersection(&ray, 1.0, f64::INFINITY, &objects).is_none());
    }

    #[test]
    fn closest_object_wins() {
        let objects = vec![
            Sphere::new(Point::new(0.0, 0.0, 8.0), 1.0, red()),
            Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red()),
        ];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&ray, 1.0, f64::INFINITY, &objects).unwrap();
        assert!(std::ptr::eq(hit.object, &objects[1]));
        assert!((hit.t - 3.0).abs() < 1e-9);
    }

    #[test]
    fn tie_keeps_the_first_object() {
        let objects = vec![
            Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red()),
            Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red()),
        ];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&ray, 1.0, f64::INFINITY, &objects).unwrap();
        assert!(std::ptr::eq(hit.object, &objects[0]));
    }

    #[test]
    fn scaled_sphere_hits_at_scaled_radius() {
        let mut sphere = Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red());
        sphere.set_scale(Vec3::new(1.0, 1.0, 2.0));
        let objects = vec![sphere];

        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&ray, 1.0, f64::INFINITY, &objects).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_direction_cannot_hit() {
        let objects = vec![Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red())];
        let ray = Ray::new(Point::origin(), Vec3::zeros());
        assert!(closest_intersection(&ray, 0.0, f64::INFINITY, &objects).is_none());
    }

    #[test]
    fn setters_rebuild_the_transform() {
        let mut sphere = Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, red());
        sphere.set_position(Point::new(0.0, 10.0, 4.0));
        let objects = vec![sphere];

        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(closest_intersection(&ray, 1.0, f64::INFINITY, &objects).is_none());

        let raised = Ray::new(Point::new(0.0, 10.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(closest_intersection(&raised, 1.0, f64::INFINITY, &objects).is_some());
    }

    #[test]
    fn builders_chain() {
        let sphere = Sphere::new(Point::origin(), 1.0, red())
            .with_specular(500.0)
            .with_reflective(0.3);
        assert_eq!(sphere.specular, Some(500.0));
        assert_eq!(sphere.reflective, 0.3);
    }

    #[test]
    fn config_defaults_leave_materials_plain() {
        let config: SphereConfig = serde_yaml::from_str(
            "center: { x: 0.0, y: -1.0, z: 3.0 }\nradius: 1.0\ncolor: { r: 255.0, g: 0.0, b: 0.0 }\n",
        )
        .unwrap();
        let sphere = Sphere::from_config(config);
        assert_eq!(sphere.specular, None);
        assert_eq!(sphere.reflective, 0.0);
        assert_eq!(sphere.color, red());
        assert_eq!(sphere.position(), &Point::new(0.0, -1.0, 3.0));
    }
}
