//! Ambient, diffuse and specular shading with shadow tests

use crate::lights::Light;
use crate::objects::{closest_intersection, Sphere};
use crate::utils::reflect;
use crate::{Point, Ray, Vec3};

/// Offset for secondary rays so they do not re-hit the surface they leave
/// (shadow acne)
pub(crate) const SURFACE_BIAS: f64 = 0.001;

/// Total light intensity arriving at `p`
///
/// `n` is the surface normal, `v` points from the surface back toward the
/// viewer. Ambient lights contribute their intensity outright; every other
/// light is shadow-tested out to its own maximum distance and contributes a
/// diffuse term plus, when `specular` is set, a highlight. The sum is
/// non-negative and may exceed 1; colors clamp on multiplication.
pub fn compute_lighting(
    objects: &[Sphere],
    lights: &[Light],
    p: &Point,
    n: &Vec3,
    v: &Vec3,
    specular: Option<f64>,
) -> f64 {
    let mut intensity = 0.0;

    for light in lights {
        let Some(l) = light.direction_from(p) else {
            intensity += light.intensity();
            continue;
        };
        if in_shadow(objects, p, &l, light.max_shadow_distance(p)) {
            continue;
        }

        let n_dot_l = n.dot(&l);
        if n_dot_l > 0.0 {
            intensity += light.intensity() * n_dot_l / (n.norm() * l.norm());
        }

        if let Some(exponent) = specular {
            let r = reflect(&l, n);
            let r_dot_v = r.dot(v);
            if r_dot_v > 0.0 {
                intensity += light.intensity() * (r_dot_v / (r.norm() * v.norm())).powf(exponent);
            }
        }
    }
    intensity
}

/// Whether any object blocks the path from `p` toward the light
fn in_shadow(objects: &[Sphere], p: &Point, l: &Vec3, max_distance: f64) -> bool {
    let shadow_ray = Ray::new(*p, *l);
    closest_intersection(&shadow_ray, SURFACE_BIAS, max_distance, objects).is_some()
}
