//! Recursive ray tracing: intersection, shading, mirror reflection

use crate::color::Color;
use crate::lighting::{compute_lighting, SURFACE_BIAS};
use crate::lights::Light;
use crate::objects::{closest_intersection, Intersection, Sphere};
use crate::utils::{normalize_or_zero, reflect};
use crate::{Ray, Vec3};

/// Color of rays that escape the scene
pub const BACKGROUND_COLOR: Color = Color::new(175.0, 191.0, 217.0);

/// Mirror bounces traced per primary ray
pub const REFLECTION_DEPTH: u32 = 3;

/// Primary rays start at the viewport, one unit out from the camera
pub const PRIMARY_T_MIN: f64 = 1.0;

/// Traces rays through an immutable view of the scene
///
/// Every call is a pure function of the ray and the borrowed scene data, so
/// tracers can be shared freely across worker threads.
pub struct Raytracer<'a> {
    objects: &'a [Sphere],
    lights: &'a [Light],
    background: Color,
}

impl<'a> Raytracer<'a> {
    pub fn new(objects: &'a [Sphere], lights: &'a [Light], background: Color) -> Self {
        Self {
            objects,
            lights,
            background,
        }
    }

    /// Trace a primary ray with the default parameters
    pub fn trace(&self, ray: &Ray) -> Color {
        self.trace_ray(ray, PRIMARY_T_MIN, f64::INFINITY, REFLECTION_DEPTH)
    }

    /// Color seen along `ray` within `[t_min, t_max]`, following up to
    /// `depth` mirror bounces
    pub fn trace_ray(&self, ray: &Ray, t_min: f64, t_max: f64, depth: u32) -> Color {
        let Some(hit) = closest_intersection(ray, t_min, t_max, self.objects) else {
            return self.background;
        };

        let p = ray.get(hit.t);
        let normal = surface_normal(&hit);

        // the view vector points from the surface back toward the ray origin
        let view = -ray.dir;
        let intensity = compute_lighting(
            self.objects,
            self.lights,
            &p,
            &normal,
            &view,
            hit.object.specular,
        );
        let local_color = hit.object.color.scale(intensity);

        let reflective = hit.object.reflective;
        if depth == 0 || reflective <= 0.0 {
            return local_color;
        }

        let reflected_dir = normalize_or_zero(&reflect(&view, &normal));
        let reflected_ray = Ray::new(p, reflected_dir);
        let reflected_color =
            self.trace_ray(&reflected_ray, SURFACE_BIAS, f64::INFINITY, depth - 1);

        local_color
            .scale(1.0 - reflective)
            .add(&reflected_color.scale(reflective))
    }
}

/// World-space unit normal at a hit
///
/// On the unit sphere the local hit position is the local normal; the
/// object's normal matrix carries it to world space and keeps it
/// perpendicular under non-uniform scale.
pub fn surface_normal(hit: &Intersection<'_>) -> Vec3 {
    let local_normal = normalize_or_zero(&hit.local.get(hit.t).coords);
    hit.object.transform().normal_to_world(&local_normal)
}
