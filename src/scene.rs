//! Scene ownership and the per-pixel render loop

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraConfig};
use crate::color::Color;
use crate::lights::{Light, LightConfig};
use crate::objects::{Sphere, SphereConfig};
use crate::raytracer::{Raytracer, BACKGROUND_COLOR};
use crate::{Ray, Vec3};

/// Camera-space viewport the rays pass through, a fixed distance ahead
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub distance: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            distance: 1.0,
        }
    }
}

/// Receives rendered pixels
///
/// Coordinates are centered: the origin is the middle of the frame and y
/// grows upward. Implementations own the flip into their raster layout and
/// get one `flush` once every pixel has been delivered.
pub trait RasterSink {
    fn put_pixel(&mut self, x: i64, y: i64, color: Color);
    fn flush(&mut self);
}

/// A renderable scene: objects, lights, one camera
///
/// Everything is treated as immutable while `render` runs; mutate only
/// between frames.
pub struct Scene {
    pub objects: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub background: Color,
    pub viewport: Viewport,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
            background: BACKGROUND_COLOR,
            viewport: Viewport::default(),
        }
    }

    pub fn from_config(config: SceneConfig) -> Self {
        let mut scene = Self::new(Camera::from_config(config.camera));
        if let Some(background) = config.background {
            scene.background = background;
        }
        for object in config.objects {
            scene.add_object(Sphere::from_config(object));
        }
        for light in config.lights {
            scene.add_light(Light::from_config(light));
        }
        scene
    }

    pub fn add_object(&mut self, object: Sphere) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Render one frame into `sink`
    ///
    /// One ray per pixel over a centered raster. Rows trace in parallel
    /// against the read-only scene, then the sink is fed sequentially and
    /// flushed once.
    pub fn render(&self, width: u32, height: u32, sink: &mut dyn RasterSink) {
        info!(
            "rendering {width}x{height}: {} objects, {} lights",
            self.objects.len(),
            self.lights.len()
        );

        let tracer = Raytracer::new(&self.objects, &self.lights, self.background);
        let origin = self.camera.position();
        let half_width = width as i64 / 2;
        let half_height = height as i64 / 2;

        let rows: Vec<Vec<(i64, i64, Color)>> = (0..height)
            .into_par_iter()
            .map(|row| {
                let y = row as i64 - half_height;
                (0..width)
                    .map(|col| {
                        let x = col as i64 - half_width;
                        let direction =
                            self.camera
                                .build_ray(&self.viewport_point(x, y, width, height));
                        let color = tracer.trace(&Ray::new(origin, direction));
                        (x, y, color)
                    })
                    .collect()
            })
            .collect();

        for row in rows {
            for (x, y, color) in row {
                sink.put_pixel(x, y, color);
            }
        }
        sink.flush();
    }

    /// Map a centered pixel coordinate onto the viewport rectangle
    fn viewport_point(&self, x: i64, y: i64, width: u32, height: u32) -> Vec3 {
        Vec3::new(
            x as f64 * self.viewport.width / width as f64,
            y as f64 * self.viewport.height / height as f64,
            self.viewport.distance,
        )
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

/// Scene Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    #[serde(default)]
    pub objects: Vec<SphereConfig>,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub background: Option<Color>,
}
