//! Camera with a world transform and viewport ray construction

use log::warn;
use nalgebra::{Matrix4, Rotation3, Unit};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{normalize_or_zero, SerdeVector, MIN_NORM};
use crate::{Point, Vec3};

/// Raised when an orthonormal camera basis cannot be built
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    /// The look target coincides with the camera or lines up with the up vector
    #[error("cannot build an orthonormal basis from the given target and up vector")]
    DegenerateBasis,
}

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: SerdeVector,
    #[serde(default)]
    pub look_at: Option<SerdeVector>,
    #[serde(default)]
    pub up: Option<SerdeVector>,
}

/// Camera and related tasks
///
/// Holds a camera-to-world matrix whose columns are the right/up/forward
/// basis and the position. Viewport points are expressed in camera space and
/// leave through `build_ray` as world-space directions.
#[derive(Debug, Clone)]
pub struct Camera {
    world: Matrix4<f64>,
}

impl Camera {
    /// Camera at `position` with the default basis, looking toward +Z
    pub fn new(position: Point) -> Self {
        let mut world = Matrix4::identity();
        world[(0, 3)] = position.x;
        world[(1, 3)] = position.y;
        world[(2, 3)] = position.z;
        Self { world }
    }

    pub fn from_config(config: CameraConfig) -> Self {
        let mut camera = Self::new(config.position.into());
        if let Some(target) = config.look_at {
            let up: Vec3 = config.up.map(Into::into).unwrap_or_else(Vec3::y);
            if camera.look_at(target.into(), up).is_err()
                && camera.look_at(target.into(), Vec3::x()).is_err()
            {
                warn!("camera target coincides with its position, keeping the default basis");
            }
        }
        camera
    }

    /// World-space position rays are cast from
    pub fn position(&self) -> Point {
        Point::new(self.world[(0, 3)], self.world[(1, 3)], self.world[(2, 3)])
    }

    /// Map a camera-space viewport point to a normalized world-space ray direction
    ///
    /// Only the rotation block applies. A zero viewport vector has no
    /// direction and comes back as the zero vector; callers never pass one.
    pub fn build_ray(&self, viewport: &Vec3) -> Vec3 {
        normalize_or_zero(&self.world.transform_vector(viewport))
    }

    /// Rebuild the orthonormal basis to face `target`
    ///
    /// Fails without touching the basis when `target` coincides with the
    /// position or `world_up` lines up with the view direction; the caller
    /// retries with a different up vector.
    pub fn look_at(&mut self, target: Point, world_up: Vec3) -> Result<(), CameraError> {
        let forward = (target - self.position())
            .try_normalize(MIN_NORM)
            .ok_or(CameraError::DegenerateBasis)?;
        let right = world_up
            .cross(&forward)
            .try_normalize(MIN_NORM)
            .ok_or(CameraError::DegenerateBasis)?;
        let up = forward.cross(&right);

        self.world.fixed_view_mut::<3, 1>(0, 0).copy_from(&right);
        self.world.fixed_view_mut::<3, 1>(0, 1).copy_from(&up);
        self.world.fixed_view_mut::<3, 1>(0, 2).copy_from(&forward);
        Ok(())
    }

    /// Rotate around an axis expressed in camera space
    pub fn rotate_local(&mut self, axis: &Vec3, angle: f64) {
        if let Some(rotation) = axis_angle(axis, angle) {
            self.world *= rotation;
        }
    }

    /// Rotate around an axis expressed in world space
    pub fn rotate_world(&mut self, axis: &Vec3, angle: f64) {
        if let Some(rotation) = axis_angle(axis, angle) {
            self.world = rotation * self.world;
        }
    }

    /// Translate along the camera basis
    pub fn move_local(&mut self, dx: f64, dy: f64, dz: f64) {
        self.world *= Matrix4::new_translation(&Vec3::new(dx, dy, dz));
    }

    /// Translate along the world axes
    pub fn move_world(&mut self, dx: f64, dy: f64, dz: f64) {
        self.world = Matrix4::new_translation(&Vec3::new(dx, dy, dz)) * self.world;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point::origin())
    }
}

/// Axis-angle rotation matrix; a near-zero axis has no rotation to offer
fn axis_angle(axis: &Vec3, angle: f64) -> Option<Matrix4<f64>> {
    match Unit::try_new(*axis, MIN_NORM) {
        Some(axis) => Some(Rotation3::from_axis_angle(&axis, angle).to_homogeneous()),
        None => {
            warn!("ignoring rotation around a near-zero axis");
            None
        }
    }
}
