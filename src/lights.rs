//! Light sources

use serde::{Deserialize, Serialize};

use crate::utils::{normalize_or_zero, SerdeVector};
use crate::{Point, Vec3};

/// A light source in the scene
///
/// Ambient light has no direction and never casts shadows. Point lights
/// shadow-test up to the exact distance to the light, directional lights all
/// the way out.
#[derive(Debug, Clone)]
pub enum Light {
    Ambient { intensity: f64 },
    Point { intensity: f64, position: Point },
    Directional { intensity: f64, direction: Vec3 },
}

impl Light {
    pub fn intensity(&self) -> f64 {
        match self {
            Self::Ambient { intensity }
            | Self::Point { intensity, .. }
            | Self::Directional { intensity, .. } => *intensity,
        }
    }

    /// Vector from `point` toward the light, `None` for ambient light
    ///
    /// Unit length for point lights; directional lights pass their configured
    /// direction through, the shading equations divide by its norm.
    pub fn direction_from(&self, point: &Point) -> Option<Vec3> {
        match self {
            Self::Ambient { .. } => None,
            Self::Point { position, .. } => Some(normalize_or_zero(&(position - point))),
            Self::Directional { direction, .. } => Some(*direction),
        }
    }

    /// How far along the light direction a shadow ray may find occluders
    pub fn max_shadow_distance(&self, point: &Point) -> f64 {
        match self {
            Self::Ambient { .. } => 0.0,
            Self::Point { position, .. } => (position - point).norm(),
            Self::Directional { .. } => f64::INFINITY,
        }
    }

    pub fn from_config(config: LightConfig) -> Self {
        match config {
            LightConfig::Ambient(c) => Self::Ambient {
                intensity: c.intensity,
            },
            LightConfig::Point(c) => Self::Point {
                intensity: c.intensity,
                position: c.position.into(),
            },
            LightConfig::Directional(c) => Self::Directional {
                intensity: c.intensity,
                direction: c.direction.into(),
            },
        }
    }
}

/// Config for lights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LightConfig {
    Ambient(AmbientConfig),
    Point(PointConfig),
    Directional(DirectionalConfig),
}

/// Ambient Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    pub intensity: f64,
}

/// Point Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointConfig {
    pub intensity: f64,
    pub position: SerdeVector,
}

/// Directional Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionalConfig {
    pub intensity: f64,
    pub direction: SerdeVector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_has_no_direction() {
        let light = Light::Ambient { intensity: 0.2 };
        assert_eq!(light.intensity(), 0.2);
        assert!(light.direction_from(&Point::origin()).is_none());
        assert_eq!(light.max_shadow_distance(&Point::origin()), 0.0);
    }

    #[test]
    fn point_light_points_home() {
        let light = Light::Point {
            intensity: 0.6,
            position: Point::new(0.0, 4.0, 0.0),
        };
        let p = Point::new(0.0, 1.0, 0.0);
        let l = light.direction_from(&p).unwrap();
        assert!((l - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert!((light.max_shadow_distance(&p) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn directional_light_reaches_forever() {
        let light = Light::Directional {
            intensity: 0.2,
            direction: Vec3::new(1.0, 4.0, 4.0),
        };
        let l = light.direction_from(&Point::origin()).unwrap();
        assert_eq!(l, Vec3::new(1.0, 4.0, 4.0));
        assert_eq!(light.max_shadow_distance(&Point::origin()), f64::INFINITY);
    }

    #[test]
    fn configs_deserialize_by_tag() {
        let yaml = "
- type: Ambient
  intensity: 0.2
- type: Point
  intensity: 0.6
  position: { x: 2.0, y: 1.0, z: 0.0 }
- type: Directional
  intensity: 0.2
  direction: { x: 1.0, y: 4.0, z: 4.0 }
";
        let configs: Vec<LightConfig> = serde_yaml::from_str(yaml).unwrap();
        let lights: Vec<Light> = configs.into_iter().map(Light::from_config).collect();
        assert!(matches!(lights[0], Light::Ambient { .. }));
        assert!(matches!(lights[1], Light::Point { .. }));
        assert!(matches!(lights[2], Light::Directional { .. }));
    }
}
