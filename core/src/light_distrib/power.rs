//! Power Light Distribution.

use super::LightDistribution;
use crate::sampling::*;
use crate::scene::*;

/// PowerLightDistribution picks lights with probability proportional to the
/// luminance of their total emitted power.
pub struct PowerLightDistribution {
    distrib: Option<Distribution1D>,
}

impl PowerLightDistribution {
    /// Create a new instance of `PowerLightDistribution`.
    ///
    /// * `scene` - The scene.
    pub fn new(scene: &Scene) -> Self {
        Self {
            distrib: compute_light_power_distribution(scene),
        }
    }
}

impl LightDistribution for PowerLightDistribution {
    fn lookup(&self) -> Option<&Distribution1D> {
        self.distrib.as_ref()
    }
}

/// Returns a distribution with probability proportional to each light's
/// power, or `None` if the scene has no lights.
///
/// * `scene` - The scene.
pub fn compute_light_power_distribution(scene: &Scene) -> Option<Distribution1D> {
    if scene.lights.is_empty() {
        None
    } else {
        let light_power: Vec<f32> = scene.lights.iter().map(|light| light.power().y()).collect();
        Some(Distribution1D::new(light_power))
    }
}
