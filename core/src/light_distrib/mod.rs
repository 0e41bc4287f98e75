//! Light Distribution.

mod power;
mod uniform;

pub use power::*;
pub use uniform::*;

use crate::sampling::*;
use crate::scene::*;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LightSampleStategy {
    /// Sample all light sources uniformly.
    Uniform,

    /// Samples light sources according to their emitted power.
    Power,
}

impl From<&str> for LightSampleStategy {
    /// Returns a `LightSampleStrategy` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "uniform" => Self::Uniform,
            "power" => Self::Power,
            _ => {
                error!(
                    "Light sample distribution type '{}' unknown. Using 'power'.",
                    name
                );
                Self::Power
            }
        }
    }
}

/// Interface of light distribution implementations that provide probability
/// distributions for picking the light source that starts a light subpath.
pub trait LightDistribution: Send + Sync {
    /// Returns the selection distribution over `Scene::lights`, or `None` if
    /// the scene has no lights.
    fn lookup(&self) -> Option<&Distribution1D>;
}

/// Boxed `LightDistribution`.
pub type BoxLightDistribution = Box<dyn LightDistribution>;

/// Returns a new `LightDistribution` implementation.
///
/// * `strategy` - The light sampling strategy.
/// * `scene`    - The scene.
pub fn create_light_sample_distribution(
    strategy: LightSampleStategy,
    scene: &Scene,
) -> BoxLightDistribution {
    match strategy {
        LightSampleStategy::Uniform => Box::new(UniformLightDistribution::new(scene)),
        LightSampleStategy::Power => Box::new(PowerLightDistribution::new(scene)),
    }
}
