//! Integrator

mod common;

use crate::film::*;
use crate::scene::Scene;

// Re-export.
pub use common::*;

/// Integrator interface.
pub trait Integrator {
    /// Render the scene and return the film holding the result.
    ///
    /// * `scene` - The scene.
    fn render(&self, scene: &Scene) -> Film;

    /// Returns the scale factor that converts the film's splat sums into
    /// radiance estimates.
    fn splat_scale(&self) -> crate::pbrt::Float;
}
