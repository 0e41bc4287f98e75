//! Reflection Models

mod bxdf_type;
mod lambertian_reflection;
mod scatter_event;

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

// Re-export
pub use bxdf_type::*;
pub use lambertian_reflection::*;
pub use scatter_event::*;

/// Surface scattering model evaluated in a local shading frame where the
/// surface normal is the z-axis.
pub trait Bsdf: Send + Sync {
    /// Samples an outgoing direction for `event.wi`. On success sets `wo`,
    /// `pdf`, `throughput` (value * |cos wo| / pdf) and `sampled_lobe`.
    ///
    /// * `event` - The scatter event.
    /// * `u`     - Sample value in [0, 1)^2.
    fn sample(&self, event: &mut ScatterEvent, u: &Point2f) -> bool;

    /// Returns the value of the distribution function for `event.wi` and
    /// `event.wo` multiplied by the projected cosine |cos wo|.
    ///
    /// * `event` - The scatter query.
    fn eval(&self, event: &ScatterEvent) -> Spectrum;

    /// Returns the solid angle density of sampling `event.wo` given
    /// `event.wi`.
    ///
    /// * `event` - The scatter query.
    fn pdf(&self, event: &ScatterEvent) -> Float;
}

/// Atomic reference counted `Bsdf`.
pub type ArcBsdf = Arc<dyn Bsdf>;
