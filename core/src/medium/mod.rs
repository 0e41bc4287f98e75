//! Medium

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

mod henyey_greenstein;

// Re-exports
pub use henyey_greenstein::*;

/// Models scattering properties in volumetric media.
pub trait PhaseFunction: Send + Sync {
    /// Returns the phase function value for `event.wi` and `event.wo`.
    ///
    /// * `event` - The scatter query.
    fn eval(&self, event: &VolumeScatterEvent) -> Spectrum;

    /// Returns the solid angle density of sampling `event.wo` given
    /// `event.wi`.
    ///
    /// * `event` - The scatter query.
    fn pdf(&self, event: &VolumeScatterEvent) -> Float;

    /// Samples an outgoing direction for `event.wi`. On success sets `wo`,
    /// `pdf` and `throughput`.
    ///
    /// * `event` - The scatter event.
    /// * `u`     - Sample value in [0, 1)^2.
    fn sample(&self, event: &mut VolumeScatterEvent, u: &Point2f) -> bool;
}

/// Atomic reference counted `PhaseFunction`.
pub type ArcPhaseFunction = Arc<dyn PhaseFunction>;

/// A scattering event inside a participating medium. Directions are in
/// world space and point away from `p`.
#[derive(Copy, Clone, Debug)]
pub struct VolumeScatterEvent {
    /// Scattering location.
    pub p: Point3f,

    /// Direction towards the predecessor on the path.
    pub wi: Vector3f,

    /// Sampled or queried outgoing direction.
    pub wo: Vector3f,

    /// Sample weight; value / pdf.
    pub throughput: Spectrum,

    /// Solid angle density of `wo`.
    pub pdf: Float,
}

impl VolumeScatterEvent {
    /// Returns a new event at a point.
    ///
    /// * `p`  - Scattering location.
    /// * `wi` - Direction towards the predecessor.
    pub fn new(p: Point3f, wi: Vector3f) -> Self {
        Self {
            p,
            wi,
            wo: Vector3f::ZERO,
            throughput: Spectrum::ONE,
            pdf: 1.0,
        }
    }

    /// Returns a query for an arbitrary pair of directions at this point.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    pub fn make_warped_query(&self, wi: Vector3f, wo: Vector3f) -> Self {
        Self { wi, wo, ..*self }
    }

    /// Returns the query with `wi` and `wo` swapped.
    pub fn make_flipped_query(&self) -> Self {
        self.make_warped_query(self.wo, self.wi)
    }
}
