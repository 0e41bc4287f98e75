//! Light

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Light trait provides common behavior for emitters that can start a light
/// subpath.
pub trait Light: Send + Sync {
    /// Return the total emitted power.
    fn power(&self) -> Spectrum;

    /// Returns the radiance emitted from a surface point with normal `n` in
    /// direction `w`.
    ///
    /// * `n` - Surface normal at the emitting point.
    /// * `w` - Outgoing direction.
    fn l(&self, n: &Normal3f, w: &Vector3f) -> Spectrum;

    /// Samples a point on the emitter. The weight is the emitted power
    /// divided by the area density.
    ///
    /// * `sampler` - The sampler.
    fn sample_position(&self, sampler: &mut dyn Sampler) -> Option<PositionSample>;

    /// Samples an emission direction from a point returned by
    /// `sample_position()`.
    ///
    /// * `sampler` - The sampler.
    /// * `point`   - The emitting point.
    fn sample_direction(
        &self,
        sampler: &mut dyn Sampler,
        point: &PositionSample,
    ) -> Option<DirectionSample>;

    /// Returns the directional part of the emission from `point` in
    /// direction `d`, including the projected cosine at the emitter.
    ///
    /// * `point` - The emitting point.
    /// * `d`     - Unit direction leaving the emitter.
    fn eval_directional_emission(&self, point: &PositionSample, d: &Vector3f) -> Spectrum;

    /// Returns the solid angle density of `sample_direction()` producing `d`.
    ///
    /// * `point` - The emitting point.
    /// * `d`     - Unit direction leaving the emitter.
    fn directional_pdf(&self, point: &PositionSample, d: &Vector3f) -> Float;
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light>;
