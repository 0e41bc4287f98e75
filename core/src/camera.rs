//! Camera

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Camera trait provides common behavior for sensors that can start a camera
/// subpath and receive splats from light subpaths.
pub trait Camera: Send + Sync {
    /// Returns the film resolution in pixels.
    fn resolution(&self) -> Point2i;

    /// Samples a point on the lens.
    ///
    /// * `sampler` - The sampler.
    fn sample_position(&self, sampler: &mut dyn Sampler) -> Option<PositionSample>;

    /// Samples a primary ray direction through `pixel` from `point`.
    ///
    /// * `sampler` - The sampler.
    /// * `point`   - Point on the lens.
    /// * `pixel`   - The raster pixel.
    fn sample_direction(
        &self,
        sampler: &mut dyn Sampler,
        point: &PositionSample,
        pixel: &Point2i,
    ) -> Option<DirectionSample>;

    /// Returns the importance arriving at the lens point from direction `d`
    /// and the pixel it lands on. Returns `None` if `d` misses the film.
    ///
    /// * `sampler` - The sampler.
    /// * `point`   - Point on the lens.
    /// * `d`       - Unit direction leaving the lens into the scene.
    fn eval_direction(
        &self,
        sampler: &mut dyn Sampler,
        point: &PositionSample,
        d: &Vector3f,
    ) -> Option<(Spectrum, Point2i)>;

    /// Returns the solid angle density of `sample_direction()` producing `d`.
    ///
    /// * `point` - Point on the lens.
    /// * `d`     - Unit direction leaving the lens into the scene.
    fn direction_pdf(&self, point: &PositionSample, d: &Vector3f) -> Float;
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera>;
