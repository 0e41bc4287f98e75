//! Sample records shared by emitters and cameras.

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// A point sampled on an emitter or camera.
#[derive(Copy, Clone, Debug)]
pub struct PositionSample {
    /// The sampled point.
    pub p: Point3f,

    /// Geometric normal at `p`.
    pub ng: Normal3f,

    /// Area density of `p`.
    pub pdf: Float,

    /// Sample weight (value / pdf).
    pub weight: Spectrum,
}

impl Default for PositionSample {
    fn default() -> Self {
        Self {
            p: Point3f::ZERO,
            ng: Normal3f::ZERO,
            pdf: 1.0,
            weight: Spectrum::ONE,
        }
    }
}

/// A direction sampled from a point on an emitter or camera.
#[derive(Copy, Clone, Debug)]
pub struct DirectionSample {
    /// The sampled unit direction.
    pub d: Vector3f,

    /// Solid angle density of `d`.
    pub pdf: Float,

    /// Sample weight (value / pdf).
    pub weight: Spectrum,
}

impl Default for DirectionSample {
    fn default() -> Self {
        Self {
            d: Vector3f::ZERO,
            pdf: 1.0,
            weight: Spectrum::ONE,
        }
    }
}
