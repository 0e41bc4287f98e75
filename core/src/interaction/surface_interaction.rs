//! Surface Interactions

use super::Hit;
use crate::geometry::*;
use crate::light::*;
use crate::pbrt::*;
use crate::primitive::*;
use crate::reflection::*;
use crate::spectrum::*;
use std::fmt;

/// SurfaceInteraction represents geometry of a particular point on a surface.
///
/// The lifetime specifiers:
/// * `'scene` - Shared reference to the scene containing primitive.
#[derive(Copy, Clone)]
pub struct SurfaceInteraction<'scene> {
    /// The common interaction data.
    pub hit: Hit,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// The primitive that was hit.
    pub primitive: &'scene dyn Primitive,
}

impl<'scene> SurfaceInteraction<'scene> {
    /// Create a new surface interaction.
    ///
    /// * `hit`       - The common interaction data.
    /// * `uv`        - The uv coordinates from surface parametrization.
    /// * `primitive` - The primitive that was hit.
    pub fn new(hit: Hit, uv: Point2f, primitive: &'scene dyn Primitive) -> Self {
        Self { hit, uv, primitive }
    }

    /// Returns the scattering model at the hit, if the primitive has one.
    pub fn bsdf(&self) -> Option<&'scene dyn Bsdf> {
        self.primitive.get_bsdf()
    }

    /// Returns the area light attached to the primitive, if any.
    pub fn area_light(&self) -> Option<&'scene dyn Light> {
        self.primitive.get_area_light()
    }

    /// Returns the emitted radiance at a surface point intersected by a ray.
    ///
    /// * `w` - The outgoing direction.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        self.area_light()
            .map_or(Spectrum::ZERO, |light| light.l(&self.hit.n, w))
    }
}

impl<'scene> fmt::Debug for SurfaceInteraction<'scene> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceInteraction")
            .field("hit", &self.hit)
            .field("uv", &self.uv)
            .finish()
    }
}
