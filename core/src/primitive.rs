//! Primitive

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::reflection::*;
use std::sync::Arc;

/// Primitive trait connects geometry with shading and emission.
pub trait Primitive: Send + Sync {
    /// Returns geometric details if a ray intersects the primitive and updates
    /// the t_max parameter of the ray. If there is no intersection, `None` is
    /// returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>>;

    /// Returns `true` if a ray-primitive intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool;

    /// Returns the area light that describes the primitive's emission
    /// distribution, if the primitive itself is a light source.
    fn get_area_light(&self) -> Option<&dyn Light>;

    /// Returns the scattering model of the primitive's surface.
    fn get_bsdf(&self) -> Option<&dyn Bsdf>;
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive>;
