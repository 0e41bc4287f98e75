//! Interactions

use crate::geometry::*;
use crate::pbrt::*;

mod surface_interaction;

pub use surface_interaction::*;

/// Common data for a point where a ray met the scene.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Ray parameter at `p`.
    pub t: Float,

    /// The negative ray direction.
    pub wo: Vector3f,

    /// Geometric surface normal at the point `p`.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new hit.
    ///
    /// * `p`  - Point of interaction.
    /// * `t`  - Ray parameter at `p`.
    /// * `wo` - The negative ray direction.
    /// * `n`  - Geometric surface normal at the point `p`.
    pub fn new(p: Point3f, t: Float, wo: Vector3f, n: Normal3f) -> Self {
        Self { p, t, wo, n }
    }

    /// Spawn's a new ray in the given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::new(self.p, *d)
    }
}
