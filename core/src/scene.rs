//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::primitive::*;

/// Scene.
#[derive(Clone)]
pub struct Scene {
    /// An aggregate of all primitives in the scene.
    pub aggregate: ArcPrimitive,

    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,
}

impl Scene {
    /// Creates a new `Scene`.
    ///
    /// * `aggregate` - An aggregate of all primitives in the scene.
    /// * `lights`    - All light sources in the scene.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>) -> Self {
        Self { aggregate, lights }
    }

    /// Traces the ray into the scene and returns the `SurfaceInteraction` if
    /// an intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction<'_>> {
        let mut r = *ray;
        self.aggregate.intersect(&mut r)
    }

    /// Traces the ray into the scene and returns whether or not an intersection
    /// occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.aggregate.intersect_p(ray)
    }

    /// Returns true if anything blocks the open segment between two points.
    /// Both ends are pulled in so the surfaces they lie on do not count.
    ///
    /// * `p0` - First point.
    /// * `p1` - Second point.
    pub fn occluded(&self, p0: &Point3f, p1: &Point3f) -> bool {
        let d = *p1 - *p0;
        let r = d.length();
        if r == 0.0 {
            return false;
        }
        let ray = Ray::segment(*p0, d / r, RAY_EPSILON, r * (1.0 - SHADOW_EPSILON));
        self.intersect_p(&ray)
    }
}
