//! Shape

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Intersection of a ray with a shape.
#[derive(Copy, Clone, Debug)]
pub struct ShapeHit {
    /// Ray parameter of the hit.
    pub t: Float,

    /// Hit point.
    pub p: Point3f,

    /// Geometric normal at `p`.
    pub n: Normal3f,

    /// Surface parametrization of `p`.
    pub uv: Point2f,
}

/// Shape trait provides common behavior for geometric surfaces.
pub trait Shape: Send + Sync {
    /// Returns the first intersection of a ray with the shape in
    /// `(ray.t_min, ray.t_max)`.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit>;

    /// Returns true if a ray intersects the shape in `(ray.t_min, ray.t_max)`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area.
    fn area(&self) -> Float;

    /// Uniformly samples a point on the surface and returns it with its
    /// normal.
    ///
    /// * `u` - Sample value in [0, 1)^2.
    fn sample_area(&self, u: &Point2f) -> (Point3f, Normal3f);

    /// Returns the area density of `sample_area()`.
    fn pdf(&self) -> Float {
        1.0 / self.area()
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;
