//! Rays

use super::*;
use crate::pbrt::*;
use std::fmt;

/// A semi-infinite line with a parametric range.
#[derive(Copy, Clone, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Start of the valid parametric range.
    pub t_min: Float,

    /// End of the valid parametric range.
    pub t_max: Float,

    /// Set for rays leaving the camera.
    pub primary: bool,
}

impl Ray {
    /// Returns a ray leaving a point. The parametric range starts slightly
    /// past the origin so surfaces do not intersect themselves.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        Self::segment(o, d, RAY_EPSILON, INFINITY)
    }

    /// Returns a ray restricted to `[t_min, t_max]`.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_min` - Start of the parametric range.
    /// * `t_max` - End of the parametric range.
    pub fn segment(o: Point3f, d: Vector3f, t_min: Float, t_max: Float) -> Self {
        Self {
            o,
            d,
            t_min,
            t_max,
            primary: false,
        }
    }

    /// Returns the point at parameter `t`.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Marks the ray as leaving the camera.
    ///
    /// * `primary` - Whether this is a primary ray.
    pub fn set_primary_ray(&mut self, primary: bool) {
        self.primary = primary;
    }
}

impl fmt::Debug for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[o={}, d={}, t=({}, {}), primary={}]",
            self.o, self.d, self.t_min, self.t_max, self.primary
        )
    }
}
