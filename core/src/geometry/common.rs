//! Common geometry functions

use super::*;
use crate::pbrt::*;
use num_traits::Num;
use std::ops::Neg;

/// Trait to support dot products.
pub trait Dot<T> {
    /// Output type of the dot product.
    type Output;

    /// Returns the dot product.
    ///
    /// * `other` - The other operand.
    fn dot(&self, other: &T) -> Self::Output;

    /// Returns the absolute value of the dot product.
    ///
    /// * `other` - The other operand.
    fn abs_dot(&self, other: &T) -> Self::Output
    where
        Self::Output: Num + Neg<Output = Self::Output> + PartialOrd + Copy,
    {
        abs(self.dot(other))
    }
}

/// Trait to support cross products.
pub trait Cross<T> {
    /// Output type of the cross product.
    type Output;

    /// Returns the cross product.
    ///
    /// * `other` - The other operand.
    fn cross(&self, other: &T) -> Self::Output;
}

/// Construct a local coordinate system given only a single 3D vector.
/// Returns two vectors that together with `v1` form an orthonormal basis.
///
/// * `v1` - The unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

/// Returns a direction from spherical coordinates expressed in a coordinate
/// frame.
///
/// * `sin_theta` - Sine of polar angle.
/// * `cos_theta` - Cosine of polar angle.
/// * `phi`       - Azimuth angle.
/// * `x`         - Basis vector for the x-axis.
/// * `y`         - Basis vector for the y-axis.
/// * `z`         - Basis vector for the z-axis.
pub fn spherical_direction_in_coord_frame(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    sin_theta * phi.cos() * *x + sin_theta * phi.sin() * *y + cos_theta * *z
}

/// Flips a normal so it lies in the same hemisphere as a vector.
///
/// * `n` - The normal.
/// * `v` - The reference vector.
pub fn face_forward(n: &Normal3f, v: &Vector3f) -> Normal3f {
    if n.dot(v) < 0.0 {
        -*n
    } else {
        *n
    }
}
