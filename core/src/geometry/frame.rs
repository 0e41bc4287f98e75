//! Local shading frames

use super::*;

/// Orthonormal basis with `n` as the local z-axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Local x-axis.
    pub s: Vector3f,

    /// Local y-axis.
    pub t: Vector3f,

    /// Local z-axis.
    pub n: Vector3f,
}

impl Frame {
    /// Builds a frame around a unit normal.
    ///
    /// * `n` - The unit normal.
    pub fn from_normal(n: &Normal3f) -> Self {
        let n = Vector3f::from(*n);
        let (s, t) = coordinate_system(&n);
        Self { s, t, n }
    }

    /// Transforms a world space direction into the frame.
    ///
    /// * `v` - The direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Transforms a direction in the frame back to world space.
    ///
    /// * `v` - The local direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn to_world_inverts_to_local(
            nx in -1.0f32..1.0, ny in -1.0f32..1.0, nz in -1.0f32..1.0,
            vx in -1.0f32..1.0, vy in -1.0f32..1.0, vz in -1.0f32..1.0,
        ) {
            let n = Normal3f::new(nx, ny, nz);
            prop_assume!(n.length() > 0.1);
            let frame = Frame::from_normal(&n.normalize());
            let v = Vector3f::new(vx, vy, vz);
            let w = frame.to_world(&frame.to_local(&v));
            prop_assert!(approx_eq!(Float, v.x, w.x, epsilon = 1e-4));
            prop_assert!(approx_eq!(Float, v.y, w.y, epsilon = 1e-4));
            prop_assert!(approx_eq!(Float, v.z, w.z, epsilon = 1e-4));
        }
    }

    #[test]
    fn normal_maps_to_local_z() {
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let frame = Frame::from_normal(&n);
        let local = frame.to_local(&Vector3f::new(0.0, 1.0, 0.0));
        assert!(approx_eq!(Float, local.z, 1.0, epsilon = 1e-6));
    }
}
