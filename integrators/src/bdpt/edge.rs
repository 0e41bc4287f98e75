//! Path edges

use super::PathVertex;
use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;

/// Geometric relation between two consecutive path vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PathEdge {
    /// Unit direction from the first vertex to the second.
    pub d: Vector3f,

    /// Distance between the vertices.
    pub r: Float,

    /// Squared distance between the vertices.
    pub r_sq: Float,
}

impl PathEdge {
    /// Returns the edge from vertex `a` to vertex `b`.
    ///
    /// * `a` - Start vertex.
    /// * `b` - End vertex.
    pub fn new(a: &PathVertex<'_>, b: &PathVertex<'_>) -> Self {
        Self::between(&a.pos(), &b.pos())
    }

    /// Returns the edge from point `p` to point `q`. Coincident points give
    /// a zero edge.
    ///
    /// * `p` - Start point.
    /// * `q` - End point.
    pub fn between(p: &Point3f, q: &Point3f) -> Self {
        let v = *q - *p;
        let r_sq = v.length_squared();
        if r_sq == 0.0 || !r_sq.is_finite() {
            return Self::default();
        }

        let r = r_sq.sqrt();
        Self { d: v / r, r, r_sq }
    }

    /// Returns the same edge traversed in the opposite direction.
    pub fn reverse(&self) -> Self {
        Self { d: -self.d, ..*self }
    }
}
