//! Quads

use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::shape::*;

/// A parallelogram spanned by two edges from a corner.
#[derive(Clone, Debug)]
pub struct Quad {
    /// Corner of the quad.
    pub origin: Point3f,

    /// First edge; `u` runs along it.
    pub e1: Vector3f,

    /// Second edge; `v` runs along it.
    pub e2: Vector3f,

    /// Unit surface normal.
    pub n: Normal3f,

    /// Surface area.
    area: Float,

    /// Plane offset `n · origin`.
    offset: Float,
}

impl Quad {
    /// Create a new quad. The normal is `e1 × e2` unless `reverse_orientation`
    /// is set.
    ///
    /// * `origin`              - Corner of the quad.
    /// * `e1`                  - First edge.
    /// * `e2`                  - Second edge.
    /// * `reverse_orientation` - Flip the surface normal.
    pub fn new(origin: Point3f, e1: Vector3f, e2: Vector3f, reverse_orientation: bool) -> Self {
        let cross = e1.cross(&e2);
        let area = cross.length();
        if area == 0.0 {
            warn!("Degenerate quad at {}", origin);
        }

        let n = if area > 0.0 {
            Normal3f::from(cross / area)
        } else {
            Normal3f::new(0.0, 0.0, 1.0)
        };
        let n = if reverse_orientation { -n } else { n };
        let offset = n.dot(&Vector3f::from(origin));

        Self {
            origin,
            e1,
            e2,
            n,
            area,
            offset,
        }
    }

    /// Create an axis aligned rectangle centered at `center` from its two
    /// edges.
    ///
    /// * `center`              - Center of the rectangle.
    /// * `e1`                  - First edge.
    /// * `e2`                  - Second edge.
    /// * `reverse_orientation` - Flip the surface normal.
    pub fn centered(center: Point3f, e1: Vector3f, e2: Vector3f, reverse_orientation: bool) -> Self {
        Self::new(center - e1 * 0.5 - e2 * 0.5, e1, e2, reverse_orientation)
    }

    /// Returns the point at surface coordinates `(u, v)`.
    ///
    /// * `u` - Coordinate along `e1`.
    /// * `v` - Coordinate along `e2`.
    pub fn at(&self, u: Float, v: Float) -> Point3f {
        self.origin + self.e1 * u + self.e2 * v
    }
}

impl Shape for Quad {
    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        if self.area == 0.0 {
            return None;
        }

        let denom = self.n.dot(&r.d);
        if denom == 0.0 {
            return None;
        }

        let t = (self.offset - self.n.dot(&Vector3f::from(r.o))) / denom;
        if !(t > r.t_min && t < r.t_max) {
            return None;
        }

        // Solve p - origin = u e1 + v e2 in the plane.
        let p = r.at(t);
        let rel = p - self.origin;
        let cross = self.e1.cross(&self.e2);
        let inv = 1.0 / cross.length_squared();
        let u = rel.cross(&self.e2).dot(&cross) * inv;
        let v = self.e1.cross(&rel).dot(&cross) * inv;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        Some(ShapeHit {
            t,
            p,
            n: self.n,
            uv: Point2f::new(u, v),
        })
    }

    fn area(&self) -> Float {
        self.area
    }

    fn sample_area(&self, u: &Point2f) -> (Point3f, Normal3f) {
        (self.at(u.x, u.y), self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn unit_floor() -> Quad {
        Quad::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            false,
        )
    }

    #[test]
    fn normal_follows_edge_order() {
        let quad = unit_floor();
        assert_eq!(quad.n, Normal3f::new(0.0, 1.0, 0.0));
        assert!(approx_eq!(Float, quad.area(), 1.0, epsilon = 1e-6));

        let flipped = Quad::new(quad.origin, quad.e1, quad.e2, true);
        assert_eq!(flipped.n, Normal3f::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn ray_from_above_hits_center() {
        let quad = unit_floor();
        let ray = Ray::new(Point3f::new(0.5, 2.0, 0.25), Vector3f::new(0.0, -1.0, 0.0));
        let hit = quad.intersect(&ray).expect("hit");
        assert!(approx_eq!(Float, hit.t, 2.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, hit.uv.x, 0.25, epsilon = 1e-5));
        assert!(approx_eq!(Float, hit.uv.y, 0.5, epsilon = 1e-5));
    }

    #[test]
    fn ray_outside_or_parallel_misses() {
        let quad = unit_floor();
        let outside = Ray::new(Point3f::new(1.5, 2.0, 0.5), Vector3f::new(0.0, -1.0, 0.0));
        assert!(quad.intersect(&outside).is_none());

        let parallel = Ray::new(Point3f::new(0.5, 1.0, 0.5), Vector3f::new(1.0, 0.0, 0.0));
        assert!(!quad.intersect_p(&parallel));

        let short = Ray::segment(
            Point3f::new(0.5, 2.0, 0.5),
            Vector3f::new(0.0, -1.0, 0.0),
            1e-4,
            1.0,
        );
        assert!(quad.intersect(&short).is_none());
    }

    #[test]
    fn centered_quad_is_centered() {
        let quad = Quad::centered(
            Point3f::new(1.0, 2.0, 3.0),
            Vector3f::new(2.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 2.0),
            false,
        );
        let c = quad.at(0.5, 0.5);
        assert!(approx_eq!(Float, c.x, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, c.y, 2.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, c.z, 3.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, quad.pdf(), 0.25, epsilon = 1e-6));
    }

    proptest! {
        #[test]
        fn sampled_points_lie_on_quad(u in 0.0f32..1.0, v in 0.0f32..1.0) {
            let quad = unit_floor();
            let (p, n) = quad.sample_area(&Point2f::new(u, v));
            prop_assert_eq!(n, quad.n);
            prop_assert!(p.y.abs() < 1e-6);

            // Shooting straight down at the sample finds it again.
            let ray = Ray::new(Point3f::new(p.x, 1.0, p.z), Vector3f::new(0.0, -1.0, 0.0));
            let hit = quad.intersect(&ray);
            prop_assert!(hit.is_some());
        }
    }
}
