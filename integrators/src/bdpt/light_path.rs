//! Light paths

use super::{PathEdge, PathVertex, SurfaceHandler, TraceState, VertexRecord};
use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use std::ops::Index;

/// A camera or light subpath: vertices from the root outwards and the edges
/// between consecutive vertices. `edges[i]` connects `vertices[i]` and
/// `vertices[i + 1]`.
pub struct LightPath<'a> {
    /// Maximum number of vertices, roots included.
    max_length: usize,

    /// The vertices.
    vertices: Vec<PathVertex<'a>>,

    /// The edges.
    edges: Vec<PathEdge>,
}

impl<'a> LightPath<'a> {
    /// Returns an empty path.
    ///
    /// * `max_length` - Maximum number of vertices, roots included.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            vertices: Vec::with_capacity(max_length),
            edges: Vec::with_capacity(max_length.saturating_sub(1)),
        }
    }

    /// Clears the path and seeds it with a camera root.
    ///
    /// * `camera` - The camera.
    /// * `pixel`  - The pixel to trace.
    pub fn start_camera_path(&mut self, camera: &'a dyn Camera, pixel: Point2i) {
        self.clear();
        self.vertices.push(PathVertex::camera_root(camera, pixel));
    }

    /// Clears the path and seeds it with an emitter root.
    ///
    /// * `emitter`       - The emitter.
    /// * `selection_pdf` - Probability of having picked `emitter`.
    pub fn start_emitter_path(&mut self, emitter: &'a dyn Light, selection_pdf: Float) {
        self.clear();
        self.vertices.push(PathVertex::emitter_root(emitter, selection_pdf));
    }

    /// Grows the path from its last vertex until scattering fails or the path
    /// is full.
    ///
    /// * `scene`   - The scene.
    /// * `handler` - Local surface handler.
    /// * `sampler` - The sampler.
    pub fn trace_path(
        &mut self,
        scene: &'a Scene,
        handler: &dyn SurfaceHandler,
        sampler: &mut dyn Sampler,
    ) {
        let mut state = TraceState::new(sampler);

        while !self.vertices.is_empty() && self.vertices.len() < self.max_length {
            let n = self.vertices.len();
            let (head, tail) = self.vertices.split_at_mut(n - 1);
            let prev = head.last().zip(self.edges.last());

            let scattered = match tail[0].scatter(scene, handler, &mut state, prev) {
                Some(scattered) => scattered,
                None => break,
            };

            if let (Some(pdf), Some(p)) = (scattered.prev_pdf_backward, head.last_mut()) {
                p.pdf_backward = pdf;
            }
            self.vertices.push(scattered.vertex);
            self.edges.push(scattered.edge);
        }
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the edge from vertex `i` to vertex `i + 1`.
    ///
    /// * `i` - Index of the first vertex.
    pub fn edge(&self, i: usize) -> &PathEdge {
        &self.edges[i]
    }

    /// Returns the vertex before vertex `i` and the edge from it to `i`.
    ///
    /// * `i` - Vertex index.
    pub fn predecessor(&self, i: usize) -> Option<(&PathVertex<'a>, &PathEdge)> {
        if i == 0 {
            None
        } else {
            self.vertices.get(i - 1).zip(self.edges.get(i - 1))
        }
    }

    /// Returns the vertices.
    pub fn vertices(&self) -> &[PathVertex<'a>] {
        &self.vertices
    }

    /// Removes all vertices and edges.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    /// Connects a light subpath vertex `a` to a camera subpath vertex `b` and
    /// returns the unweighted contribution of the joined path. Zero if the
    /// vertices can not see each other.
    ///
    /// The kernels returned by `eval()` already include the projected cosine
    /// at each end, so the geometry term only divides by the squared distance.
    ///
    /// * `scene` - The scene.
    /// * `a`     - Vertex on the light subpath.
    /// * `b`     - Vertex on the camera subpath.
    pub fn connect(scene: &Scene, a: &PathVertex<'_>, b: &PathVertex<'_>) -> Spectrum {
        let edge = PathEdge::new(a, b);
        if edge.r_sq == 0.0 {
            return Spectrum::ZERO;
        }

        let contribution =
            a.throughput * a.eval(&edge.d) * b.eval(&(-edge.d)) * b.throughput / edge.r_sq;
        if contribution.is_black() || scene.occluded(&a.pos(), &b.pos()) {
            Spectrum::ZERO
        } else {
            contribution
        }
    }

    /// Connects the camera endpoint `a` directly to a light subpath vertex
    /// `b`. Returns the contribution and the pixel it lands on, or `None` if
    /// `a` is not on the camera, `b` is outside the image or the vertices can
    /// not see each other.
    ///
    /// * `scene`   - The scene.
    /// * `a`       - The camera endpoint.
    /// * `b`       - Vertex on the light subpath.
    /// * `sampler` - The sampler.
    pub fn connect_camera(
        scene: &Scene,
        a: &PathVertex<'_>,
        b: &PathVertex<'_>,
        sampler: &mut dyn Sampler,
    ) -> Option<(Spectrum, Point2i)> {
        let (camera, point) = match &a.record {
            VertexRecord::Camera { camera, record } => (*camera, record.point),
            _ => return None,
        };

        let edge = PathEdge::new(a, b);
        if edge.r_sq == 0.0 {
            return None;
        }

        let (importance, pixel) = camera.eval_direction(sampler, &point, &edge.d)?;
        if scene.occluded(&a.pos(), &b.pos()) {
            return None;
        }

        let weight = importance * a.throughput * b.eval(&(-edge.d)) * b.throughput / edge.r_sq;
        Some((weight, pixel))
    }

    /// Returns the balance heuristic weight of joining `emitter[s]` to
    /// `camera[t]` among all the ways of splitting the joined path into a
    /// light subpath and a camera subpath that each keep at least their
    /// endpoint.
    ///
    /// Splits that would join at either root are left out of the sum. Neither
    /// root is ever connected to, so counting them would make the weights of
    /// the strategies that are actually evaluated add up to less than one.
    /// The camera side therefore stops at `camera[2]` rather than
    /// `camera[1]`, which is where a sum over every split would end.
    ///
    /// * `camera`  - Camera subpath.
    /// * `emitter` - Light subpath.
    /// * `s`       - Index of the joined light subpath vertex.
    /// * `t`       - Index of the joined camera subpath vertex.
    pub fn mis_weight(camera: &LightPath<'a>, emitter: &LightPath<'a>, s: usize, t: usize) -> Float {
        let (pdf_forward, pdf_backward) = Self::joined_pdfs(camera, emitter, s, t);
        balance_weight(&pdf_forward, &pdf_backward, s, (s + t).saturating_sub(1))
    }

    /// Returns the forward and backward densities along the path formed by
    /// joining `emitter[s]` to `camera[t]`, ordered from the emitter root to
    /// the camera root.
    ///
    /// * `camera`  - Camera subpath.
    /// * `emitter` - Light subpath.
    /// * `s`       - Index of the joined light subpath vertex.
    /// * `t`       - Index of the joined camera subpath vertex.
    fn joined_pdfs(
        camera: &LightPath<'a>,
        emitter: &LightPath<'a>,
        s: usize,
        t: usize,
    ) -> (Vec<Float>, Vec<Float>) {
        let n_verts = s + t + 2;

        // The camera subpath runs the other way, so its forward and backward
        // densities swap.
        let mut pdf_forward = vec![0.0; n_verts];
        let mut pdf_backward = vec![0.0; n_verts];
        for i in 0..=s {
            pdf_forward[i] = emitter[i].pdf_forward;
            pdf_backward[i] = emitter[i].pdf_backward;
        }
        for i in 0..=t {
            pdf_forward[n_verts - 1 - i] = camera[i].pdf_backward;
            pdf_backward[n_verts - 1 - i] = camera[i].pdf_forward;
        }

        // Densities at the join follow from the new connecting edge.
        let edge = PathEdge::new(&emitter[s], &camera[t]);
        let (forward, backward) = emitter[s].eval_pdfs(emitter.predecessor(s), &camera[t], &edge);
        pdf_forward[s + 1] = forward;
        if let (true, Some(backward)) = (s > 0, backward) {
            pdf_backward[s - 1] = backward;
        }

        let (forward, backward) = camera[t].eval_pdfs(camera.predecessor(t), &emitter[s], &edge.reverse());
        pdf_backward[s] = forward;
        if let (true, Some(backward)) = (t > 0, backward) {
            pdf_forward[s + 2] = backward;
        }

        (pdf_forward, pdf_backward)
    }

    /// Appends a vertex and fills in the densities tracing would have stored,
    /// using the actual neighbours.
    ///
    /// * `vertex` - The vertex.
    #[cfg(test)]
    pub(crate) fn append(&mut self, mut vertex: PathVertex<'a>) {
        if let Some(last) = self.vertices.last() {
            let n = self.vertices.len();
            let edge = PathEdge::new(last, &vertex);
            let (forward, backward) = last.eval_pdfs(self.predecessor(n - 1), &vertex, &edge);
            vertex.pdf_forward = forward;
            if let (Some(backward), true) = (backward, n >= 2) {
                self.vertices[n - 2].pdf_backward = backward;
            }
            self.edges.push(edge);
        }
        self.vertices.push(vertex);
    }

    /// Keeps the first `len` vertices.
    ///
    /// * `len` - Number of vertices to keep.
    #[cfg(test)]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.vertices.truncate(len);
        self.edges.truncate(len.saturating_sub(1));
    }
}

/// Returns the reciprocal of the summed density ratios of moving the join at
/// `s` toward the camera up to slot `camera_end` and toward the emitter down
/// to slot 2.
///
/// * `pdf_forward`  - Forward densities along the joined path.
/// * `pdf_backward` - Backward densities along the joined path.
/// * `s`            - Index of the joined light subpath vertex.
/// * `camera_end`   - Last join slot on the camera side.
fn balance_weight(pdf_forward: &[Float], pdf_backward: &[Float], s: usize, camera_end: usize) -> Float {
    // A zero density in the denominator means this strategy can not produce
    // the joined path.
    let mut weight = 1.0;
    let mut pi = 1.0;
    for i in s..camera_end {
        if pdf_backward[i + 1] == 0.0 {
            return 0.0;
        }
        pi *= pdf_forward[i + 1] / pdf_backward[i + 1];
        weight += pi;
    }

    pi = 1.0;
    for i in (1..s).rev() {
        if pdf_forward[i + 1] == 0.0 {
            return 0.0;
        }
        pi *= pdf_backward[i + 1] / pdf_forward[i + 1];
        weight += pi;
    }

    let mis = 1.0 / weight;
    if mis.is_finite() {
        mis
    } else {
        0.0
    }
}

impl<'a> Index<usize> for LightPath<'a> {
    type Output = PathVertex<'a>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.vertices[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdpt::fixtures::*;
    use crate::bdpt::*;
    use float_cmp::approx_eq;

    /// Integral over the light of cos cos / r² for a point on the floor
    /// right under the centre of a square light of edge `a` at height `h`,
    /// divided by π.
    fn form_factor_under_square(a: Float, h: Float) -> Float {
        let x = a / (2.0 * h);
        let y = x;
        let corner = |x: Float, y: Float| {
            let sx = (1.0 + x * x).sqrt();
            let sy = (1.0 + y * y).sqrt();
            (x / sx * (y / sx).atan() + y / sy * (x / sy).atan()) / (2.0 * PI)
        };
        4.0 * corner(x, y)
    }

    #[test]
    fn direct_lighting_matches_analytic_integral() {
        let fixture = floor_under_light();
        let handler = PathScatter::new(4);
        let light = fixture.scene.lights[0].as_ref();
        let camera = fixture.narrow_camera();
        let mut sampler = RandomSampler::new(1, 42);

        let n = 4000;
        let mut sum = Spectrum::ZERO;
        for _ in 0..n {
            let mut camera_path = LightPath::new(3);
            camera_path.start_camera_path(&camera, Point2i::new(0, 0));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);
            assert_eq!(camera_path.len(), 3);

            let mut emitter_path = LightPath::new(2);
            emitter_path.start_emitter_path(light, 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);
            assert_eq!(emitter_path.len(), 2);

            sum += LightPath::connect(&fixture.scene, &emitter_path[1], &camera_path[2]);
        }

        let estimate = sum / n as Float;
        let expected = fixture.radiance[0] * fixture.albedo * form_factor_under_square(1.0, 1.0);
        assert!(approx_eq!(Float, expected, 0.2394, epsilon = 1e-3));
        assert!(
            (estimate[0] - expected).abs() < 0.03 * expected,
            "estimate {} expected {}",
            estimate[0],
            expected
        );
    }

    #[test]
    fn connect_is_zero_when_occluded() {
        let fixture = floor_under_light();
        let handler = PathScatter::new(4);
        let mut sampler = RandomSampler::new(1, 1);

        // A camera path that hits the floor from below can not see the light.
        let camera = fixture.camera_below_floor();
        let mut camera_path = LightPath::new(3);
        camera_path.start_camera_path(&camera, Point2i::new(0, 0));
        camera_path.trace_path(&fixture.scene, &handler, &mut sampler);
        assert_eq!(camera_path.len(), 3);

        let mut emitter_path = LightPath::new(2);
        emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
        emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

        assert!(LightPath::connect(&fixture.scene, &emitter_path[1], &camera_path[2]).is_black());
        assert!(LightPath::connect(&fixture.scene, &emitter_path[0], &camera_path[2]).is_black());
    }

    #[test]
    fn connect_camera_lands_inside_the_image() {
        let fixture = cornell_box();
        let handler = PathScatter::new(4);
        let resolution = fixture.camera.resolution;
        let mut landed = 0;

        for seed in 0..64 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut camera_path = LightPath::new(2);
            camera_path.start_camera_path(&fixture.camera, Point2i::new(0, 0));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(4);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

            for s in 1..emitter_path.len() {
                if let Some((weight, pixel)) =
                    LightPath::connect_camera(&fixture.scene, &camera_path[1], &emitter_path[s], &mut sampler)
                {
                    assert!(pixel.x >= 0 && pixel.x < resolution.x);
                    assert!(pixel.y >= 0 && pixel.y < resolution.y);
                    assert!(weight.is_finite());
                    landed += 1;
                }
            }

            // Only the camera endpoint can be connected to directly.
            assert!(LightPath::connect_camera(&fixture.scene, &camera_path[0], &emitter_path[1], &mut sampler).is_none());
            assert!(LightPath::connect_camera(&fixture.scene, &emitter_path[1], &camera_path[1], &mut sampler).is_none());
        }
        assert!(landed > 0);
    }

    #[test]
    fn connect_camera_rejects_points_behind_the_camera() {
        let fixture = floor_under_light();
        let handler = PathScatter::new(4);
        let mut sampler = RandomSampler::new(1, 9);

        // Looking away from the light.
        let camera = fixture.camera_facing_away();
        let mut camera_path = LightPath::new(2);
        camera_path.start_camera_path(&camera, Point2i::new(0, 0));
        camera_path.trace_path(&fixture.scene, &handler, &mut sampler);
        assert_eq!(camera_path.len(), 2);

        let mut emitter_path = LightPath::new(2);
        emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
        emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

        assert!(LightPath::connect_camera(&fixture.scene, &camera_path[1], &emitter_path[1], &mut sampler).is_none());
    }

    #[test]
    fn mis_weights_of_all_splits_sum_to_one() {
        let fixture = cornell_box();
        let handler = PathScatter::new(8);
        let mut found = 0;

        for seed in 0..200 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut traced_camera = LightPath::new(5);
            traced_camera.start_camera_path(&fixture.camera, Point2i::new(7, 9));
            traced_camera.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut traced_emitter = LightPath::new(2);
            traced_emitter.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            traced_emitter.trace_path(&fixture.scene, &handler, &mut sampler);
            if traced_camera.len() != 5 || traced_emitter.len() != 2 {
                continue;
            }

            // The joined path is light point, x3, x2, x1, eye. Rebuild it for
            // every split (s, t) with s + t = 5.
            let weights: Vec<Float> = (1..=4)
                .map(|s| {
                    let t = 5 - s;
                    let mut camera = LightPath::new(5);
                    for v in traced_camera.vertices() {
                        camera.append(*v);
                    }
                    camera.truncate(t + 1);

                    let mut emitter = LightPath::new(5);
                    for v in traced_emitter.vertices() {
                        emitter.append(*v);
                    }
                    for k in (t + 1..5).rev() {
                        emitter.append(traced_camera[k]);
                    }
                    assert_eq!(emitter.len(), s + 1);

                    LightPath::mis_weight(&camera, &emitter, s, t)
                })
                .collect();

            if weights.iter().any(|w| *w == 0.0) {
                // Some vertex can not be reached from one side.
                continue;
            }

            let total: Float = weights.iter().sum();
            assert!(weights.iter().all(|w| *w > 0.0 && *w <= 1.0));
            assert!(approx_eq!(Float, total, 1.0, epsilon = 1e-3), "weights {:?}", weights);
            found += 1;
        }
        assert!(found > 10);
    }

    #[test]
    fn root_splits_are_left_out_of_the_mis_weight() {
        let fixture = cornell_box();
        let handler = PathScatter::new(8);
        let mut differing = 0;

        for seed in 0..50 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut camera_path = LightPath::new(4);
            camera_path.start_camera_path(&fixture.camera, Point2i::new(8, 8));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(3);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);
            if camera_path.len() < 3 || emitter_path.len() < 2 {
                continue;
            }

            let (s, t) = (1, 2);
            let w = LightPath::mis_weight(&camera_path, &emitter_path, s, t);
            if w == 0.0 {
                continue;
            }

            // Summing over every split also moves the join onto camera[1].
            let (pdf_forward, pdf_backward) = LightPath::joined_pdfs(&camera_path, &emitter_path, s, t);
            let w_all = balance_weight(&pdf_forward, &pdf_backward, s, s + t);
            let root_split: Float = (s + 1..=s + t).map(|k| pdf_forward[k] / pdf_backward[k]).product();
            assert!(approx_eq!(Float, 1.0 / w_all, 1.0 / w + root_split, epsilon = 1e-3 / w));
            assert!(w_all <= w);

            if camera_path[1].pdf_backward > 0.0 {
                assert!(w_all < w, "seed {seed}: {w_all} vs {w}");
                differing += 1;
            } else {
                assert!(approx_eq!(Float, w_all, w, epsilon = 1e-6));
            }
        }
        assert!(differing > 0);
    }

    #[test]
    fn root_splits_match_when_camera_point_is_unreachable() {
        let fixture = floor_under_light();
        let handler = PathScatter::new(4);
        let camera = fixture.narrow_camera();

        for seed in 0..16 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut camera_path = LightPath::new(3);
            camera_path.start_camera_path(&camera, Point2i::new(0, 0));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(2);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

            if camera_path[1].pdf_backward != 0.0 {
                continue;
            }
            let (pdf_forward, pdf_backward) = LightPath::joined_pdfs(&camera_path, &emitter_path, 1, 2);
            let w_all = balance_weight(&pdf_forward, &pdf_backward, 1, 3);
            let w = LightPath::mis_weight(&camera_path, &emitter_path, 1, 2);
            assert!(approx_eq!(Float, w_all, w, epsilon = 1e-6));
        }
    }

    #[test]
    fn mis_weight_is_positive_for_direct_lighting() {
        let fixture = floor_under_light();
        let handler = PathScatter::new(4);
        let camera = fixture.narrow_camera();

        for seed in 0..32 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut camera_path = LightPath::new(3);
            camera_path.start_camera_path(&camera, Point2i::new(0, 0));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(2);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let w = LightPath::mis_weight(&camera_path, &emitter_path, 1, 2);
            assert!(w > 0.0 && w <= 1.0);

            // Light tracing the same floor point.
            let mut light_path = LightPath::new(3);
            light_path.append(emitter_path[0]);
            light_path.append(emitter_path[1]);
            light_path.append(camera_path[2]);
            let mut eye = LightPath::new(2);
            eye.append(camera_path[0]);
            eye.append(camera_path[1]);
            let w_light = LightPath::mis_weight(&eye, &light_path, 2, 1);
            assert!(w_light > 0.0);
            assert!(approx_eq!(Float, w + w_light, 1.0, epsilon = 1e-3));
        }
    }

    #[test]
    fn traced_edges_connect_consecutive_vertices() {
        let fixture = cornell_box();
        let mut sampler = RandomSampler::new(1, 2);
        let mut path = LightPath::new(6);
        path.start_camera_path(&fixture.camera, Point2i::new(3, 3));
        path.trace_path(&fixture.scene, &PathScatter::new(4), &mut sampler);
        assert!(path.len() > 2);
        assert!(!path.is_empty());

        for i in 1..path.len() - 1 {
            let edge = PathEdge::new(&path[i], &path[i + 1]);
            assert!(approx_eq!(Float, edge.r, path.edge(i).r, epsilon = 1e-4));
        }
        assert!(path.predecessor(0).is_none());
        assert!(path.predecessor(1).is_some());

        path.clear();
        assert!(path.is_empty());
    }
}
