//! Path vertices

use super::{PathEdge, SurfaceHandler, TraceState};
use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::interaction::*;
use bdpt_core::light::*;
use bdpt_core::medium::*;
use bdpt_core::pbrt::*;
use bdpt_core::reflection::*;
use bdpt_core::sampling::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use std::fmt;

/// Kind of a path vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexType {
    /// Start of a light subpath; picks a point on an emitter.
    EmitterRoot,

    /// Start of a camera subpath; picks a point on the lens.
    CameraRoot,

    /// Point on an emitter that picks an emission direction.
    EmitterVertex,

    /// Point on the lens that picks a primary ray direction.
    CameraVertex,

    /// Scattering event on a surface.
    SurfaceVertex,

    /// Scattering event inside a medium.
    VolumeVertex,
}

/// Record of an emitter root.
#[derive(Copy, Clone, Debug)]
pub struct EmitterRootRecord {
    /// Point sampled on the emitter. Valid once the root has scattered.
    pub point: PositionSample,

    /// Probability of having picked this emitter.
    pub selection_pdf: Float,
}

/// Record of a camera root.
#[derive(Copy, Clone, Debug)]
pub struct CameraRootRecord {
    /// Point sampled on the lens. Valid once the root has scattered.
    pub point: PositionSample,

    /// Pixel the camera subpath is traced for.
    pub pixel: Point2i,
}

/// Record of a point on an emitter.
#[derive(Copy, Clone, Debug)]
pub struct EmitterRecord {
    /// The point on the emitter.
    pub point: PositionSample,

    /// Emission direction. Valid once the vertex has scattered.
    pub direction: DirectionSample,
}

/// Record of a point on the lens.
#[derive(Copy, Clone, Debug)]
pub struct CameraRecord {
    /// The point on the lens.
    pub point: PositionSample,

    /// Pixel the primary ray goes through.
    pub pixel: Point2i,

    /// Primary ray direction. Valid once the vertex has scattered.
    pub direction: DirectionSample,
}

/// Record of a surface hit.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceRecord<'a> {
    /// The hit.
    pub si: SurfaceInteraction<'a>,

    /// Scatter event in the local shading frame. `wo`, `pdf` and `throughput`
    /// are valid once the vertex has scattered.
    pub event: ScatterEvent,
}

/// Variant specific part of a vertex together with the capability that
/// services it.
#[derive(Copy, Clone)]
pub enum VertexRecord<'a> {
    EmitterRoot {
        emitter: &'a dyn Light,
        record: EmitterRootRecord,
    },
    CameraRoot {
        camera: &'a dyn Camera,
        record: CameraRootRecord,
    },
    Emitter {
        emitter: &'a dyn Light,
        record: EmitterRecord,
    },
    Camera {
        camera: &'a dyn Camera,
        record: CameraRecord,
    },
    Surface {
        bsdf: &'a dyn Bsdf,
        record: SurfaceRecord<'a>,
    },
    Volume {
        phase: &'a dyn PhaseFunction,
        record: VolumeScatterEvent,
    },
}

/// Result of a successful `PathVertex::scatter()`.
pub struct Scattered<'a> {
    /// The new vertex.
    pub vertex: PathVertex<'a>,

    /// Edge from the scattering vertex to the new vertex.
    pub edge: PathEdge,

    /// Backward area density of the scattering vertex's predecessor, now that
    /// the outgoing direction is known.
    pub prev_pdf_backward: Option<Float>,
}

/// A vertex on a camera or light subpath.
///
/// The lifetime `'a` is that of the scene whose emitters, camera and
/// scattering models the vertex borrows.
#[derive(Copy, Clone)]
pub struct PathVertex<'a> {
    /// Variant record.
    pub record: VertexRecord<'a>,

    /// Weight accumulated from the root up to, but excluding, this vertex.
    pub throughput: Spectrum,

    /// Area density of sampling this vertex from its predecessor.
    pub pdf_forward: Float,

    /// Area density of sampling this vertex from its successor.
    pub pdf_backward: Float,
}

impl<'a> PathVertex<'a> {
    /// Returns a new vertex with zero densities.
    ///
    /// * `record`     - Variant record.
    /// * `throughput` - Accumulated weight.
    pub fn new(record: VertexRecord<'a>, throughput: Spectrum) -> Self {
        Self {
            record,
            throughput,
            pdf_forward: 0.0,
            pdf_backward: 0.0,
        }
    }

    /// Returns the root of a light subpath.
    ///
    /// * `emitter`       - The emitter.
    /// * `selection_pdf` - Probability of having picked `emitter`.
    pub fn emitter_root(emitter: &'a dyn Light, selection_pdf: Float) -> Self {
        let record = EmitterRootRecord {
            point: PositionSample::default(),
            selection_pdf,
        };
        Self {
            record: VertexRecord::EmitterRoot { emitter, record },
            throughput: Spectrum::ONE,
            pdf_forward: selection_pdf,
            pdf_backward: 1.0,
        }
    }

    /// Returns the root of a camera subpath.
    ///
    /// * `camera` - The camera.
    /// * `pixel`  - The pixel to trace.
    pub fn camera_root(camera: &'a dyn Camera, pixel: Point2i) -> Self {
        let record = CameraRootRecord {
            point: PositionSample::default(),
            pixel,
        };
        Self {
            record: VertexRecord::CameraRoot { camera, record },
            throughput: Spectrum::ONE,
            pdf_forward: 1.0,
            pdf_backward: 1.0,
        }
    }

    /// Returns a vertex inside a participating medium.
    ///
    /// * `phase`      - The phase function.
    /// * `event`      - The scatter event.
    /// * `throughput` - Accumulated weight.
    pub fn volume(
        phase: &'a dyn PhaseFunction,
        event: VolumeScatterEvent,
        throughput: Spectrum,
    ) -> Self {
        Self::new(
            VertexRecord::Volume {
                phase,
                record: event,
            },
            throughput,
        )
    }

    /// Returns the kind of vertex.
    pub fn vertex_type(&self) -> VertexType {
        match self.record {
            VertexRecord::EmitterRoot { .. } => VertexType::EmitterRoot,
            VertexRecord::CameraRoot { .. } => VertexType::CameraRoot,
            VertexRecord::Emitter { .. } => VertexType::EmitterVertex,
            VertexRecord::Camera { .. } => VertexType::CameraVertex,
            VertexRecord::Surface { .. } => VertexType::SurfaceVertex,
            VertexRecord::Volume { .. } => VertexType::VolumeVertex,
        }
    }

    /// Returns the multiplicative weight of the sample taken at this vertex.
    pub fn weight(&self) -> Spectrum {
        match &self.record {
            VertexRecord::EmitterRoot { record, .. } => {
                if record.selection_pdf > 0.0 {
                    record.point.weight / record.selection_pdf
                } else {
                    Spectrum::ZERO
                }
            }
            VertexRecord::CameraRoot { record, .. } => record.point.weight,
            VertexRecord::Emitter { record, .. } => record.direction.weight,
            VertexRecord::Camera { record, .. } => record.direction.weight,
            VertexRecord::Surface { record, .. } => record.event.throughput,
            VertexRecord::Volume { record, .. } => record.throughput,
        }
    }

    /// Returns the density of the sample taken at this vertex; area density
    /// for roots, solid angle density otherwise.
    pub fn pdf(&self) -> Float {
        match &self.record {
            VertexRecord::EmitterRoot { record, .. } => record.point.pdf,
            VertexRecord::CameraRoot { record, .. } => record.point.pdf,
            VertexRecord::Emitter { record, .. } => record.direction.pdf,
            VertexRecord::Camera { record, .. } => record.direction.pdf,
            VertexRecord::Surface { record, .. } => record.event.pdf,
            VertexRecord::Volume { record, .. } => record.pdf,
        }
    }

    /// Returns the solid angle density of sampling the incoming direction
    /// from the outgoing one. Zero for roots and endpoints.
    pub fn reverse_pdf(&self) -> Float {
        match &self.record {
            VertexRecord::Surface { bsdf, record } => bsdf.pdf(&record.event.make_flipped_query()),
            VertexRecord::Volume { phase, record } => phase.pdf(&record.make_flipped_query()),
            _ => 0.0,
        }
    }

    /// Evaluates the local transport kernel towards `d` for the incoming
    /// direction the vertex was reached from.
    ///
    /// * `d` - Unit world space direction leaving the vertex.
    pub fn eval(&self, d: &Vector3f) -> Spectrum {
        match &self.record {
            VertexRecord::Emitter { emitter, record } => {
                emitter.eval_directional_emission(&record.point, d)
            }
            VertexRecord::Surface { bsdf, record } => {
                let event = &record.event;
                bsdf.eval(&event.make_warped_query(event.wi, event.frame.to_local(d)))
            }
            VertexRecord::Volume { phase, record } => {
                phase.eval(&record.make_warped_query(record.wi, *d))
            }
            _ => Spectrum::ZERO,
        }
    }

    /// Returns the position of the vertex. Roots have none and return the
    /// origin.
    pub fn pos(&self) -> Point3f {
        match &self.record {
            VertexRecord::EmitterRoot { .. } | VertexRecord::CameraRoot { .. } => Point3f::ZERO,
            VertexRecord::Emitter { record, .. } => record.point.p,
            VertexRecord::Camera { record, .. } => record.point.p,
            VertexRecord::Surface { record, .. } => record.si.hit.p,
            VertexRecord::Volume { record, .. } => record.p,
        }
    }

    /// Returns |cos| between the vertex normal and `d`; 1 for vertices
    /// without a normal.
    ///
    /// * `d` - Unit direction.
    pub fn cosine_factor(&self, d: &Vector3f) -> Float {
        match &self.record {
            VertexRecord::Emitter { record, .. } => record.point.ng.abs_dot(d),
            VertexRecord::Camera { record, .. } => record.point.ng.abs_dot(d),
            VertexRecord::Surface { record, .. } => record.si.hit.n.abs_dot(d),
            _ => 1.0,
        }
    }

    /// Recomputes the area densities of sampling `next` from this vertex
    /// (forward) and of sampling the predecessor from this vertex (backward,
    /// which belongs in the predecessor's `pdf_backward`), given the actual
    /// neighbours. Backward is `None` where it is undefined.
    ///
    /// * `prev`      - Predecessor and the edge from it to this vertex.
    /// * `next`      - Successor.
    /// * `next_edge` - Edge from this vertex to `next`.
    pub fn eval_pdfs(
        &self,
        prev: Option<(&PathVertex<'a>, &PathEdge)>,
        next: &PathVertex<'a>,
        next_edge: &PathEdge,
    ) -> (Float, Option<Float>) {
        let to_area = |pdf: Float| {
            solid_angle_to_area(pdf, next.cosine_factor(&next_edge.d), next_edge.r_sq)
        };

        match &self.record {
            VertexRecord::EmitterRoot { record, .. } => (record.point.pdf, None),
            VertexRecord::CameraRoot { record, .. } => (record.point.pdf, None),
            VertexRecord::Emitter { emitter, record } => (
                to_area(emitter.directional_pdf(&record.point, &next_edge.d)),
                Some(1.0),
            ),
            VertexRecord::Camera { camera, record } => (
                to_area(camera.direction_pdf(&record.point, &next_edge.d)),
                Some(1.0),
            ),
            VertexRecord::Surface { bsdf, record } => {
                let event = &record.event;
                let d_next = event.frame.to_local(&next_edge.d);
                let d_prev = prev.map_or(event.wi, |(_, e)| event.frame.to_local(&(-e.d)));

                let forward = to_area(bsdf.pdf(&event.make_warped_query(d_prev, d_next)));
                let backward = prev.map(|(p, e)| {
                    let pdf = bsdf.pdf(&event.make_warped_query(d_next, d_prev));
                    solid_angle_to_area(pdf, p.cosine_factor(&e.d), e.r_sq)
                });
                (forward, backward)
            }
            VertexRecord::Volume { phase, record } => {
                let d_next = next_edge.d;
                let d_prev = prev.map_or(record.wi, |(_, e)| -e.d);

                let forward = to_area(phase.pdf(&record.make_warped_query(d_prev, d_next)));
                let backward = prev.map(|(p, e)| {
                    let pdf = phase.pdf(&record.make_warped_query(d_next, d_prev));
                    solid_angle_to_area(pdf, p.cosine_factor(&e.d), e.r_sq)
                });
                (forward, backward)
            }
        }
    }

    /// Extends the path by one vertex. Returns `None` if the path ends here,
    /// in which case nothing is produced.
    ///
    /// * `scene`   - The scene.
    /// * `handler` - Local surface handler.
    /// * `state`   - Trace state of the path.
    /// * `prev`    - Predecessor and the edge from it to this vertex.
    pub fn scatter(
        &mut self,
        scene: &'a Scene,
        handler: &dyn SurfaceHandler,
        state: &mut TraceState<'_>,
        prev: Option<(&PathVertex<'a>, &PathEdge)>,
    ) -> Option<Scattered<'a>> {
        let (pdf, prev_pdf_backward) = match &mut self.record {
            VertexRecord::EmitterRoot { emitter, record } => {
                record.point = emitter.sample_position(&mut *state.sampler)?;
                let next = VertexRecord::Emitter {
                    emitter: *emitter,
                    record: EmitterRecord {
                        point: record.point,
                        direction: DirectionSample::default(),
                    },
                };
                return Some(self.root_successor(next));
            }
            VertexRecord::CameraRoot { camera, record } => {
                record.point = camera.sample_position(&mut *state.sampler)?;
                let next = VertexRecord::Camera {
                    camera: *camera,
                    record: CameraRecord {
                        point: record.point,
                        pixel: record.pixel,
                        direction: DirectionSample::default(),
                    },
                };
                return Some(self.root_successor(next));
            }
            VertexRecord::Emitter { emitter, record } => {
                record.direction = emitter.sample_direction(&mut *state.sampler, &record.point)?;
                state.ray = Ray::new(record.point.p, record.direction.d);
                (record.direction.pdf, Some(1.0))
            }
            VertexRecord::Camera { camera, record } => {
                record.direction =
                    camera.sample_direction(&mut *state.sampler, &record.point, &record.pixel)?;
                let mut ray = Ray::new(record.point.p, record.direction.d);
                ray.set_primary_ray(true);
                state.ray = ray;
                (record.direction.pdf, Some(1.0))
            }
            VertexRecord::Surface { bsdf, record } => {
                let scatter = handler.handle_surface(&mut record.event, &record.si, state);
                if !scatter.scattered {
                    return None;
                }

                let reverse_pdf = bsdf.pdf(&record.event.make_flipped_query());
                let prev_pdf_backward = prev
                    .map(|(p, e)| solid_angle_to_area(reverse_pdf, p.cosine_factor(&e.d), e.r_sq));
                (record.event.pdf, prev_pdf_backward)
            }
            // Participating media are not supported; volume vertices always
            // end the path.
            VertexRecord::Volume { .. } => return None,
        };

        let si = scene.intersect(&state.ray)?;
        let bsdf = si.bsdf()?;

        let event = handler.make_local_scatter_event(&si, &state.ray);
        let mut next = PathVertex::new(
            VertexRecord::Surface {
                bsdf,
                record: SurfaceRecord { si, event },
            },
            self.throughput * self.weight(),
        );
        state.bounce += 1;

        let edge = PathEdge::new(self, &next);
        next.pdf_forward = solid_angle_to_area(pdf, next.cosine_factor(&edge.d), edge.r_sq);

        Some(Scattered {
            vertex: next,
            edge,
            prev_pdf_backward,
        })
    }

    /// Returns the endpoint vertex following a root that has sampled its
    /// position.
    ///
    /// * `next` - Record of the endpoint.
    fn root_successor(&self, next: VertexRecord<'a>) -> Scattered<'a> {
        let mut vertex = PathVertex::new(next, self.throughput * self.weight());
        let edge = PathEdge::new(self, &vertex);
        vertex.pdf_forward = self.pdf();
        Scattered {
            vertex,
            edge,
            prev_pdf_backward: None,
        }
    }
}

impl<'a> fmt::Debug for PathVertex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathVertex")
            .field("type", &self.vertex_type())
            .field("pos", &self.pos())
            .field("throughput", &self.throughput)
            .field("pdf_forward", &self.pdf_forward)
            .field("pdf_backward", &self.pdf_backward)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdpt::fixtures::*;
    use crate::bdpt::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn all_vertices_of<'a>(path: &LightPath<'a>) -> Vec<PathVertex<'a>> {
        path.vertices().to_vec()
    }

    #[test]
    fn roots_report_their_positional_pdf() {
        let fixture = floor_under_light();
        let light = fixture.scene.lights[0].as_ref();
        let mut path = LightPath::new(2);
        path.start_emitter_path(light, 0.5);

        let mut sampler = RandomSampler::new(1, 11);
        path.trace_path(&fixture.scene, &PathScatter::new(4), &mut sampler);
        assert_eq!(path.len(), 2);

        let root = &path[0];
        assert_eq!(root.vertex_type(), VertexType::EmitterRoot);
        assert!(approx_eq!(Float, root.pdf(), 1.0 / fixture.light_area, epsilon = 1e-6));
        assert_eq!(root.pos(), Point3f::ZERO);
        assert_eq!(root.cosine_factor(&Vector3f::new(0.0, 1.0, 0.0)), 1.0);
        assert!(root.eval(&Vector3f::new(0.0, -1.0, 0.0)).is_black());

        // Root weight folds in the emitter selection probability.
        let expected = fixture.radiance * (PI * fixture.light_area / 0.5);
        assert!(approx_eq!(Float, root.weight()[0], expected[0], epsilon = 1e-4));

        let endpoint = &path[1];
        assert_eq!(endpoint.vertex_type(), VertexType::EmitterVertex);
        assert_eq!(endpoint.pdf_forward, root.pdf());
        assert_eq!(endpoint.throughput, root.weight());
        assert!(approx_eq!(Float, endpoint.pos().y, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn failing_root_produces_nothing() {
        let fixture = floor_under_light();
        let dark = DarkLight;
        let mut root = PathVertex::emitter_root(&dark, 1.0);

        let mut sampler = RandomSampler::new(1, 0);
        let mut state = TraceState::new(&mut sampler);
        let scattered = root.scatter(&fixture.scene, &PathScatter::new(4), &mut state, None);
        assert!(scattered.is_none());
        assert_eq!(state.bounce, 0);
    }

    #[test]
    fn volume_vertex_never_scatters() {
        let fixture = floor_under_light();
        let phase = HenyeyGreenstein::new(0.3);
        let event = VolumeScatterEvent::new(
            Point3f::new(0.0, 0.5, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
        );
        let mut vertex = PathVertex::volume(&phase, event, Spectrum::ONE);
        assert_eq!(vertex.vertex_type(), VertexType::VolumeVertex);
        assert_eq!(vertex.cosine_factor(&Vector3f::new(1.0, 0.0, 0.0)), 1.0);

        let handler = PathScatter::new(4);
        for seed in 0..16 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut state = TraceState::new(&mut sampler);
            assert!(vertex.scatter(&fixture.scene, &handler, &mut state, None).is_none());
            assert_eq!(state.bounce, 0);
        }

        // The phase function is still queried through the vertex.
        assert!(vertex.eval(&Vector3f::new(0.0, -1.0, 0.0))[0] > 0.0);
        assert!(vertex.reverse_pdf() > 0.0);
    }

    #[test]
    fn eval_pdfs_reproduces_stored_forward_pdfs() {
        let fixture = cornell_box();
        let handler = PathScatter::new(6);
        let mut checked = 0;

        for seed in 0..32 {
            let mut sampler = RandomSampler::new(1, seed);
            let mut camera_path = LightPath::new(8);
            camera_path.start_camera_path(&fixture.camera, Point2i::new(8, 8));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(8);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

            for path in [&camera_path, &emitter_path] {
                for i in 0..path.len() - 1 {
                    let (forward, _) = path[i].eval_pdfs(path.predecessor(i), &path[i + 1], path.edge(i));
                    let stored = path[i + 1].pdf_forward;
                    assert!(
                        approx_eq!(Float, forward, stored, epsilon = 1e-3 * stored.max(1e-3)),
                        "vertex {} of {:?}: {} != {}",
                        i,
                        path[i].vertex_type(),
                        forward,
                        stored
                    );
                    checked += 1;
                }

                // Backward densities written by successors match as well.
                for i in 1..path.len() - 1 {
                    let (_, backward) = path[i].eval_pdfs(path.predecessor(i), &path[i + 1], path.edge(i));
                    if let Some(backward) = backward {
                        let stored = path[i - 1].pdf_backward;
                        assert!(approx_eq!(Float, backward, stored, epsilon = 1e-3 * stored.max(1e-3)));
                    }
                }
            }
        }
        assert!(checked > 64);
    }

    #[test]
    fn throughput_accumulates_weights() {
        let fixture = cornell_box();
        let mut sampler = RandomSampler::new(1, 5);
        let mut path = LightPath::new(6);
        path.start_camera_path(&fixture.camera, Point2i::new(4, 12));
        path.trace_path(&fixture.scene, &PathScatter::new(4), &mut sampler);
        assert!(path.len() >= 3);

        let vertices = all_vertices_of(&path);
        for pair in vertices.windows(2) {
            let expected = pair[0].throughput * pair[0].weight();
            assert_eq!(pair[1].throughput, expected);
        }
        assert_eq!(vertices[1].vertex_type(), VertexType::CameraVertex);
        assert_eq!(vertices[2].vertex_type(), VertexType::SurfaceVertex);
    }

    proptest! {
        #[test]
        fn weights_and_pdfs_are_non_negative(seed in 0u64..500) {
            let fixture = cornell_box();
            let handler = PathScatter::new(5);
            let mut sampler = RandomSampler::new(1, seed);

            let mut camera_path = LightPath::new(7);
            camera_path.start_camera_path(&fixture.camera, Point2i::new((seed % 16) as i32, 3));
            camera_path.trace_path(&fixture.scene, &handler, &mut sampler);

            let mut emitter_path = LightPath::new(7);
            emitter_path.start_emitter_path(fixture.scene.lights[0].as_ref(), 1.0);
            emitter_path.trace_path(&fixture.scene, &handler, &mut sampler);

            for v in camera_path.vertices().iter().chain(emitter_path.vertices()) {
                prop_assert!(v.pdf() >= 0.0);
                prop_assert!(v.pdf_forward >= 0.0);
                prop_assert!(v.pdf_backward >= 0.0);
                prop_assert!(v.reverse_pdf() >= 0.0);
                let w = v.weight();
                prop_assert!(w[0] >= 0.0 && w[1] >= 0.0 && w[2] >= 0.0);
            }
        }
    }
}
