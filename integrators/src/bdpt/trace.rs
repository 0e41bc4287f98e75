//! Per path trace state and local surface scattering

use bdpt_core::geometry::*;
use bdpt_core::interaction::*;
use bdpt_core::pbrt::*;
use bdpt_core::reflection::*;
use bdpt_core::sampler::*;
use bdpt_core::spectrum::*;

/// Mutable state of one path being traced. Owned by the thread tracing it.
pub struct TraceState<'s> {
    /// The sampler.
    pub sampler: &'s mut dyn Sampler,

    /// The ray leaving the last vertex.
    pub ray: Ray,

    /// Number of scattering events so far.
    pub bounce: usize,

    /// Whether the last scattering event was purely specular.
    pub was_specular: bool,
}

impl<'s> TraceState<'s> {
    /// Returns a fresh state for a new path.
    ///
    /// * `sampler` - The sampler.
    pub fn new(sampler: &'s mut dyn Sampler) -> Self {
        Self {
            sampler,
            ray: Ray::default(),
            bounce: 0,
            was_specular: true,
        }
    }
}

/// Outcome of scattering at a surface hit.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceScatter {
    /// True if a new ray was produced.
    pub scattered: bool,

    /// Sample weight of the new direction.
    pub weight: Spectrum,

    /// Radiance emitted by the surface towards the incoming ray.
    pub emission: Spectrum,
}

/// Local surface handler used while growing paths.
pub trait SurfaceHandler: Send + Sync {
    /// Returns the scatter event at a hit, expressed in its shading frame.
    ///
    /// * `si`  - The surface interaction.
    /// * `ray` - The ray that produced the hit.
    fn make_local_scatter_event(&self, si: &SurfaceInteraction<'_>, ray: &Ray) -> ScatterEvent;

    /// Samples a new direction at the hit. On success the new ray is written
    /// into `state.ray`.
    ///
    /// * `event` - The scatter event from `make_local_scatter_event()`.
    /// * `si`    - The surface interaction.
    /// * `state` - The trace state.
    fn handle_surface(
        &self,
        event: &mut ScatterEvent,
        si: &SurfaceInteraction<'_>,
        state: &mut TraceState<'_>,
    ) -> SurfaceScatter;
}

/// Surface handler that samples the BSDF and stops after `max_bounces`
/// scattering events.
#[derive(Copy, Clone, Debug)]
pub struct PathScatter {
    /// Maximum number of scattering events.
    pub max_bounces: usize,
}

impl PathScatter {
    /// Create a new `PathScatter`.
    ///
    /// * `max_bounces` - Maximum number of scattering events.
    pub fn new(max_bounces: usize) -> Self {
        Self { max_bounces }
    }
}

impl SurfaceHandler for PathScatter {
    fn make_local_scatter_event(&self, si: &SurfaceInteraction<'_>, ray: &Ray) -> ScatterEvent {
        let wi = -ray.d;
        let n = face_forward(&si.hit.n, &wi);
        let frame = Frame::from_normal(&n);
        ScatterEvent::new(frame, frame.to_local(&wi))
    }

    fn handle_surface(
        &self,
        event: &mut ScatterEvent,
        si: &SurfaceInteraction<'_>,
        state: &mut TraceState<'_>,
    ) -> SurfaceScatter {
        let emission = si.le(&(-state.ray.d));
        let absorbed = SurfaceScatter {
            scattered: false,
            weight: Spectrum::ZERO,
            emission,
        };

        if state.bounce >= self.max_bounces {
            return absorbed;
        }

        let bsdf = match si.bsdf() {
            Some(bsdf) => bsdf,
            None => return absorbed,
        };

        let u = state.sampler.get_2d();
        if !bsdf.sample(event, &u) || event.pdf <= 0.0 || event.throughput.is_black() {
            return absorbed;
        }

        let wo = event.frame.to_world(&event.wo);
        state.ray = si.hit.spawn_ray(&wo);
        state.was_specular = event.sampled_lobe.is_pure_specular();

        SurfaceScatter {
            scattered: true,
            weight: event.throughput,
            emission,
        }
    }
}
