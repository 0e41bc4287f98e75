//! Diffuse Area Light Source

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::sampling::*;
use bdpt_core::shape::*;
use bdpt_core::spectrum::*;
use std::sync::Arc;

/// Implements a basic one-sided area light source with uniform spatial and
/// directional radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit` - Emitted radiance.
    /// * `shape`  - Shape describing surface of the light source.
    pub fn new(l_emit: Spectrum, shape: ArcShape) -> Self {
        let area = shape.area();
        if area <= 0.0 {
            warn!("Area light with zero area will not emit");
        }
        Self {
            l_emit,
            shape: Arc::clone(&shape),
            area,
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        self.l_emit * self.area * PI
    }

    /// Returns the emitted radiance. Only the side the normal faces emits.
    ///
    /// * `n` - Surface normal at the emitting point.
    /// * `w` - Outgoing direction.
    fn l(&self, n: &Normal3f, w: &Vector3f) -> Spectrum {
        if n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }

    fn sample_position(&self, sampler: &mut dyn Sampler) -> Option<PositionSample> {
        if self.area <= 0.0 {
            return None;
        }

        let (p, ng) = self.shape.sample_area(&sampler.get_2d());
        let pdf = 1.0 / self.area;
        Some(PositionSample {
            p,
            ng,
            pdf,
            weight: self.l_emit * (PI / pdf),
        })
    }

    fn sample_direction(
        &self,
        sampler: &mut dyn Sampler,
        point: &PositionSample,
    ) -> Option<DirectionSample> {
        let local = cosine_sample_hemisphere(&sampler.get_2d());
        let pdf = cosine_hemisphere_pdf(local.z);
        if pdf <= 0.0 {
            return None;
        }

        let frame = Frame::from_normal(&point.ng);
        Some(DirectionSample {
            d: frame.to_world(&local).normalize(),
            pdf,
            weight: Spectrum::ONE,
        })
    }

    fn eval_directional_emission(&self, point: &PositionSample, d: &Vector3f) -> Spectrum {
        Spectrum::new(max(0.0, point.ng.dot(d)) * INV_PI)
    }

    fn directional_pdf(&self, point: &PositionSample, d: &Vector3f) -> Float {
        cosine_hemisphere_pdf(max(0.0, point.ng.dot(d)))
    }
}
