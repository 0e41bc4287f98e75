//! Lambertian Reflection

use super::*;
use crate::sampling::*;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
#[derive(Clone)]
pub struct LambertianReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Reflectance spectrum which gives the fraction of incident light
    ///         that is scattered.
    pub fn new(r: Spectrum) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE,
            r,
        }
    }
}

impl Bsdf for LambertianReflection {
    fn sample(&self, event: &mut ScatterEvent, u: &Point2f) -> bool {
        if !event.requested_lobe.matches(BxDFType::BSDF_DIFFUSE) || event.wi.z <= 0.0 {
            return false;
        }

        event.wo = cosine_sample_hemisphere(u);
        event.pdf = cosine_hemisphere_pdf(event.wo.z);
        event.throughput = self.r;
        event.sampled_lobe = self.bxdf_type;
        event.pdf > 0.0
    }

    fn eval(&self, event: &ScatterEvent) -> Spectrum {
        if !event.requested_lobe.matches(BxDFType::BSDF_DIFFUSE)
            || event.wi.z <= 0.0
            || event.wo.z <= 0.0
        {
            return Spectrum::ZERO;
        }
        self.r * (INV_PI * event.wo.z)
    }

    fn pdf(&self, event: &ScatterEvent) -> Float {
        if !event.requested_lobe.matches(BxDFType::BSDF_DIFFUSE)
            || event.wi.z <= 0.0
            || event.wo.z <= 0.0
        {
            return 0.0;
        }
        cosine_hemisphere_pdf(event.wo.z)
    }
}
