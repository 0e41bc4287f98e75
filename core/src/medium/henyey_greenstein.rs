//! Henyey-Greenstein

use super::*;

/// Henyey-Greenstein phase function.
#[derive(Clone)]
pub struct HenyeyGreenstein {
    /// The asymmetry parameter. It is the average value of the product of the
    /// phase function being approximated and the cosine of the angle between two
    /// directions. Isotropic phase functions use g = 0.
    pub g: Float,
}

impl HenyeyGreenstein {
    /// Returns a new `HenyeyGreenstein`.
    ///
    /// * `g` - The asymmetry parameter.
    pub fn new(g: Float) -> Self {
        Self { g }
    }
}

impl PhaseFunction for HenyeyGreenstein {
    fn eval(&self, event: &VolumeScatterEvent) -> Spectrum {
        Spectrum::new(phase_hg(event.wi.dot(&event.wo), self.g))
    }

    fn pdf(&self, event: &VolumeScatterEvent) -> Float {
        phase_hg(event.wi.dot(&event.wo), self.g)
    }

    fn sample(&self, event: &mut VolumeScatterEvent, u: &Point2f) -> bool {
        // Compute cos(theta) for Henyey-Greenstein sample
        let cos_theta = if abs(self.g) < 1e-3 {
            1.0 - 2.0 * u[0]
        } else {
            let sqr_term = (1.0 - self.g * self.g) / (1.0 + self.g - 2.0 * self.g * u[0]);
            -(1.0 + self.g * self.g - sqr_term * sqr_term) / (2.0 * self.g)
        };

        // Compute direction `wo` around `wi`
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * u[1];
        let (v1, v2) = coordinate_system(&event.wi);
        event.wo = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &v1, &v2, &event.wi);
        event.pdf = phase_hg(cos_theta, self.g);
        event.throughput = Spectrum::ONE;
        event.pdf > 0.0
    }
}

/// Computes the Henyey-Greenstein phase function. Both directions point away
/// from the scattering location.
///
/// * `cos_theta` - Cosine of the angle between the two directions.
/// * `g`         - The asymmetry parameter.
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g + 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}
