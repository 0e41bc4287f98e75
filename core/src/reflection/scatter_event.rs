//! Surface scatter events

use super::BxDFType;
use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// A surface scattering query and, after sampling, its result. Directions
/// are in the local shading `frame` and point away from the surface.
#[derive(Copy, Clone, Debug)]
pub struct ScatterEvent {
    /// Local shading frame.
    pub frame: Frame,

    /// Direction towards the predecessor on the path.
    pub wi: Vector3f,

    /// Sampled or queried outgoing direction.
    pub wo: Vector3f,

    /// Sample weight; value * |cos wo| / pdf.
    pub throughput: Spectrum,

    /// Solid angle density of `wo`.
    pub pdf: Float,

    /// Lobes the query may scatter into.
    pub requested_lobe: BxDFType,

    /// Lobe picked by the last `sample`.
    pub sampled_lobe: BxDFType,
}

impl ScatterEvent {
    /// Returns a new event for a local incident direction.
    ///
    /// * `frame` - Local shading frame.
    /// * `wi`    - Local direction towards the predecessor.
    pub fn new(frame: Frame, wi: Vector3f) -> Self {
        Self {
            frame,
            wi,
            wo: Vector3f::ZERO,
            throughput: Spectrum::ONE,
            pdf: 1.0,
            requested_lobe: BxDFType::BSDF_ALL,
            sampled_lobe: BxDFType::empty(),
        }
    }

    /// Returns a query for an arbitrary pair of local directions sharing
    /// this event's frame.
    ///
    /// * `wi` - Local incident direction.
    /// * `wo` - Local outgoing direction.
    pub fn make_warped_query(&self, wi: Vector3f, wo: Vector3f) -> Self {
        Self {
            wi,
            wo,
            requested_lobe: BxDFType::BSDF_ALL,
            ..*self
        }
    }

    /// Returns the query with `wi` and `wo` swapped.
    pub fn make_flipped_query(&self) -> Self {
        self.make_warped_query(self.wo, self.wi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_query_swaps_directions() {
        let frame = Frame::from_normal(&Normal3f::new(0.0, 0.0, 1.0));
        let mut event = ScatterEvent::new(frame, Vector3f::new(0.0, 0.6, 0.8));
        event.wo = Vector3f::new(0.8, 0.0, 0.6);
        let flipped = event.make_flipped_query();
        assert_eq!(flipped.wi, event.wo);
        assert_eq!(flipped.wo, event.wi);
        assert_eq!(flipped.frame, event.frame);
    }
}
