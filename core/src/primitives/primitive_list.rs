//! Primitive Lists

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::primitive::*;
use crate::reflection::*;

/// Aggregate that tests every primitive in turn.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    /// The primitives.
    pub primitives: Vec<ArcPrimitive>,
}

impl PrimitiveList {
    /// Create a new list of primitives.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        Self { primitives }
    }
}

impl Primitive for PrimitiveList {
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        let mut closest = None;
        for primitive in self.primitives.iter() {
            if let Some(si) = primitive.intersect(r) {
                closest = Some(si);
            }
        }
        closest
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r))
    }

    fn get_area_light(&self) -> Option<&dyn Light> {
        None
    }

    fn get_bsdf(&self) -> Option<&dyn Bsdf> {
        None
    }
}
