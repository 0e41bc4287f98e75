//! Geometric Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::primitive::*;
use crate::reflection::*;
use crate::shape::*;

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The scattering model.
    pub bsdf: Option<ArcBsdf>,

    /// Optional area light that describes emmission characterisitics if it
    /// emits light.
    pub area_light: Option<ArcLight>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`      - The shape.
    /// * `bsdf`       - The scattering model.
    /// * `area_light` - Optional area light that describes emmission
    ///                  characterisitics if it emits light.
    pub fn new(shape: ArcShape, bsdf: Option<ArcBsdf>, area_light: Option<ArcLight>) -> Self {
        Self {
            shape,
            bsdf,
            area_light,
        }
    }
}

impl Primitive for GeometricPrimitive {
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        let it = self.shape.intersect(r)?;
        r.t_max = it.t;
        Some(SurfaceInteraction::new(
            Hit::new(it.p, it.t, -r.d, it.n),
            it.uv,
            self,
        ))
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.shape.intersect_p(r)
    }

    fn get_area_light(&self) -> Option<&dyn Light> {
        self.area_light.as_deref()
    }

    fn get_bsdf(&self) -> Option<&dyn Bsdf> {
        self.bsdf.as_deref()
    }
}
