//! Small scenes shared by the unit tests.

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::primitive::*;
use bdpt_core::primitives::*;
use bdpt_core::reflection::*;
use bdpt_core::sampler::*;
use bdpt_core::sampling::*;
use bdpt_core::scene::*;
use bdpt_core::shape::*;
use bdpt_core::spectrum::*;
use cameras::*;
use lights::*;
use shapes::*;
use std::sync::Arc;

pub(crate) struct Fixture {
    pub scene: Scene,
    pub camera: PinholeCamera,
    pub radiance: Spectrum,
    pub albedo: Float,
    pub light_area: Float,
}

impl Fixture {
    /// Camera looking at the floor right under the light through a single
    /// pixel with a very small field of view.
    pub fn narrow_camera(&self) -> PinholeCamera {
        PinholeCamera::new(
            Point3f::new(3.0, 0.5, 0.0),
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            0.1,
            Point2i::new(1, 1),
        )
    }

    /// Camera under the floor looking up at its back side.
    pub fn camera_below_floor(&self) -> PinholeCamera {
        PinholeCamera::new(
            Point3f::new(0.3, -1.0, 0.2),
            Point3f::new(0.3, 0.0, 0.2),
            Vector3f::new(1.0, 0.0, 0.0),
            1.0,
            Point2i::new(1, 1),
        )
    }

    /// Camera beside the light looking away from it.
    pub fn camera_facing_away(&self) -> PinholeCamera {
        PinholeCamera::new(
            Point3f::new(0.0, 0.5, 3.0),
            Point3f::new(0.0, 0.5, 10.0),
            Vector3f::new(0.0, 1.0, 0.0),
            30.0,
            Point2i::new(1, 1),
        )
    }
}

fn quad(center: Point3f, e1: Vector3f, e2: Vector3f) -> ArcShape {
    Arc::new(Quad::centered(center, e1, e2, false))
}

fn diffuse(shape: ArcShape, r: Spectrum) -> ArcPrimitive {
    Arc::new(GeometricPrimitive::new(
        shape,
        Some(Arc::new(LambertianReflection::new(r))),
        None,
    ))
}

fn emitter(shape: ArcShape, radiance: Spectrum) -> (ArcPrimitive, ArcLight) {
    let light: ArcLight = Arc::new(DiffuseAreaLight::new(radiance, Arc::clone(&shape)));
    let prim: ArcPrimitive = Arc::new(GeometricPrimitive::new(
        shape,
        Some(Arc::new(LambertianReflection::new(Spectrum::ZERO))),
        Some(Arc::clone(&light)),
    ));
    (prim, light)
}

/// A white 10x10 floor at y = 0 under a 1x1 light at y = 1 facing down.
pub(crate) fn floor_under_light() -> Fixture {
    let radiance = Spectrum::new(1.0);
    let albedo = 1.0;

    let floor = diffuse(
        quad(
            Point3f::ZERO,
            Vector3f::new(0.0, 0.0, 10.0),
            Vector3f::new(10.0, 0.0, 0.0),
        ),
        Spectrum::new(albedo),
    );
    let (light_prim, light) = emitter(
        quad(
            Point3f::new(0.0, 1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        ),
        radiance,
    );

    let scene = Scene::new(
        Arc::new(PrimitiveList::new(vec![floor, light_prim])),
        vec![light],
    );

    Fixture {
        scene,
        camera: PinholeCamera::new(
            Point3f::new(0.0, 0.5, 3.0),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
            40.0,
            Point2i::new(4, 4),
        ),
        radiance,
        albedo,
        light_area: 1.0,
    }
}

/// A closed box spanning [-1, 1] x [0, 2] x [-1, 3] with a small ceiling light
/// and a 16x16 camera inside looking down -z.
pub(crate) fn cornell_box() -> Fixture {
    let white = Spectrum::new(0.725);
    let red = Spectrum::from_rgb(0.63, 0.065, 0.05);
    let green = Spectrum::from_rgb(0.14, 0.45, 0.091);
    let radiance = Spectrum::new(17.0);

    let x = Vector3f::new(1.0, 0.0, 0.0);
    let y = Vector3f::new(0.0, 1.0, 0.0);
    let z = Vector3f::new(0.0, 0.0, 1.0);

    let mut prims = vec![
        // Floor and ceiling.
        diffuse(quad(Point3f::new(0.0, 0.0, 1.0), z * 4.0, x * 2.0), white),
        diffuse(quad(Point3f::new(0.0, 2.0, 1.0), x * 2.0, z * 4.0), white),
        // Left and right.
        diffuse(quad(Point3f::new(-1.0, 1.0, 1.0), y * 2.0, z * 4.0), red),
        diffuse(quad(Point3f::new(1.0, 1.0, 1.0), z * 4.0, y * 2.0), green),
        // Back and front.
        diffuse(quad(Point3f::new(0.0, 1.0, -1.0), x * 2.0, y * 2.0), white),
        diffuse(quad(Point3f::new(0.0, 1.0, 3.0), y * 2.0, x * 2.0), white),
    ];

    // Normal of x × z points down.
    let (light_prim, light) = emitter(
        quad(Point3f::new(0.0, 1.99, 0.0), x * 0.5, z * 0.5),
        radiance,
    );
    prims.push(light_prim);

    Fixture {
        scene: Scene::new(Arc::new(PrimitiveList::new(prims)), vec![light]),
        camera: PinholeCamera::new(
            Point3f::new(0.0, 1.0, 2.5),
            Point3f::new(0.0, 1.0, 0.0),
            y,
            60.0,
            Point2i::new(16, 16),
        ),
        radiance,
        albedo: 0.725,
        light_area: 0.25,
    }
}

/// An emitter that never emits.
pub(crate) struct DarkLight;

impl Light for DarkLight {
    fn power(&self) -> Spectrum {
        Spectrum::ZERO
    }

    fn l(&self, _n: &Normal3f, _w: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    fn sample_position(&self, _sampler: &mut dyn Sampler) -> Option<PositionSample> {
        None
    }

    fn sample_direction(
        &self,
        _sampler: &mut dyn Sampler,
        _point: &PositionSample,
    ) -> Option<DirectionSample> {
        None
    }

    fn eval_directional_emission(&self, _point: &PositionSample, _d: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    fn directional_pdf(&self, _point: &PositionSample, _d: &Vector3f) -> Float {
        0.0
    }
}
