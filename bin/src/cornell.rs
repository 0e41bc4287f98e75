//! Built-in Cornell box

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::primitive::*;
use bdpt_core::primitives::*;
use bdpt_core::reflection::*;
use bdpt_core::scene::*;
use bdpt_core::shape::*;
use bdpt_core::spectrum::*;
use lights::*;
use shapes::*;
use std::sync::Arc;

/// Camera position.
pub const EYE: Point3f = Point3f {
    x: 2.78,
    y: 2.73,
    z: -8.0,
};

/// Point the camera looks at.
pub const LOOK_AT: Point3f = Point3f {
    x: 2.78,
    y: 2.73,
    z: 0.0,
};

/// Camera up vector.
pub const UP: Vector3f = Vector3f {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

/// Field of view in degrees.
pub const FOV: Float = 37.5;

/// Room coordinates use the published Cornell box data, scaled down to keep
/// ray epsilons meaningful.
const SCALE: Float = 0.01;

fn quad(origin: [Float; 3], e1: [Float; 3], e2: [Float; 3]) -> ArcShape {
    Arc::new(Quad::new(
        Point3f::new(origin[0], origin[1], origin[2]) * SCALE,
        Vector3f::new(e1[0], e1[1], e1[2]) * SCALE,
        Vector3f::new(e2[0], e2[1], e2[2]) * SCALE,
        false,
    ))
}

fn diffuse(shape: ArcShape, r: Spectrum) -> ArcPrimitive {
    Arc::new(GeometricPrimitive::new(
        shape,
        Some(Arc::new(LambertianReflection::new(r))),
        None,
    ))
}

/// Axis aligned box with its bottom centred at `(x, 0, z)`, rotated about y.
fn block(x: Float, z: Float, size: Float, height: Float, angle: Float, r: Spectrum) -> Vec<ArcPrimitive> {
    let (sin, cos) = radians(angle).sin_cos();
    let u = Vector3f::new(cos, 0.0, sin) * (size * SCALE);
    let v = Vector3f::new(-sin, 0.0, cos) * (size * SCALE);
    let h = Vector3f::new(0.0, height * SCALE, 0.0);
    let p0 = Point3f::new(x, 0.0, z) * SCALE - u * 0.5 - v * 0.5;
    let p1 = p0 + u;
    let p2 = p0 + v;
    let top = p0 + h;

    [
        Quad::new(top, v, u, false),
        Quad::new(p0, u, h, false),
        Quad::new(p0, h, v, false),
        Quad::new(p1, v, h, false),
        Quad::new(p2, h, u, false),
    ]
    .into_iter()
    .map(|q| diffuse(Arc::new(q), r))
    .collect()
}

/// Returns the classic Cornell box: a white room with a red left wall, a
/// green right wall, two white blocks and an area light under the ceiling.
pub fn build_scene() -> Scene {
    let white = Spectrum::from_rgb(0.725, 0.71, 0.68);
    let red = Spectrum::from_rgb(0.63, 0.065, 0.05);
    let green = Spectrum::from_rgb(0.14, 0.45, 0.091);
    let radiance = Spectrum::from_rgb(17.0, 12.0, 4.0);

    let mut prims = vec![
        // Floor, ceiling and back wall.
        diffuse(quad([0.0, 0.0, 0.0], [0.0, 0.0, 559.2], [556.0, 0.0, 0.0]), white),
        diffuse(quad([0.0, 548.8, 0.0], [556.0, 0.0, 0.0], [0.0, 0.0, 559.2]), white),
        diffuse(quad([0.0, 0.0, 559.2], [0.0, 548.8, 0.0], [556.0, 0.0, 0.0]), white),
        // Left (red) and right (green) walls.
        diffuse(quad([556.0, 0.0, 0.0], [0.0, 548.8, 0.0], [0.0, 0.0, 559.2]), red),
        diffuse(quad([0.0, 0.0, 0.0], [0.0, 0.0, 559.2], [0.0, 548.8, 0.0]), green),
    ];
    prims.extend(block(185.0, 169.0, 165.0, 165.0, -17.0, white));
    prims.extend(block(368.0, 351.0, 165.0, 330.0, 17.0, white));

    // The light faces down, just under the ceiling.
    let light_shape = quad([213.0, 548.0, 227.0], [130.0, 0.0, 0.0], [0.0, 0.0, 105.0]);
    let light: ArcLight = Arc::new(DiffuseAreaLight::new(radiance, Arc::clone(&light_shape)));
    prims.push(Arc::new(GeometricPrimitive::new(
        light_shape,
        Some(Arc::new(LambertianReflection::new(Spectrum::ZERO))),
        Some(Arc::clone(&light)),
    )));

    info!("Built Cornell box with {} primitives", prims.len());
    Scene::new(Arc::new(PrimitiveList::new(prims)), vec![light])
}
