//! Pinhole Camera

use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::sampling::*;
use bdpt_core::spectrum::*;

/// Perspective camera with an infinitesimal aperture.
#[derive(Clone, Debug)]
pub struct PinholeCamera {
    /// Position of the eye.
    pub eye: Point3f,

    /// Camera space axes in world space; `n` is the view direction.
    pub frame: Frame,

    /// Image resolution in pixels.
    pub resolution: Point2i,

    /// Half extents of the image plane at unit distance.
    half_extent: Point2f,

    /// Area covered by the image plane at unit distance.
    a: Float,
}

impl PinholeCamera {
    /// Create a new pinhole camera. The field of view spans the shorter image
    /// axis.
    ///
    /// * `eye`        - Position of the eye.
    /// * `look_at`    - Point the camera looks at.
    /// * `up`         - Up vector.
    /// * `fov`        - The field-of-view angle in degrees.
    /// * `resolution` - Image resolution in pixels.
    pub fn new(
        eye: Point3f,
        look_at: Point3f,
        up: Vector3f,
        fov: Float,
        resolution: Point2i,
    ) -> Self {
        let forward = (look_at - eye).normalize();
        let mut right = forward.cross(&up);
        if right.length_squared() == 0.0 {
            warn!("Up vector is parallel to the view direction. Picking another.");
            right = coordinate_system(&forward).0;
        }
        let right = right.normalize();
        let up = right.cross(&forward);

        let fov = clamp(fov, 1e-3, 179.0);
        let tan_half = (radians(fov) / 2.0).tan();
        let aspect = resolution.x as Float / max(1, resolution.y) as Float;
        let half_extent = if aspect >= 1.0 {
            Point2f::new(tan_half * aspect, tan_half)
        } else {
            Point2f::new(tan_half, tan_half / aspect)
        };

        Self {
            eye,
            frame: Frame {
                s: right,
                t: up,
                n: forward,
            },
            resolution,
            half_extent,
            a: 4.0 * half_extent.x * half_extent.y,
        }
    }

    /// Maps a direction to continuous raster coordinates and the cosine with
    /// the view direction. Returns `None` for directions that do not point in
    /// front of the camera.
    ///
    /// * `d` - Unit direction leaving the eye.
    fn raster(&self, d: &Vector3f) -> Option<(Point2f, Float)> {
        let local = self.frame.to_local(d);
        if local.z <= 0.0 {
            return None;
        }

        let sx = local.x / local.z / self.half_extent.x;
        let sy = local.y / local.z / self.half_extent.y;
        let x = (sx + 1.0) * 0.5 * self.resolution.x as Float;
        let y = (1.0 - sy) * 0.5 * self.resolution.y as Float;
        Some((Point2f::new(x, y), local.z))
    }

    /// Returns the pixel containing continuous raster coordinates, if any.
    ///
    /// * `p` - Raster coordinates.
    fn pixel(&self, p: &Point2f) -> Option<Point2i> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let pixel = Point2i::new(p.x.floor() as Int, p.y.floor() as Int);
        let bounds = Bounds2i::new(Point2i::new(0, 0), self.resolution);
        if bounds.contains_exclusive(&pixel) {
            Some(pixel)
        } else {
            None
        }
    }

    /// Returns the importance for a direction making angle θ with the view
    /// direction, with the projected cosine at the eye folded in.
    ///
    /// * `cos_theta` - Cosine of θ.
    fn importance(&self, cos_theta: Float) -> Float {
        1.0 / (self.a * cos_theta * cos_theta * cos_theta)
    }
}

impl Camera for PinholeCamera {
    fn resolution(&self) -> Point2i {
        self.resolution
    }

    fn sample_position(&self, _sampler: &mut dyn Sampler) -> Option<PositionSample> {
        Some(PositionSample {
            p: self.eye,
            ng: Normal3f::from(self.frame.n),
            pdf: 1.0,
            weight: Spectrum::ONE,
        })
    }

    fn sample_direction(
        &self,
        sampler: &mut dyn Sampler,
        _point: &PositionSample,
        pixel: &Point2i,
    ) -> Option<DirectionSample> {
        let u = sampler.get_2d();
        let x = (pixel.x as Float + u.x) / self.resolution.x as Float;
        let y = (pixel.y as Float + u.y) / self.resolution.y as Float;
        let local = Vector3f::new(
            (2.0 * x - 1.0) * self.half_extent.x,
            (1.0 - 2.0 * y) * self.half_extent.y,
            1.0,
        )
        .normalize();

        Some(DirectionSample {
            d: self.frame.to_world(&local).normalize(),
            pdf: self.importance(local.z),
            weight: Spectrum::ONE,
        })
    }

    fn eval_direction(
        &self,
        _sampler: &mut dyn Sampler,
        _point: &PositionSample,
        d: &Vector3f,
    ) -> Option<(Spectrum, Point2i)> {
        let (raster, cos_theta) = self.raster(d)?;
        let pixel = self.pixel(&raster)?;
        Some((Spectrum::new(self.importance(cos_theta)), pixel))
    }

    fn direction_pdf(&self, _point: &PositionSample, d: &Vector3f) -> Float {
        match self.raster(d) {
            Some((raster, cos_theta)) if self.pixel(&raster).is_some() => {
                self.importance(cos_theta)
            }
            _ => 0.0,
        }
    }
}
