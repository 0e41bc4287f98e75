//! Splat Buffer

use crate::geometry::*;
use crate::parallel::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::atomic::Ordering;

/// Per-pixel RGB accumulator that many threads add to concurrently.
pub struct SplatBuffer {
    /// Resolution in pixels.
    resolution: Point2i,

    /// Three channels per pixel in scanline order.
    values: Vec<AtomicFloat>,
}

impl SplatBuffer {
    /// Returns a zeroed `SplatBuffer`.
    ///
    /// * `resolution` - Resolution in pixels.
    pub fn new(resolution: &Point2i) -> Self {
        let n = 3 * max(0, resolution.x * resolution.y) as usize;
        Self {
            resolution: *resolution,
            values: (0..n).map(|_| AtomicFloat::default()).collect(),
        }
    }

    /// Returns the offset of the first channel of a pixel, or `None` if it
    /// lies outside the buffer.
    ///
    /// * `p` - The pixel.
    fn offset(&self, p: &Point2i) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.resolution.x || p.y >= self.resolution.y {
            None
        } else {
            Some(3 * (p.y * self.resolution.x + p.x) as usize)
        }
    }

    /// Atomically adds a contribution to a pixel. Contributions with NaN,
    /// negative or infinite luminance and pixels outside the buffer are
    /// ignored.
    ///
    /// * `p` - The pixel.
    /// * `v` - The contribution.
    pub fn add_splat(&self, p: &Point2i, v: &Spectrum) {
        if v.has_nans() {
            warn!("Ignoring splatted spectrum with NaN values at ({}, {})", p.x, p.y);
            return;
        }

        let vy = v.y();
        if vy < 0.0 {
            warn!(
                "Ignoring splatted spectrum with negative luminance {} at ({}, {})",
                vy, p.x, p.y
            );
        } else if vy.is_infinite() {
            warn!(
                "Ignoring splatted spectrum with infinite luminance at ({}, {})",
                p.x, p.y
            );
        } else if let Some(offset) = self.offset(p) {
            for (i, colour) in v.c.iter().enumerate() {
                self.values[offset + i].add(*colour);
            }
        } else {
            warn!("Ignoring splat outside the image at ({}, {})", p.x, p.y);
        }
    }

    /// Returns the accumulated splat sum of a pixel.
    ///
    /// * `p` - The pixel.
    pub fn get(&self, p: &Point2i) -> Spectrum {
        match self.offset(p) {
            Some(offset) => Spectrum::from_rgb(
                self.values[offset].load(Ordering::Relaxed),
                self.values[offset + 1].load(Ordering::Relaxed),
                self.values[offset + 2].load(Ordering::Relaxed),
            ),
            None => Spectrum::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::thread;

    #[test]
    fn concurrent_splats_are_not_lost() {
        let splats = SplatBuffer::new(&Point2i::new(2, 2));
        let p = Point2i::new(1, 1);
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        splats.add_splat(&p, &Spectrum::new(0.5));
                    }
                });
            }
        });
        assert!(approx_eq!(Float, splats.get(&p)[0], 4000.0, epsilon = 1e-3));
        assert!(splats.get(&Point2i::new(0, 0)).is_black());
    }

    #[test]
    fn invalid_splats_are_ignored() {
        let splats = SplatBuffer::new(&Point2i::new(1, 1));
        let p = Point2i::new(0, 0);
        splats.add_splat(&p, &Spectrum::new(Float::NAN));
        splats.add_splat(&p, &Spectrum::new(-1.0));
        splats.add_splat(&p, &Spectrum::new(Float::INFINITY));
        splats.add_splat(&Point2i::new(5, 0), &Spectrum::ONE);
        assert!(splats.get(&p).is_black());
    }

    #[test]
    fn splats_outside_the_image_are_dropped() {
        let splats = SplatBuffer::new(&Point2i::new(2, 3));
        for p in [
            Point2i::new(-1, 0),
            Point2i::new(0, -1),
            Point2i::new(2, 0),
            Point2i::new(0, 3),
            Point2i::new(2, 3),
        ] {
            splats.add_splat(&p, &Spectrum::ONE);
            assert!(splats.get(&p).is_black());
        }

        // Nothing wrapped around into a neighbouring row.
        for y in 0..3 {
            for x in 0..2 {
                assert!(splats.get(&Point2i::new(x, y)).is_black());
            }
        }

        splats.add_splat(&Point2i::new(1, 2), &Spectrum::ONE);
        assert!(approx_eq!(Float, splats.get(&Point2i::new(1, 2))[0], 1.0, epsilon = 1e-6));
    }
}
