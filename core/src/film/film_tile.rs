//! Film Tile

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Stores contributions for pixels in a tile.
#[derive(Copy, Clone, Default)]
pub struct FilmTilePixel {
    /// Sum of weighted contributions from pixel samples.
    pub contrib_sum: Spectrum,

    /// Sum of filter weights.
    pub filter_weight_sum: Float,
}

/// Small film region rendered by a single thread and merged into the film
/// once finished.
pub struct FilmTile {
    /// Bounds of the tile in the image.
    pixel_bounds: Bounds2i,

    /// The pixels.
    pixels: Vec<FilmTilePixel>,
}

impl FilmTile {
    /// Returns a new `FilmTile`.
    ///
    /// * `pixel_bounds` - Bounds of the tile in the image.
    pub fn new(pixel_bounds: Bounds2i) -> Self {
        let n = max(0, pixel_bounds.area()) as usize;
        Self {
            pixel_bounds,
            pixels: vec![FilmTilePixel::default(); n],
        }
    }

    /// Adds a camera sample to the pixel it belongs to with a box filter.
    /// Samples with non-finite values are dropped.
    ///
    /// * `p`             - The pixel.
    /// * `l`             - Radiance estimate.
    /// * `sample_weight` - Weight of the sample.
    pub fn add_sample(&mut self, p: &Point2i, l: &Spectrum, sample_weight: Float) {
        if !self.pixel_bounds.contains_exclusive(p) {
            return;
        }
        if !l.is_finite() {
            warn!("Ignoring non-finite radiance {:?} for pixel ({}, {})", l, p.x, p.y);
            return;
        }

        let offset = self.get_pixel_offset(p);
        let pixel = &mut self.pixels[offset];
        pixel.contrib_sum += *l * sample_weight;
        pixel.filter_weight_sum += sample_weight;
    }

    /// Returns the offset of a pixel in the tile.
    ///
    /// * `p` - The pixel in image coordinates.
    pub fn get_pixel_offset(&self, p: &Point2i) -> usize {
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        ((p.y - self.pixel_bounds.p_min.y) * width + (p.x - self.pixel_bounds.p_min.x)) as usize
    }

    /// Returns the pixel data at a point in image coordinates.
    ///
    /// * `p` - The pixel in image coordinates.
    pub fn get_pixel(&self, p: &Point2i) -> &FilmTilePixel {
        &self.pixels[self.get_pixel_offset(p)]
    }

    /// Returns the bounds of the tile.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_outside_tile_are_ignored() {
        let mut tile = FilmTile::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2)));
        tile.add_sample(&Point2i::new(3, 0), &Spectrum::ONE, 1.0);
        assert!(tile.pixels.iter().all(|p| p.filter_weight_sum == 0.0));
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        let mut tile = FilmTile::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(1, 1)));
        tile.add_sample(&Point2i::new(0, 0), &Spectrum::new(Float::NAN), 1.0);
        tile.add_sample(&Point2i::new(0, 0), &Spectrum::new(Float::INFINITY), 1.0);
        assert_eq!(tile.get_pixel(&Point2i::new(0, 0)).filter_weight_sum, 0.0);
    }
}
