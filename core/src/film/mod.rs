//! Film

use crate::geometry::*;
use crate::image_io::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod film_tile;
mod splat_buffer;

// Re-export.
pub use film_tile::*;
pub use splat_buffer::*;

/// Pixel data.
#[derive(Copy, Clone, Default)]
pub struct Pixel {
    /// Running weighted sum of RGB pixel contributions.
    pub rgb: [Float; 3],

    /// Sum of filter weight values for the sample contributions to the pixel.
    pub filter_weight_sum: Float,
}

/// Models the sensing device in a simulated camera. Camera subpath samples
/// are accumulated per pixel through `FilmTile`s and light subpath
/// contributions land in a shared `SplatBuffer`.
pub struct Film {
    /// The overall image resolution in pixels.
    pub full_resolution: Point2i,

    /// Bounds of the image in pixels.
    pub pixel_bounds: Bounds2i,

    /// Stores the image pixels.
    pixels: RwLock<Vec<Pixel>>,

    /// Unweighted sums of splatted contributions.
    pub splats: SplatBuffer,
}

impl Film {
    /// Create a new `Film` instance.
    ///
    /// * `resolution` - The overall image resolution in pixels.
    pub fn new(resolution: &Point2i) -> Self {
        let pixel_bounds = Bounds2i::new(Point2i::new(0, 0), *resolution);
        let n = pixel_bounds.area() as usize;
        Self {
            full_resolution: *resolution,
            pixel_bounds,
            pixels: RwLock::new(vec![Pixel::default(); n]),
            splats: SplatBuffer::new(resolution),
        }
    }

    /// Gets the pixel offset given its coordinates in the overall image.
    ///
    /// * `p` - The pixel coordinates.
    pub fn get_pixel_offset(&self, p: &Point2i) -> usize {
        debug_assert!(self.pixel_bounds.contains_exclusive(p));
        (p.x + p.y * self.full_resolution.x) as usize
    }

    /// Returns a `FilmTile` that stores the contributions for pixels in the
    /// specified region of the image.
    ///
    /// * `sample_bounds` - Tile region in the overall image.
    pub fn get_film_tile(&self, sample_bounds: Bounds2i) -> FilmTile {
        FilmTile::new(sample_bounds.intersect(&self.pixel_bounds))
    }

    /// Merge the `FilmTile`'s pixel contribution into the image.
    ///
    /// * `tile` - The `FilmTile` to merge.
    pub fn merge_film_tile(&self, tile: &FilmTile) {
        let mut pixels = self.write_pixels();
        for pixel in tile.get_pixel_bounds() {
            let tile_pixel = tile.get_pixel(&pixel);
            let merge_pixel = &mut pixels[self.get_pixel_offset(&pixel)];
            for (i, colour) in tile_pixel.contrib_sum.c.iter().enumerate() {
                merge_pixel.rgb[i] += *colour;
            }
            merge_pixel.filter_weight_sum += tile_pixel.filter_weight_sum;
        }
    }

    /// Adds a light subpath contribution to a pixel. Contributions with NaN,
    /// negative or infinite luminance are ignored.
    ///
    /// * `p` - The pixel.
    /// * `v` - The contribution.
    pub fn add_splat(&self, p: &Point2i, v: &Spectrum) {
        self.splats.add_splat(p, v);
    }

    /// Returns the final image. Each pixel is the filtered average of its
    /// camera samples plus `splat_scale` times its splat sum.
    ///
    /// * `splat_scale` - Scale factor for splats.
    pub fn image(&self, splat_scale: Float) -> RGBImage {
        info!("Converting image to RGB and computing final weighted pixel values");

        let pixels = self.read_pixels();
        let data: Vec<RGBSpectrum> = self
            .pixel_bounds
            .into_iter()
            .map(|p| {
                let pixel = &pixels[self.get_pixel_offset(&p)];
                let mut rgb = RGBSpectrum::from_rgb(pixel.rgb[0], pixel.rgb[1], pixel.rgb[2]);
                if pixel.filter_weight_sum != 0.0 {
                    rgb /= pixel.filter_weight_sum;
                }
                rgb + self.splats.get(&p) * splat_scale
            })
            .collect();

        RGBImage::new(
            data,
            self.full_resolution.x as usize,
            self.full_resolution.y as usize,
        )
    }

    /// Write the image to an output file.
    ///
    /// * `path`        - Output file path.
    /// * `splat_scale` - Scale factor for splats.
    pub fn write_image(&self, path: &str, splat_scale: Float) -> Result<(), String> {
        write_image(path, &self.image(splat_scale))
    }

    fn read_pixels(&self) -> RwLockReadGuard<'_, Vec<Pixel>> {
        match self.pixels.read() {
            Ok(pixels) => pixels,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_pixels(&self) -> RwLockWriteGuard<'_, Vec<Pixel>> {
        match self.pixels.write() {
            Ok(pixels) => pixels,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn image_averages_samples_and_scales_splats() {
        let film = Film::new(&Point2i::new(2, 1));
        let mut tile = film.get_film_tile(Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 1)));
        tile.add_sample(&Point2i::new(0, 0), &Spectrum::new(1.0), 1.0);
        tile.add_sample(&Point2i::new(0, 0), &Spectrum::new(3.0), 1.0);
        film.merge_film_tile(&tile);
        film.add_splat(&Point2i::new(1, 0), &Spectrum::new(4.0));

        let image = film.image(0.5);
        assert!(approx_eq!(Float, image.get(0, 0)[0], 2.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, image.get(1, 0)[0], 2.0, epsilon = 1e-6));
    }

    #[test]
    fn film_tile_is_clipped_to_image() {
        let film = Film::new(&Point2i::new(4, 4));
        let tile = film.get_film_tile(Bounds2i::new(Point2i::new(2, 2), Point2i::new(8, 8)));
        assert_eq!(tile.get_pixel_bounds().p_max, Point2i::new(4, 4));
    }
}
