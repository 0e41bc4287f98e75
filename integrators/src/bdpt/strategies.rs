//! Per strategy debug images

use bdpt_core::film::*;
use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::spectrum::*;

/// Unweighted contributions of every connection strategy `(s, t)` kept in a
/// separate image. `s` and `t` index the joined light and camera subpath
/// vertices, so a strategy produces paths with `s + t - 2` bounces.
pub struct StrategyImages {
    /// Maximum number of bounces covered.
    max_bounces: usize,

    /// One film per strategy, see `index()`.
    films: Vec<Film>,
}

impl StrategyImages {
    /// Returns blank images for all strategies up to `max_bounces`.
    ///
    /// * `resolution`  - Image resolution in pixels.
    /// * `max_bounces` - Maximum number of bounces.
    pub fn new(resolution: &Point2i, max_bounces: usize) -> Self {
        let count = (max_bounces + 1) * (max_bounces + 2) / 2;
        Self {
            max_bounces,
            films: (0..count).map(|_| Film::new(resolution)).collect(),
        }
    }

    /// Returns the image index of strategy `(s, t)` if it is covered.
    ///
    /// * `s` - Index of the joined light subpath vertex.
    /// * `t` - Index of the joined camera subpath vertex.
    pub fn index(&self, s: usize, t: usize) -> Option<usize> {
        if s == 0 || t == 0 {
            return None;
        }
        let d = s + t - 2;
        if d > self.max_bounces {
            None
        } else {
            Some(d * (d + 1) / 2 + s - 1)
        }
    }

    /// Adds a contribution of strategy `(s, t)` at a pixel.
    ///
    /// * `s`     - Index of the joined light subpath vertex.
    /// * `t`     - Index of the joined camera subpath vertex.
    /// * `pixel` - The pixel.
    /// * `value` - The contribution.
    pub fn add(&self, s: usize, t: usize, pixel: &Point2i, value: &Spectrum) {
        if let Some(i) = self.index(s, t) {
            self.films[i].add_splat(pixel, value);
        }
    }

    /// Returns the file name used for strategy `(s, t)`.
    ///
    /// * `s` - Index of the joined light subpath vertex.
    /// * `t` - Index of the joined camera subpath vertex.
    pub fn file_name(s: usize, t: usize) -> String {
        let d = (s + t).saturating_sub(2);
        format!("bdpt_d{d:02}_s{s:02}_t{t:02}.exr")
    }

    /// Writes all images to the working directory and returns how many were
    /// written.
    ///
    /// * `splat_scale` - Scale factor for contributions.
    pub fn write_images(&self, splat_scale: Float) -> Result<usize, String> {
        let mut written = 0;
        for d in 0..=self.max_bounces {
            for s in 1..=d + 1 {
                let t = d + 2 - s;
                if let Some(i) = self.index(s, t) {
                    self.films[i].write_image(&Self::file_name(s, t), splat_scale)?;
                    written += 1;
                }
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn indices_are_dense_and_unique() {
        let images = StrategyImages::new(&Point2i::new(2, 2), 3);
        let mut seen = vec![false; images.films.len()];
        for d in 0..=3 {
            for s in 1..=d + 1 {
                let i = images.index(s, d + 2 - s).expect("covered");
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|x| *x));
    }

    #[test]
    fn strategies_beyond_max_bounces_are_dropped() {
        let images = StrategyImages::new(&Point2i::new(2, 2), 2);
        assert!(images.index(3, 3).is_none());
        assert!(images.index(0, 2).is_none());
        assert!(images.index(2, 0).is_none());
        assert_eq!(images.index(1, 1), Some(0));

        // Out of range strategies are ignored.
        images.add(4, 4, &Point2i::new(0, 0), &Spectrum::ONE);
    }

    #[test]
    fn contributions_land_in_their_own_image() {
        let images = StrategyImages::new(&Point2i::new(2, 1), 1);
        images.add(1, 2, &Point2i::new(1, 0), &Spectrum::new(2.0));

        let i = images.index(1, 2).expect("covered");
        let image = images.films[i].image(0.5);
        assert!(approx_eq!(Float, image.get(1, 0)[0], 1.0, epsilon = 1e-6));
        assert_eq!(image.get(0, 0)[0], 0.0);

        let j = images.index(2, 1).expect("covered");
        assert_eq!(images.films[j].image(1.0).get(1, 0)[0], 0.0);
    }

    #[test]
    fn file_names_encode_the_strategy() {
        assert_eq!(StrategyImages::file_name(2, 3), "bdpt_d03_s02_t03.exr");
        assert_eq!(StrategyImages::file_name(1, 1), "bdpt_d00_s01_t01.exr");
    }
}
