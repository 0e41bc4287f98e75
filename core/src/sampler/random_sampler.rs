//! Random Sampler

use super::Sampler;
use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

/// Sampler that draws independent uniform values for every dimension.
#[derive(Clone)]
pub struct RandomSampler {
    /// The random number generator.
    rng: RNG,

    /// Number of samples generated for each pixel.
    samples_per_pixel: usize,

    /// Index of the current sample in the current pixel.
    current_pixel_sample_index: usize,
}

impl RandomSampler {
    /// Returns a new `RandomSampler`.
    ///
    /// * `samples_per_pixel` - Number of samples generated for each pixel.
    /// * `seed`              - Seed for the random number generator.
    pub fn new(samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            rng: RNG::new(seed),
            samples_per_pixel,
            current_pixel_sample_index: 0,
        }
    }
}

impl Sampler for RandomSampler {
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(self.samples_per_pixel, seed))
    }

    fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    fn start_pixel(&mut self, _p: &Point2i) {
        self.current_pixel_sample_index = 0;
    }

    fn start_next_sample(&mut self) -> bool {
        self.current_pixel_sample_index += 1;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    fn get_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }
}
