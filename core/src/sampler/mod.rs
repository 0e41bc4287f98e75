//! Sampler

mod random_sampler;

use crate::geometry::*;
use crate::pbrt::*;

// Re-export
pub use random_sampler::*;

/// Sampler interface.
pub trait Sampler: Send {
    /// Generates a new instance of an initial `Sampler` for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator (if any).
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler>;

    /// Returns the number of samples generated for each pixel.
    fn samples_per_pixel(&self) -> usize;

    /// This should be called when the rendering algorithm is ready to start working on a given pixel.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i);

    /// Advances to the next sample of the current pixel. Returns false once
    /// all samples for the pixel have been taken.
    fn start_next_sample(&mut self) -> bool;

    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f {
        let x = self.get_1d();
        let y = self.get_1d();
        Point2f::new(x, y)
    }
}
