//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Render with `RGBSpectrum`.
pub type Spectrum = RGBSpectrum;
