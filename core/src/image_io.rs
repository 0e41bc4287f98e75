//! Image I/O

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use exr::prelude::*;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::path::Path;
use std::result::Result;

/// Stores RGB image data in scanline order.
#[derive(Clone)]
pub struct RGBImage {
    /// The pixels.
    pub pixels: Vec<RGBSpectrum>,

    /// Image resolution.
    pub resolution: Point2<usize>,
}

impl RGBImage {
    /// Creates a new `RGBImage` from pixel data.
    ///
    /// * `pixels` - RGB pixel data.
    /// * `width`  - Width of image.
    /// * `height` - Height of image.
    pub fn new(pixels: Vec<RGBSpectrum>, width: usize, height: usize) -> Self {
        assert_eq!(width * height, pixels.len());
        Self {
            pixels,
            resolution: Point2 { x: width, y: height },
        }
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get(&self, x: usize, y: usize) -> RGBSpectrum {
        self.pixels[y * self.resolution.x + x]
    }
}

/// Write an image. The format is picked from the file extension; `.exr`
/// keeps linear floating point values and `.png`/`.tga` are gamma corrected
/// 8-bit images.
///
/// * `path`  - Output file path.
/// * `image` - The image.
pub fn write_image(path: &str, image: &RGBImage) -> Result<(), String> {
    let res_x = image.resolution.x as u32;
    let res_y = image.resolution.y as u32;

    match get_extension_from_filename(path) {
        Some("exr") => write_exr(path, image),
        Some("tga") => write_8_bit(path, image, ImageFormat::Tga),
        Some("png") => write_8_bit(path, image, ImageFormat::Png),
        Some(extension) => Err(format!("Extension .{extension} is not supported")),
        None => Err(format!(
            "Can't determine file type from suffix of filename {path} ({res_x}x{res_y})"
        )),
    }
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|e| e.to_str())
}

/// Writes the image in OpenEXR format.
///
/// * `path`  - Output file path.
/// * `image` - The image.
fn write_exr(path: &str, image: &RGBImage) -> Result<(), String> {
    let res_x = image.resolution.x;
    let res_y = image.resolution.y;
    info!("Writing image {} with resolution {}x{}", path, res_x, res_y);

    let size = Vec2(res_x, res_y);

    let layer1 = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let c = image.get(pos.0, pos.1);
            (c[0], c[1], c[2])
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match Image::empty(attributes).with_layer(layer1).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `image`        - The image.
/// * `image_format` - Image format.
fn write_8_bit(path: &str, image: &RGBImage, image_format: ImageFormat) -> Result<(), String> {
    let res_x = image.resolution.x as u32;
    let res_y = image.resolution.y as u32;
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let mut imgbuf = ImageBuffer::new(res_x, res_y);
    for y in 0..res_y {
        for x in 0..res_x {
            let c = image.get(x as usize, y as usize);
            imgbuf.put_pixel(x, y, Rgb(apply_gamma(&c.to_rgb())));
        }
    }

    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Apply gamma correction and clamp to 8-bit range.
///
/// * `rgb` - Linear RGB values.
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}
