//! Common integrator helpers

use crate::geometry::*;
use crate::pbrt::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Returns a progress bar for `len` work items. A hidden progress bar is
/// returned when `quiet` is set.
///
/// * `len`   - Number of work items.
/// * `quiet` - Suppress output.
pub fn create_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=>-");

    let progress = ProgressBar::new(len);
    progress.set_style(style);
    progress
}

/// Splits an image into square tiles and returns the number of tiles in each
/// direction.
///
/// * `sample_bounds` - Image bounds in pixels.
/// * `tile_size`     - Edge length of a tile in pixels.
pub fn tile_counts(sample_bounds: &Bounds2i, tile_size: usize) -> Point2<usize> {
    let tile_size = max(1, tile_size) as Int;
    let extent_x = sample_bounds.p_max.x - sample_bounds.p_min.x;
    let extent_y = sample_bounds.p_max.y - sample_bounds.p_min.y;
    Point2 {
        x: max(0, (extent_x + tile_size - 1) / tile_size) as usize,
        y: max(0, (extent_y + tile_size - 1) / tile_size) as usize,
    }
}

/// Returns the pixel bounds of a tile.
///
/// * `tile_idx`      - Tile index in scanline order.
/// * `n_tiles`       - Number of tiles in each direction.
/// * `sample_bounds` - Image bounds in pixels.
/// * `tile_size`     - Edge length of a tile in pixels.
pub fn tile_bounds(
    tile_idx: usize,
    n_tiles: Point2<usize>,
    sample_bounds: &Bounds2i,
    tile_size: usize,
) -> Bounds2i {
    let tile_size = max(1, tile_size) as Int;
    let tile_x = (tile_idx % max(1, n_tiles.x)) as Int;
    let tile_y = (tile_idx / max(1, n_tiles.x)) as Int;

    let x0 = sample_bounds.p_min.x + tile_x * tile_size;
    let x1 = min(x0 + tile_size, sample_bounds.p_max.x);
    let y0 = sample_bounds.p_min.y + tile_y * tile_size;
    let y1 = min(y0 + tile_size, sample_bounds.p_max.y);
    Bounds2i::new(Point2i::new(x0, y0), Point2i::new(x1, y1))
}
