//! Application related stuff

use clap::Parser;

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Bidirectional path tracer", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "bdpt.png",
        help = "Write the final image to the given filename (.png, .tga or .exr)."
    )]
    pub image_file: String,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Samples per pixel.
    #[arg(
        long = "spp",
        short = 's',
        value_name = "NUM",
        default_value_t = 16,
        help = "Number of samples taken for each pixel."
    )]
    pub samples_per_pixel: usize,

    /// Maximum number of bounces of a full path.
    #[arg(
        long = "maxbounces",
        short = 'b',
        value_name = "NUM",
        default_value_t = 5,
        help = "Maximum number of scattering events on a full path."
    )]
    pub max_bounces: usize,

    /// Horizontal resolution.
    #[arg(long = "xresolution", value_name = "NUM", default_value_t = 256)]
    pub x_resolution: u32,

    /// Vertical resolution.
    #[arg(long = "yresolution", value_name = "NUM", default_value_t = 256)]
    pub y_resolution: u32,

    /// Seed for the per-tile samplers.
    #[arg(long, value_name = "NUM", default_value_t = 0)]
    pub seed: u64,

    /// Light selection strategy.
    #[arg(
        long = "lightsamplestrategy",
        value_name = "NAME",
        default_value = "power",
        help = "How light subpaths pick their emitter: 'power' or 'uniform'."
    )]
    pub light_sample_strategy: String,

    /// Write one image per connection strategy.
    #[arg(
        long = "visualizestrategies",
        help = "Also write the unweighted contribution of every (s, t) strategy to bdpt_dXX_sXX_tXX.exr."
    )]
    pub visualize_strategies: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
