//! Bi-directional Path Tracer

use bdpt_core::app::Options;
use bdpt_core::camera::*;
use bdpt_core::film::*;
use bdpt_core::geometry::*;
use bdpt_core::integrator::*;
use bdpt_core::light_distrib::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::sampling::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use std::thread;

mod edge;
#[cfg(test)]
mod fixtures;
mod light_path;
mod strategies;
mod trace;
mod vertex;

// Re-export.
pub use edge::*;
pub use light_path::*;
pub use strategies::*;
pub use trace::*;
pub use vertex::*;

/// Largest number of bounces supported when writing per strategy images.
const MAX_VISUALIZED_BOUNCES: usize = 5;

/// Render settings.
#[derive(Clone, Debug)]
pub struct BDPTSettings {
    /// Maximum number of scattering events on a full path.
    pub max_bounces: usize,

    /// Samples per pixel.
    pub samples_per_pixel: usize,

    /// Edge length of a tile in pixels.
    pub tile_size: usize,

    /// Number of worker threads.
    pub n_threads: usize,

    /// Seed for the per-tile samplers.
    pub seed: u64,

    /// How light subpaths pick their emitter.
    pub light_sample_strategy: LightSampleStategy,

    /// Write one image per connection strategy.
    pub visualize_strategies: bool,

    /// Hide the progress bar.
    pub quiet: bool,
}

impl Default for BDPTSettings {
    fn default() -> Self {
        Self {
            max_bounces: 5,
            samples_per_pixel: 16,
            tile_size: 16,
            n_threads: 1,
            seed: 0,
            light_sample_strategy: LightSampleStategy::Power,
            visualize_strategies: false,
            quiet: false,
        }
    }
}

impl From<&Options> for BDPTSettings {
    /// Returns settings from command line options.
    ///
    /// * `options` - The options.
    fn from(options: &Options) -> Self {
        let mut max_bounces = options.max_bounces;
        if options.visualize_strategies && max_bounces > MAX_VISUALIZED_BOUNCES {
            warn!("visualizestrategies was enabled, limiting maxbounces to {MAX_VISUALIZED_BOUNCES}");
            max_bounces = MAX_VISUALIZED_BOUNCES;
        }

        let samples_per_pixel = if options.samples_per_pixel == 0 {
            warn!("spp must be at least 1. Using 1.");
            1
        } else {
            options.samples_per_pixel
        };

        Self {
            max_bounces,
            samples_per_pixel,
            tile_size: max(1, options.tile_size),
            n_threads: options.threads(),
            seed: options.seed,
            light_sample_strategy: LightSampleStategy::from(options.light_sample_strategy.as_str()),
            visualize_strategies: options.visualize_strategies,
            quiet: options.quiet,
        }
    }
}

/// Implements bi-directional path tracing.
pub struct BDPTIntegrator {
    /// The camera.
    camera: ArcCamera,

    /// Render settings.
    settings: BDPTSettings,
}

impl BDPTIntegrator {
    /// Create a new `BDPTIntegrator`.
    ///
    /// * `camera`   - The camera.
    /// * `settings` - Render settings.
    pub fn new(camera: ArcCamera, settings: BDPTSettings) -> Self {
        Self { camera, settings }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &BDPTSettings {
        &self.settings
    }

    /// Render a tile of the image.
    ///
    /// * `tile_idx`      - Unique tile index.
    /// * `n_tiles`       - Number of tiles in (x, y) direction.
    /// * `scene`         - Scene.
    /// * `sample_bounds` - Sample bounds.
    /// * `light_distr`   - Emitter selection distribution.
    /// * `film`          - The film.
    /// * `strategies`    - Per strategy images, if enabled.
    #[allow(clippy::too_many_arguments)]
    fn render_tile(
        &self,
        tile_idx: usize,
        n_tiles: Point2<usize>,
        scene: &Scene,
        sample_bounds: &Bounds2i,
        light_distr: Option<&Distribution1D>,
        film: &Film,
        strategies: Option<&StrategyImages>,
    ) -> FilmTile {
        let bounds = tile_bounds(tile_idx, n_tiles, sample_bounds, self.settings.tile_size);
        info!("Starting image tile {tile_idx} -> {bounds:?}");

        // Seeds of different tiles and different base seeds never collide.
        let tile_count = (n_tiles.x * n_tiles.y) as u64;
        let seed = self
            .settings
            .seed
            .wrapping_mul(tile_count)
            .wrapping_add(tile_idx as u64);
        let mut sampler = RandomSampler::new(self.settings.samples_per_pixel, seed);

        let mut tracer = BidirectionalPathTracer::new(
            scene,
            self.camera.as_ref(),
            self.settings.max_bounces,
            light_distr,
            &film.splats,
            strategies,
        );

        let mut film_tile = film.get_film_tile(bounds);
        for pixel in bounds {
            sampler.start_pixel(&pixel);
            loop {
                let l = tracer.trace_sample(&pixel, &mut sampler);
                film_tile.add_sample(&pixel, &l, 1.0);

                if !sampler.start_next_sample() {
                    break;
                }
            }
        }

        film_tile
    }
}

impl Integrator for BDPTIntegrator {
    /// Render the scene.
    ///
    /// * `scene` - The scene.
    fn render(&self, scene: &Scene) -> Film {
        let resolution = self.camera.resolution();
        let film = Film::new(&resolution);

        // Partition the image into tiles.
        let sample_bounds = film.pixel_bounds;
        let n_tiles = tile_counts(&sample_bounds, self.settings.tile_size);
        let tile_count = n_tiles.x * n_tiles.y;

        let strategies = if self.settings.visualize_strategies {
            Some(StrategyImages::new(&resolution, self.settings.max_bounces))
        } else {
            None
        };

        let progress = create_progress_bar(tile_count as u64, self.settings.quiet);
        progress.set_message("Rendering scene");

        if scene.lights.is_empty() {
            warn!("Scene has no lights. The image will be black.");
            progress.inc(tile_count as u64);
        } else {
            let light_distribution =
                create_light_sample_distribution(self.settings.light_sample_strategy, scene);
            let n_threads = max(1, self.settings.n_threads);

            thread::scope(|scope| {
                let (tx, rx) = crossbeam_channel::bounded(n_threads);

                // Spawn worker threads.
                for _ in 0..n_threads {
                    let rxc = rx.clone();
                    let progress = &progress;
                    let film = &film;
                    let light_distr = light_distribution.lookup();
                    let strategies = strategies.as_ref();
                    scope.spawn(move || {
                        for tile_idx in rxc.iter() {
                            let film_tile = self.render_tile(
                                tile_idx,
                                n_tiles,
                                scene,
                                &sample_bounds,
                                light_distr,
                                film,
                                strategies,
                            );

                            // Merge image tile into `Film`.
                            film.merge_film_tile(&film_tile);
                            progress.inc(1);
                        }
                    });
                }
                drop(rx); // Each worker holds its own receiver.

                // Send work.
                for tile_idx in 0..tile_count {
                    if tx.send(tile_idx).is_err() {
                        error!("All render workers stopped; tile {tile_idx} not rendered");
                        break;
                    }
                }
            });
        }

        if let Some(strategies) = &strategies {
            progress.set_message("Writing strategy images");
            match strategies.write_images(self.splat_scale()) {
                Ok(count) => info!("Wrote {count} strategy images"),
                Err(err) => error!("{err}"),
            }
        }

        progress.finish_with_message("Render complete");
        film
    }

    fn splat_scale(&self) -> Float {
        1.0 / max(1, self.settings.samples_per_pixel) as Float
    }
}

/// Per thread tracer that owns one camera and one light subpath and reuses
/// them for every sample.
pub struct BidirectionalPathTracer<'a> {
    /// The scene.
    scene: &'a Scene,

    /// The camera.
    camera: &'a dyn Camera,

    /// Local surface handler.
    handler: PathScatter,

    /// Emitter selection distribution. `None` disables light subpaths.
    light_distr: Option<&'a Distribution1D>,

    /// Receives light tracing contributions.
    splats: &'a SplatBuffer,

    /// Per strategy images, if enabled.
    strategies: Option<&'a StrategyImages>,

    /// Maximum number of scattering events on a full path.
    max_bounces: usize,

    /// Camera subpath.
    camera_path: LightPath<'a>,

    /// Light subpath.
    emitter_path: LightPath<'a>,
}

impl<'a> BidirectionalPathTracer<'a> {
    /// Create a new `BidirectionalPathTracer`.
    ///
    /// * `scene`       - The scene.
    /// * `camera`      - The camera.
    /// * `max_bounces` - Maximum number of scattering events on a full path.
    /// * `light_distr` - Emitter selection distribution.
    /// * `splats`      - Receives light tracing contributions.
    /// * `strategies`  - Per strategy images, if enabled.
    pub fn new(
        scene: &'a Scene,
        camera: &'a dyn Camera,
        max_bounces: usize,
        light_distr: Option<&'a Distribution1D>,
        splats: &'a SplatBuffer,
        strategies: Option<&'a StrategyImages>,
    ) -> Self {
        Self {
            scene,
            camera,
            handler: PathScatter::new(max_bounces),
            light_distr,
            splats,
            strategies,
            max_bounces,
            camera_path: LightPath::new(max_bounces + 2),
            emitter_path: LightPath::new(max_bounces + 2),
        }
    }

    /// Traces one sample for a pixel. Returns the radiance estimate carried
    /// by the camera subpath; light tracing contributions go to the splat
    /// buffer instead.
    ///
    /// * `pixel`   - The pixel.
    /// * `sampler` - The sampler.
    pub fn trace_sample(&mut self, pixel: &Point2i, sampler: &mut dyn Sampler) -> Spectrum {
        let scene = self.scene;

        self.emitter_path.clear();
        if let Some(distr) = self.light_distr {
            let (index, selection_pdf, _) = distr.sample_discrete(sampler.get_1d());
            if let (true, Some(light)) = (selection_pdf > 0.0, scene.lights.get(index)) {
                self.emitter_path.start_emitter_path(light.as_ref(), selection_pdf);
                self.emitter_path.trace_path(scene, &self.handler, sampler);
            }
        }

        self.camera_path.start_camera_path(self.camera, *pixel);
        self.camera_path.trace_path(scene, &self.handler, sampler);

        let mut l = Spectrum::ZERO;
        for (s, t) in iproduct!(1..self.emitter_path.len(), 1..self.camera_path.len()) {
            if s + t - 2 > self.max_bounces {
                continue;
            }

            if t == 1 {
                let (contribution, splat_pixel) = match LightPath::connect_camera(
                    scene,
                    &self.camera_path[1],
                    &self.emitter_path[s],
                    sampler,
                ) {
                    Some(splat) => splat,
                    None => continue,
                };
                if contribution.is_black() {
                    continue;
                }

                let mis = LightPath::mis_weight(&self.camera_path, &self.emitter_path, s, t);
                trace!("Splat s: {s}, t: {t}, pixel: {splat_pixel}, L: {contribution:?}, mis_weight: {mis}");
                self.splats.add_splat(&splat_pixel, &(contribution * mis));
                if let Some(strategies) = self.strategies {
                    strategies.add(s, t, &splat_pixel, &contribution);
                }
            } else {
                let contribution =
                    LightPath::connect(scene, &self.emitter_path[s], &self.camera_path[t]);
                if contribution.is_black() {
                    continue;
                }

                let mis = LightPath::mis_weight(&self.camera_path, &self.emitter_path, s, t);
                trace!("Connect s: {s}, t: {t}, L: {contribution:?}, mis_weight: {mis}");
                l += contribution * mis;
                if let Some(strategies) = self.strategies {
                    strategies.add(s, t, pixel, &contribution);
                }
            }
        }

        debug!("Sample at {pixel}: L {l:?}");
        l
    }
}
