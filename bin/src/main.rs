#[macro_use]
extern crate log;

use bdpt_core::app::*;
use bdpt_core::geometry::*;
use bdpt_core::integrator::*;
use bdpt_core::pbrt::*;
use cameras::*;
use clap::Parser;
use integrators::*;
use std::sync::Arc;

mod cornell;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = render(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let resolution = Point2i::new(options.x_resolution as Int, options.y_resolution as Int);
    if resolution.x <= 0 || resolution.y <= 0 {
        return Err(format!(
            "Invalid resolution {}x{}",
            options.x_resolution, options.y_resolution
        ));
    }

    let scene = cornell::build_scene();
    let camera = Arc::new(PinholeCamera::new(
        cornell::EYE,
        cornell::LOOK_AT,
        cornell::UP,
        cornell::FOV,
        resolution,
    ));

    let settings = BDPTSettings::from(options);
    info!("Rendering {}x{} with {:?}", resolution.x, resolution.y, settings);

    let integrator = BDPTIntegrator::new(camera, settings);
    let film = integrator.render(&scene);
    film.write_image(&options.image_file, integrator.splat_scale())
}
