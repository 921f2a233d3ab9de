mod app;
mod camera;
mod input;
mod panel;
mod renderer;

use orbit_core::OrbitConfig;

fn main() -> anyhow::Result<()>
{
  // Initialise the logger so controller gesture logs and wgpu validation errors appear in the console.
  // Set RUST_LOG=orbit_core=debug to follow gestures, RUST_LOG=orbit_core=trace for every camera move.

  if std::env::var_os("RUST_LOG").is_none()
  {
    std::env::set_var("RUST_LOG", "info,wgpu_hal=off,naga=warn");
  }
  env_logger::init();

  // Optional first argument: path to an orbit config JSON file
  let config = match std::env::args().nth(1)
  {
    Some(path) => OrbitConfig::load(&path)?,
    None => OrbitConfig::default(),
  };

  app::run(config)
}
