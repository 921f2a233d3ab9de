use std::f64::consts::PI;

use egui::{DragValue, Slider};
use orbit_core::{CameraRig, OrbitControls};

const DEFAULT_MAX_DISTANCE: f64 = 100.0;

//
// ──────────────────────────────────────────────────────────────
//   Options panel: live view of the controller configuration
// ──────────────────────────────────────────────────────────────
//

pub fn show(ctx: &egui::Context, controls: &mut OrbitControls)
{
  egui::Window::new("Orbit").default_pos([12.0, 12.0]).resizable(false).show(ctx, |ui| {
    config_section(ui, controls);

    ui.separator();

    let eye = controls.camera().position();
    let center = controls.center;
    ui.label(format!("camera  {:>7.2} {:>7.2} {:>7.2}", eye.x, eye.y, eye.z));
    ui.label(format!("centre  {:>7.2} {:>7.2} {:>7.2}", center.x, center.y, center.z));
    ui.label(format!("gesture {:?}", controls.state()));
  });
}

fn config_section(ui: &mut egui::Ui, controls: &mut OrbitControls)
{
  let config = &mut controls.config;

  ui.checkbox(&mut config.enabled, "Enabled");
  ui.separator();

  ui.checkbox(&mut config.user_rotate, "Rotate");
  ui.add(Slider::new(&mut config.user_rotate_speed, 0.1..=5.0).text("rotate speed"));

  ui.checkbox(&mut config.user_zoom, "Zoom");
  ui.add(Slider::new(&mut config.user_zoom_speed, 0.1..=5.0).text("zoom speed"));

  ui.checkbox(&mut config.user_pan, "Pan (arrow keys)");
  ui.add(Slider::new(&mut config.user_pan_speed, 0.1..=10.0).text("pan speed"));

  ui.checkbox(&mut config.auto_rotate, "Auto-rotate");
  ui.add(Slider::new(&mut config.auto_rotate_speed, -10.0..=10.0).text("auto speed"));

  ui.separator();

  ui.add(Slider::new(&mut config.min_polar_angle, 0.0..=PI).text("min polar"));
  ui.add(Slider::new(&mut config.max_polar_angle, 0.0..=PI).text("max polar"));
  if config.min_polar_angle > config.max_polar_angle
  {
    config.max_polar_angle = config.min_polar_angle;
  }

  ui.horizontal(|ui| {
    ui.label("min distance");
    ui.add(DragValue::new(&mut config.min_distance).speed(0.1).range(0.0..=1000.0));
  });

  let mut bounded = config.max_distance.is_finite();
  ui.horizontal(|ui| {
    ui.checkbox(&mut bounded, "max distance");

    if bounded
    {
      if !config.max_distance.is_finite()
      {
        config.max_distance = DEFAULT_MAX_DISTANCE.max(config.min_distance);
      }
      ui.add(DragValue::new(&mut config.max_distance).speed(0.1).range(0.0..=1000.0));
    }
    else
    {
      config.max_distance = f64::INFINITY;
    }
  });

  if config.min_distance > config.max_distance
  {
    config.max_distance = config.min_distance;
  }
}
