use std::f64::consts::TAU;

use glam::DVec3;

use super::{OrbitControls, FRAMES_PER_ROUND};
use crate::camera::CameraRig;

//
// ──────────────────────────────────────────────────────────────
//   Gesture accessors
//
//   Pure accumulators: nothing is clamped here, `update` does it.
//   Each takes an explicit magnitude or `None` for the default.
// ──────────────────────────────────────────────────────────────
//

impl<C: CameraRig> OrbitControls<C>
{
  pub fn rotate_left(&mut self, angle: impl Into<Option<f64>>)
  {
    let angle = angle.into().unwrap_or_else(|| self.auto_rotation_angle());
    self.theta_delta -= angle;
  }

  pub fn rotate_right(&mut self, angle: impl Into<Option<f64>>)
  {
    let angle = angle.into().unwrap_or_else(|| self.auto_rotation_angle());
    self.theta_delta += angle;
  }

  pub fn rotate_up(&mut self, angle: impl Into<Option<f64>>)
  {
    let angle = angle.into().unwrap_or_else(|| self.auto_rotation_angle());
    self.phi_delta -= angle;
  }

  pub fn rotate_down(&mut self, angle: impl Into<Option<f64>>)
  {
    let angle = angle.into().unwrap_or_else(|| self.auto_rotation_angle());
    self.phi_delta += angle;
  }

  /// Dolly towards the centre: radius shrinks by `factor`.
  pub fn zoom_in(&mut self, factor: impl Into<Option<f64>>)
  {
    let factor = factor.into().unwrap_or_else(|| self.zoom_scale());
    self.scale *= factor;
  }

  /// Dolly away from the centre: radius grows by `1 / factor`.
  pub fn zoom_out(&mut self, factor: impl Into<Option<f64>>)
  {
    let factor = factor.into().unwrap_or_else(|| self.zoom_scale());
    self.scale /= factor;
  }

  /// Shift both the camera and the orbit centre.
  ///
  /// `distance` is camera-local; only its direction is used, the length
  /// of the shift is `user_pan_speed`. The centre moves immediately, the
  /// camera follows on the next `update`.
  pub fn pan(&mut self, distance: DVec3)
  {
    let shift = self.camera.transform_direction(distance) * self.config.user_pan_speed;

    self.pending_pan += shift;
    self.center += shift;
  }

  /// One frame of auto-rotation: a full turn every 3600 frames at speed 1.
  pub fn auto_rotation_angle(&self) -> f64
  {
    TAU / FRAMES_PER_ROUND * self.config.auto_rotate_speed
  }

  pub fn zoom_scale(&self) -> f64
  {
    0.95_f64.powf(self.config.user_zoom_speed)
  }
}

#[cfg(test)]
mod tests
{
  use approx::assert_relative_eq;

  use crate::camera::Camera;
  use crate::controls::OrbitControls;

  #[test]
  fn default_rotation_is_one_auto_rotate_frame()
  {
    let mut controls = OrbitControls::new(Camera::new(1.0));
    controls.rotate_right(None);

    assert_relative_eq!(controls.theta_delta(), std::f64::consts::TAU / 3600.0 * 2.0);
  }

  #[test]
  fn rotate_up_and_down_cancel()
  {
    let mut controls = OrbitControls::new(Camera::new(1.0));
    controls.rotate_up(0.3);
    controls.rotate_down(0.3);

    assert_eq!(controls.phi_delta(), 0.0);
  }

  #[test]
  fn zoom_is_multiplicative()
  {
    let mut controls = OrbitControls::new(Camera::new(1.0));
    controls.zoom_out(None);
    controls.zoom_out(None);
    controls.zoom_in(0.5);

    assert_relative_eq!(controls.scale(), 0.5 / (0.95 * 0.95), epsilon = 1e-12);
  }

  #[test]
  fn zoom_scale_follows_speed()
  {
    let mut controls = OrbitControls::new(Camera::new(1.0));
    controls.config.user_zoom_speed = 2.0;

    assert_relative_eq!(controls.zoom_scale(), 0.9025, epsilon = 1e-12);
  }
}
