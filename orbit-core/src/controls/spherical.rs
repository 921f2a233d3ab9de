use std::f64::consts::PI;

use glam::DVec3;

use super::{OrbitControls, EPS};
use crate::camera::CameraRig;
use crate::config::OrbitConfig;

//
// ──────────────────────────────────────────────────────────────
//   Spherical coordinates, polar axis +Y
//
//     theta  = azimuth, angle from +Z around +Y
//     phi    = polar angle, angle from +Y
//     radius = distance from the centre
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical
{
  pub radius: f64,
  pub phi: f64,
  pub theta: f64,
}

impl Spherical
{
  pub fn from_offset(offset: DVec3) -> Self
  {
    Self {
      radius: offset.length(),
      phi: offset.x.hypot(offset.z).atan2(offset.y),
      theta: offset.x.atan2(offset.z),
    }
  }

  pub fn to_offset(self) -> DVec3
  {
    let sin_phi = self.phi.sin();

    DVec3::new(
      self.radius * sin_phi * self.theta.sin(),
      self.radius * self.phi.cos(),
      self.radius * sin_phi * self.theta.cos(),
    )
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Per-frame recompute
// ──────────────────────────────────────────────────────────────
//

impl<C: CameraRig> OrbitControls<C>
{
  /// Commit the accumulated deltas to the camera and reset them.
  ///
  /// Returns true, after notifying the change listeners, when the camera
  /// ended up somewhere other than where the last notification left it.
  pub fn update(&mut self) -> bool
  {
    let position = self.camera.position() + self.pending_pan;
    let offset = position - self.center;
    let current = Spherical::from_offset(offset);

    if self.config.auto_rotate
    {
      self.rotate_left(self.auto_rotation_angle());
    }

    let next = Spherical {
      theta: current.theta + self.theta_delta,
      phi: clamp_polar(current.phi + self.phi_delta, &self.config),
      radius: clamp_radius(offset.length() * self.scale, &self.config),
    };

    // With no input and no clamp to apply, `next` is bit-identical to
    // `current`; the offset is kept so sin/cos round-trip noise never
    // moves a resting camera. Any applied delta, however small, rebuilds.
    if next != current
    {
      self.camera.set_position(self.center + next.to_offset());
    }
    else if self.pending_pan != DVec3::ZERO
    {
      self.camera.set_position(position);
    }

    self.camera.look_at(self.center);

    self.theta_delta = 0.0;
    self.phi_delta = 0.0;
    self.scale = 1.0;
    self.pending_pan = DVec3::ZERO;

    let position = self.camera.position();

    if self.last_position.distance(position) > 0.0
    {
      self.last_position = position;
      self.notify_change();
      return true;
    }

    false
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Clamps
//
//   min/max chains instead of f64::clamp: a misconfigured range
//   must not panic.
// ──────────────────────────────────────────────────────────────
//

fn clamp_polar(phi: f64, config: &OrbitConfig) -> f64
{
  let phi = phi.min(config.max_polar_angle).max(config.min_polar_angle);

  phi.min(PI - EPS).max(EPS)
}

fn clamp_radius(radius: f64, config: &OrbitConfig) -> f64
{
  radius.min(config.max_distance).max(config.min_distance)
}

#[cfg(test)]
mod tests
{
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn offset_round_trip()
  {
    let offset = DVec3::new(3.0, -2.0, 5.0);
    let back = Spherical::from_offset(offset).to_offset();

    assert_relative_eq!(back.x, offset.x, epsilon = 1e-12);
    assert_relative_eq!(back.y, offset.y, epsilon = 1e-12);
    assert_relative_eq!(back.z, offset.z, epsilon = 1e-12);
  }

  #[test]
  fn azimuth_is_measured_from_positive_z()
  {
    let s = Spherical::from_offset(DVec3::new(1.0, 0.0, 0.0));

    assert_relative_eq!(s.theta, PI / 2.0);
    assert_relative_eq!(s.phi, PI / 2.0);
    assert_relative_eq!(s.radius, 1.0);
  }

  #[test]
  fn polar_clamp_applies_hard_margin_last()
  {
    let config = OrbitConfig::default();

    assert_eq!(clamp_polar(-1.0, &config), EPS);
    assert_eq!(clamp_polar(4.0, &config), PI - EPS);

    let narrow = OrbitConfig { min_polar_angle: 0.5, max_polar_angle: 1.0, ..config };
    assert_eq!(clamp_polar(0.1, &narrow), 0.5);
    assert_eq!(clamp_polar(2.0, &narrow), 1.0);
  }

  #[test]
  fn inverted_limits_do_not_panic()
  {
    let config = OrbitConfig { min_distance: 5.0, max_distance: 1.0, ..OrbitConfig::default() };

    assert_eq!(clamp_radius(3.0, &config), 5.0);
  }
}
