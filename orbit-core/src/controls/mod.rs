mod gesture;
mod handlers;
mod spherical;

use glam::{DVec2, DVec3};

use crate::camera::{Camera, CameraRig};
use crate::config::OrbitConfig;

pub use spherical::Spherical;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

/// Hard margin keeping phi off the poles, where the up vector degenerates.
pub const EPS: f64 = 0.000_001;

/// Horizontal drag distance for one full revolution.
pub const PIXELS_PER_ROUND: f64 = 1800.0;

/// Frames per auto-rotation revolution at speed 1.
pub const FRAMES_PER_ROUND: f64 = 3600.0;

//
// ──────────────────────────────────────────────────────────────
//   Interaction state
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState
{
  #[default]
  None,
  Rotate,
  Zoom,
  Pan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener = Box<dyn FnMut()>;

//
// ──────────────────────────────────────────────────────────────
//   OrbitControls
//
//   Input handlers only accumulate (theta/phi deltas, scale, pending
//   pan); `update` is the single place the camera is written. Call it
//   once per frame.
// ──────────────────────────────────────────────────────────────
//

pub struct OrbitControls<C: CameraRig = Camera>
{
  camera: C,

  /// Orbit target. Moved by panning, otherwise fixed.
  pub center: DVec3,
  pub config: OrbitConfig,

  theta_delta: f64,
  phi_delta: f64,
  scale: f64,
  pending_pan: DVec3,

  state: GestureState,
  capturing: bool,
  rotate_start: DVec2,
  zoom_start: DVec2,

  last_position: DVec3,

  listeners: Vec<(ListenerId, ChangeListener)>,
  next_listener: u64,
}

impl<C: CameraRig> OrbitControls<C>
{
  pub fn new(camera: C) -> Self
  {
    Self::with_config(camera, OrbitConfig::default())
  }

  pub fn with_config(camera: C, config: OrbitConfig) -> Self
  {
    Self {
      camera,

      center: DVec3::ZERO,
      config,

      theta_delta: 0.0,
      phi_delta: 0.0,
      scale: 1.0,
      pending_pan: DVec3::ZERO,

      state: GestureState::None,
      capturing: false,
      rotate_start: DVec2::ZERO,
      zoom_start: DVec2::ZERO,

      last_position: DVec3::ZERO,

      listeners: Vec::new(),
      next_listener: 0,
    }
  }

  pub fn camera(&self) -> &C
  {
    &self.camera
  }

  /// Direct camera access, e.g. to set aspect on resize. Moving the
  /// camera here is picked up by the next `update`.
  pub fn camera_mut(&mut self) -> &mut C
  {
    &mut self.camera
  }

  pub fn theta_delta(&self) -> f64
  {
    self.theta_delta
  }

  pub fn phi_delta(&self) -> f64
  {
    self.phi_delta
  }

  pub fn scale(&self) -> f64
  {
    self.scale
  }

  /// Camera translation queued by `pan`, committed on the next `update`.
  pub fn pending_pan(&self) -> DVec3
  {
    self.pending_pan
  }

  pub fn state(&self) -> GestureState
  {
    self.state
  }

  /// True while a gesture holds the pointer (move/up listeners live).
  pub fn is_capturing(&self) -> bool
  {
    self.capturing
  }

  /// Camera position recorded by the last `update` that fired a change.
  pub fn last_position(&self) -> DVec3
  {
    self.last_position
  }

  //
  // ── Change listeners ────────────────────────────────────────
  //

  pub fn add_change_listener<F>(&mut self, listener: F) -> ListenerId
  where
    F: FnMut() + 'static,
  {
    let id = ListenerId(self.next_listener);
    self.next_listener += 1;
    self.listeners.push((id, Box::new(listener)));
    id
  }

  pub fn remove_change_listener(&mut self, id: ListenerId) -> bool
  {
    let before = self.listeners.len();
    self.listeners.retain(|(existing, _)| *existing != id);
    self.listeners.len() != before
  }

  pub fn has_change_listeners(&self) -> bool
  {
    !self.listeners.is_empty()
  }

  fn notify_change(&mut self)
  {
    log::trace!("orbit camera moved to {:?}", self.last_position);

    for (_, listener) in &mut self.listeners
    {
      listener();
    }
  }
}
