use std::f64::consts::PI;

use glam::{DVec2, DVec3};

use super::{GestureState, OrbitControls, PIXELS_PER_ROUND};
use crate::camera::CameraRig;
use crate::config::KeyCode;
use crate::input::{InputResponse, PointerButton};

//
// ──────────────────────────────────────────────────────────────
//   Input state machine
//
//     None ──down(primary)──▶ Rotate ─┐
//     None ──down(middle)───▶ Zoom   ─┼──up──▶ None
//     None ──down(secondary)▶ Pan    ─┘
//
//   Move/up are only honoured while a gesture holds the capture.
// ──────────────────────────────────────────────────────────────
//

impl<C: CameraRig> OrbitControls<C>
{
  /// Start a gesture. Every button is gated on `user_rotate`, not just
  /// the primary one.
  pub fn pointer_down(&mut self, button: PointerButton, position: DVec2) -> InputResponse
  {
    if !self.config.enabled || !self.config.user_rotate
    {
      return InputResponse::Ignored;
    }

    let next = match button
    {
      PointerButton::Primary =>
      {
        self.rotate_start = position;
        GestureState::Rotate
      }
      PointerButton::Middle =>
      {
        self.zoom_start = position;
        GestureState::Zoom
      }
      PointerButton::Secondary => GestureState::Pan,
      PointerButton::Other(_) => return InputResponse::Ignored,
    };

    log::debug!("orbit gesture {:?} -> {:?}", self.state, next);
    self.state = next;

    if self.capturing
    {
      return InputResponse::Handled;
    }

    self.capturing = true;
    InputResponse::CaptureStarted
  }

  /// `position` is the absolute pointer position, `movement` the raw
  /// platform delta since the previous move (used by panning only).
  pub fn pointer_move(&mut self, position: DVec2, movement: DVec2) -> InputResponse
  {
    if !self.capturing || !self.config.enabled
    {
      return InputResponse::Ignored;
    }

    match self.state
    {
      GestureState::Rotate =>
      {
        let delta = position - self.rotate_start;
        let speed = self.config.user_rotate_speed;

        self.rotate_left(2.0 * PI * delta.x / PIXELS_PER_ROUND * speed);
        self.rotate_up(2.0 * PI * delta.y / PIXELS_PER_ROUND * speed);

        self.rotate_start = position;
      }

      GestureState::Zoom =>
      {
        let delta = position - self.zoom_start;

        if delta.y > 0.0
        {
          self.zoom_in(None);
        }
        else
        {
          self.zoom_out(None);
        }

        self.zoom_start = position;
      }

      GestureState::Pan => self.pan(DVec3::new(-movement.x, movement.y, 0.0)),

      GestureState::None => return InputResponse::Ignored,
    }

    InputResponse::Handled
  }

  /// End the gesture. Releases the capture regardless of `enabled` and
  /// the feature toggles so the host's listeners never leak.
  pub fn pointer_up(&mut self) -> InputResponse
  {
    if !self.capturing
    {
      return InputResponse::Ignored;
    }

    log::debug!("orbit gesture {:?} -> {:?}", self.state, GestureState::None);
    self.state = GestureState::None;
    self.capturing = false;

    InputResponse::CaptureEnded
  }

  /// `delta` uses the DOM `deltaY` sign: positive means the wheel
  /// rolled towards the user.
  pub fn wheel(&mut self, delta: f64) -> InputResponse
  {
    if !self.config.enabled || !self.config.user_zoom
    {
      return InputResponse::Ignored;
    }

    if delta > 0.0
    {
      self.zoom_out(None);
    }
    else
    {
      self.zoom_in(None);
    }

    InputResponse::Handled
  }

  pub fn key_down(&mut self, key: KeyCode) -> InputResponse
  {
    if !self.config.enabled || !self.config.user_pan
    {
      return InputResponse::Ignored;
    }

    match self.config.keys.pan_direction(key)
    {
      Some(direction) =>
      {
        self.pan(direction);
        InputResponse::Handled
      }
      None => InputResponse::Ignored,
    }
  }
}

#[cfg(test)]
mod tests
{
  use glam::{DVec2, DVec3};

  use crate::camera::Camera;
  use crate::config::KeyCode;
  use crate::controls::{GestureState, OrbitControls};
  use crate::input::{InputResponse, PointerButton};

  fn controls() -> OrbitControls
  {
    OrbitControls::new(Camera::new(1.0))
  }

  #[test]
  fn buttons_select_gestures()
  {
    let mut c = controls();

    assert_eq!(c.pointer_down(PointerButton::Middle, DVec2::ZERO), InputResponse::CaptureStarted);
    assert_eq!(c.state(), GestureState::Zoom);

    // A second button replaces the live gesture without re-capturing.
    assert_eq!(c.pointer_down(PointerButton::Secondary, DVec2::ZERO), InputResponse::Handled);
    assert_eq!(c.state(), GestureState::Pan);

    assert_eq!(c.pointer_up(), InputResponse::CaptureEnded);
    assert_eq!(c.state(), GestureState::None);
    assert!(!c.is_capturing());
  }

  #[test]
  fn unknown_button_is_ignored()
  {
    let mut c = controls();

    assert_eq!(c.pointer_down(PointerButton::Other(3), DVec2::ZERO), InputResponse::Ignored);
    assert!(!c.is_capturing());
  }

  #[test]
  fn disabled_controller_ignores_pointer_down()
  {
    let mut c = controls();
    c.config.enabled = false;

    assert_eq!(c.pointer_down(PointerButton::Primary, DVec2::ZERO), InputResponse::Ignored);
    assert_eq!(c.state(), GestureState::None);
  }

  #[test]
  fn user_rotate_gates_every_button()
  {
    let mut c = controls();
    c.config.user_rotate = false;

    assert_eq!(c.pointer_down(PointerButton::Secondary, DVec2::ZERO), InputResponse::Ignored);
    assert_eq!(c.pointer_down(PointerButton::Middle, DVec2::ZERO), InputResponse::Ignored);
  }

  #[test]
  fn move_without_gesture_is_ignored()
  {
    let mut c = controls();

    assert_eq!(c.pointer_move(DVec2::new(50.0, 0.0), DVec2::new(50.0, 0.0)), InputResponse::Ignored);
    assert_eq!(c.theta_delta(), 0.0);
    assert_eq!(c.pointer_up(), InputResponse::Ignored);
  }

  #[test]
  fn disabling_mid_gesture_freezes_moves_but_up_still_releases()
  {
    let mut c = controls();
    c.pointer_down(PointerButton::Primary, DVec2::ZERO);
    c.config.enabled = false;
    c.config.user_rotate = false;

    assert_eq!(c.pointer_move(DVec2::new(100.0, 0.0), DVec2::ZERO), InputResponse::Ignored);
    assert_eq!(c.theta_delta(), 0.0);

    assert_eq!(c.pointer_up(), InputResponse::CaptureEnded);
    assert!(!c.is_capturing());
  }

  #[test]
  fn dragging_down_zooms_in_and_up_zooms_out()
  {
    let mut c = controls();
    c.pointer_down(PointerButton::Middle, DVec2::new(0.0, 100.0));

    // Screen y grows downwards: a downward drag is a positive delta
    c.pointer_move(DVec2::new(0.0, 120.0), DVec2::ZERO);
    assert_eq!(c.scale(), c.zoom_scale());

    c.pointer_move(DVec2::new(0.0, 80.0), DVec2::ZERO);
    c.pointer_move(DVec2::new(0.0, 60.0), DVec2::ZERO);
    assert!(c.scale() > 1.0);
  }

  #[test]
  fn wheel_sign()
  {
    let mut c = controls();

    c.wheel(1.0);
    assert!(c.scale() > 1.0);

    let mut c = controls();
    c.wheel(-3.0);
    assert!(c.scale() < 1.0);

    let mut c = controls();
    c.config.user_zoom = false;
    assert_eq!(c.wheel(1.0), InputResponse::Ignored);
    assert_eq!(c.scale(), 1.0);
  }

  #[test]
  fn arrow_keys_pan_centre()
  {
    let mut c = controls();
    let before = c.center;

    assert_eq!(c.key_down(KeyCode::ARROW_UP), InputResponse::Handled);
    assert!((c.center - before).length() > 0.0);

    assert_eq!(c.key_down(KeyCode(65)), InputResponse::Ignored);
  }

  #[test]
  fn user_pan_gates_keys()
  {
    let mut c = controls();
    c.config.user_pan = false;

    assert_eq!(c.key_down(KeyCode::ARROW_LEFT), InputResponse::Ignored);
    assert_eq!(c.center, DVec3::ZERO);
  }
}
