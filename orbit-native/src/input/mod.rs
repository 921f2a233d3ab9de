pub mod camera_control;

use glam::DVec2;
use winit::dpi::PhysicalPosition;

//
// ──────────────────────────────────────────────────────────────
//   Pointer tracking
//
//   winit reports absolute cursor positions only; the raw
//   per-move delta the pan gesture wants is derived here.
//   Positions are kept in logical pixels so drag speed does not
//   depend on the display's scale factor.
// ──────────────────────────────────────────────────────────────
//

pub struct InputState
{
  pub cursor: DVec2,
  pub movement: DVec2,
  scale_factor: f64,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self { cursor: DVec2::ZERO, movement: DVec2::ZERO, scale_factor: 1.0 }
  }

  pub fn set_scale_factor(&mut self, scale_factor: f64)
  {
    if scale_factor > 0.0 && scale_factor.is_finite()
    {
      self.cursor *= self.scale_factor / scale_factor;
      self.scale_factor = scale_factor;
    }
  }

  pub fn track_cursor(&mut self, position: PhysicalPosition<f64>)
  {
    let logical = position.to_logical::<f64>(self.scale_factor);
    let current = DVec2::new(logical.x, logical.y);

    self.movement = current - self.cursor;
    self.cursor = current;
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn movement_is_delta_since_last_move()
  {
    let mut input = InputState::new();

    input.track_cursor(PhysicalPosition::new(10.0, 20.0));
    input.track_cursor(PhysicalPosition::new(13.0, 18.0));

    assert_eq!(input.cursor, DVec2::new(13.0, 18.0));
    assert_eq!(input.movement, DVec2::new(3.0, -2.0));
  }

  #[test]
  fn hidpi_positions_are_logical()
  {
    let mut input = InputState::new();
    input.set_scale_factor(2.0);

    input.track_cursor(PhysicalPosition::new(100.0, 40.0));
    input.track_cursor(PhysicalPosition::new(160.0, 40.0));

    assert_eq!(input.cursor, DVec2::new(80.0, 20.0));
    assert_eq!(input.movement, DVec2::new(30.0, 0.0));
  }

  #[test]
  fn scale_change_keeps_the_cursor_in_place()
  {
    let mut input = InputState::new();
    input.track_cursor(PhysicalPosition::new(100.0, 50.0));

    input.set_scale_factor(2.0);
    input.track_cursor(PhysicalPosition::new(200.0, 100.0));

    assert_eq!(input.movement, DVec2::ZERO);
  }
}
