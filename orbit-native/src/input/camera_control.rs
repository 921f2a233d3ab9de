use orbit_core::{InputResponse, KeyCode, OrbitControls, PointerButton};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::input::InputState;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Forward a window event to the orbit controller.
///
/// Events the GUI consumed are withheld, except button releases: a drag
/// that ends over the panel must still end the gesture.
pub fn apply_event(
  input: &mut InputState,
  controls: &mut OrbitControls,
  event: &WindowEvent,
  gui_consumed: bool,
) -> InputResponse
{
  match event
  {
    WindowEvent::CursorMoved { position, .. } =>
    {
      input.track_cursor(*position);

      if gui_consumed
      {
        return InputResponse::Ignored;
      }

      controls.pointer_move(input.cursor, input.movement)
    }

    WindowEvent::ScaleFactorChanged { scale_factor, .. } =>
    {
      input.set_scale_factor(*scale_factor);
      InputResponse::Ignored
    }

    WindowEvent::MouseInput { state: ElementState::Released, .. } => controls.pointer_up(),

    WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } if !gui_consumed =>
    {
      controls.pointer_down(pointer_button(*button), input.cursor)
    }

    WindowEvent::MouseWheel { delta, .. } if !gui_consumed => controls.wheel(wheel_delta(delta)),

    WindowEvent::KeyboardInput { event, .. }
      if !gui_consumed && event.state == ElementState::Pressed =>
    {
      match key_code(&event.logical_key)
      {
        Some(code) => controls.key_down(code),
        None => InputResponse::Ignored,
      }
    }

    _ => InputResponse::Ignored,
  }
}

//
// ──────────────────────────────────────────────────────────────
//   winit → controller vocabulary
// ──────────────────────────────────────────────────────────────
//

fn pointer_button(button: MouseButton) -> PointerButton
{
  match button
  {
    MouseButton::Left => PointerButton::Primary,
    MouseButton::Middle => PointerButton::Middle,
    MouseButton::Right => PointerButton::Secondary,
    MouseButton::Back => PointerButton::Other(3),
    MouseButton::Forward => PointerButton::Other(4),
    MouseButton::Other(n) => PointerButton::Other(n),
  }
}

/// winit scrolls positive away from the user; the controller expects
/// the DOM `deltaY` sign (positive towards the user).
fn wheel_delta(delta: &MouseScrollDelta) -> f64
{
  match delta
  {
    MouseScrollDelta::LineDelta(_, y) => -f64::from(*y),
    MouseScrollDelta::PixelDelta(p) => -p.y,
  }
}

fn key_code(key: &Key) -> Option<KeyCode>
{
  match key
  {
    Key::Named(NamedKey::ArrowLeft) => Some(KeyCode::ARROW_LEFT),
    Key::Named(NamedKey::ArrowUp) => Some(KeyCode::ARROW_UP),
    Key::Named(NamedKey::ArrowRight) => Some(KeyCode::ARROW_RIGHT),
    Key::Named(NamedKey::ArrowDown) => Some(KeyCode::ARROW_DOWN),
    Key::Character(text) => text.chars().next().and_then(KeyCode::letter),
    _ => None,
  }
}

#[cfg(test)]
mod tests
{
  use winit::dpi::PhysicalPosition;

  use super::*;

  #[test]
  fn hidpi_drag_rotates_like_a_logical_drag()
  {
    let mut input = InputState::new();
    input.set_scale_factor(2.0);
    let mut controls = OrbitControls::new(orbit_core::Camera::new(1.0));

    // SAFETY: only compared against other dummies; no platform call sees it
    let device_id = unsafe { winit::event::DeviceId::dummy() };
    let press = WindowEvent::MouseInput {
      device_id,
      state: ElementState::Pressed,
      button: MouseButton::Left,
    };
    let moved = |x: f64| WindowEvent::CursorMoved {
      device_id,
      position: PhysicalPosition::new(x, 0.0),
    };

    apply_event(&mut input, &mut controls, &moved(0.0), false);
    apply_event(&mut input, &mut controls, &press, false);
    apply_event(&mut input, &mut controls, &moved(3600.0), false);

    // 3600 physical px at 2x = 1800 logical px = one full turn
    let turn = -2.0 * std::f64::consts::PI;
    assert!((controls.theta_delta() - turn).abs() < 1e-12);
  }

  #[test]
  fn buttons_map_to_dom_order()
  {
    assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
    assert_eq!(pointer_button(MouseButton::Middle), PointerButton::Middle);
    assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
  }

  #[test]
  fn wheel_up_is_negative()
  {
    assert_eq!(wheel_delta(&MouseScrollDelta::LineDelta(0.0, 1.0)), -1.0);
    assert_eq!(wheel_delta(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0))), 40.0);
  }

  #[test]
  fn arrows_and_letters()
  {
    assert_eq!(key_code(&Key::Named(NamedKey::ArrowUp)), Some(KeyCode::ARROW_UP));
    assert_eq!(key_code(&Key::Character("w".into())), Some(KeyCode(87)));
    assert_eq!(key_code(&Key::Named(NamedKey::Enter)), None);
  }
}
