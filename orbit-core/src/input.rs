//
// ──────────────────────────────────────────────────────────────
//   Host-independent input vocabulary
//
//   Hosts (winit, DOM) translate their native events into these
//   types before handing them to the controller.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton
{
  Primary,
  Middle,
  Secondary,
  Other(u16),
}

impl PointerButton
{
  /// Map a DOM `MouseEvent.button` value.
  pub fn from_dom_button(button: i16) -> Self
  {
    match button
    {
      0 => Self::Primary,
      1 => Self::Middle,
      2 => Self::Secondary,
      other => Self::Other(other.unsigned_abs()),
    }
  }
}

/// What a handler did with an event.
///
/// `CaptureStarted` / `CaptureEnded` tell the host to attach or detach
/// its pointer-move and pointer-up listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse
{
  Ignored,
  Handled,
  CaptureStarted,
  CaptureEnded,
}

impl InputResponse
{
  /// True when the host should suppress the event's default action.
  pub fn is_handled(self) -> bool
  {
    self != Self::Ignored
  }
}
