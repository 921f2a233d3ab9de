use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec2;
use orbit_core::{InputResponse, KeyCode, OrbitControls, PointerButton};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, KeyboardEvent, MouseEvent, WheelEvent};

type Listener = Closure<dyn FnMut(Event)>;

//
// ──────────────────────────────────────────────────────────────
//   DOM binding
//
//   contextmenu / mousedown / wheel / keydown live on the event
//   source for the binding's whole life. mousemove / mouseup go on
//   the document only while a gesture holds the capture, so a drag
//   keeps tracking after the pointer leaves the element.
// ──────────────────────────────────────────────────────────────
//

pub(crate) struct DomBinding
{
  controls: Rc<RefCell<OrbitControls>>,
  source: EventTarget,
  document: Document,
  handlers: RefCell<Option<Handlers>>,
}

struct Handlers
{
  context_menu: Listener,
  pointer_down: Listener,
  wheel: Listener,
  key_down: Listener,
  pointer_move: Listener,
  pointer_up: Listener,
}

impl DomBinding
{
  pub(crate) fn attach(
    controls: Rc<RefCell<OrbitControls>>,
    source: EventTarget,
    document: Document,
  ) -> Result<Rc<Self>, JsValue>
  {
    let binding = Rc::new(Self { controls, source, document, handlers: RefCell::new(None) });
    let weak = Rc::downgrade(&binding);

    let handlers = Handlers {
      context_menu: listener(&weak, Self::on_context_menu),
      pointer_down: listener(&weak, Self::on_pointer_down),
      wheel: listener(&weak, Self::on_wheel),
      key_down: listener(&weak, Self::on_key_down),
      pointer_move: listener(&weak, Self::on_pointer_move),
      pointer_up: listener(&weak, Self::on_pointer_up),
    };

    // preventDefault on wheel needs a non-passive listener
    let active = AddEventListenerOptions::new();
    active.set_passive(false);

    let source = &binding.source;
    source.add_event_listener_with_callback("contextmenu", as_fn(&handlers.context_menu))?;
    source.add_event_listener_with_callback("mousedown", as_fn(&handlers.pointer_down))?;
    source.add_event_listener_with_callback_and_add_event_listener_options(
      "wheel",
      as_fn(&handlers.wheel),
      &active,
    )?;
    source.add_event_listener_with_callback("keydown", as_fn(&handlers.key_down))?;

    *binding.handlers.borrow_mut() = Some(handlers);
    log::debug!("orbit controls attached");

    Ok(binding)
  }

  /// Remove every listener. Safe to call more than once.
  pub(crate) fn detach(&self)
  {
    let Some(handlers) = self.handlers.borrow_mut().take()
    else
    {
      return;
    };

    let source = &self.source;
    let removals = [
      source.remove_event_listener_with_callback("contextmenu", as_fn(&handlers.context_menu)),
      source.remove_event_listener_with_callback("mousedown", as_fn(&handlers.pointer_down)),
      source.remove_event_listener_with_callback("wheel", as_fn(&handlers.wheel)),
      source.remove_event_listener_with_callback("keydown", as_fn(&handlers.key_down)),
      self.document.remove_event_listener_with_callback("mousemove", as_fn(&handlers.pointer_move)),
      self.document.remove_event_listener_with_callback("mouseup", as_fn(&handlers.pointer_up)),
    ];

    for result in removals
    {
      if let Err(err) = result
      {
        log::warn!("failed to remove orbit listener: {err:?}");
      }
    }

    log::debug!("orbit controls detached");
  }

  //
  // ── Event handlers ──────────────────────────────────────────
  //

  fn on_context_menu(&self, event: &Event)
  {
    event.prevent_default();
  }

  fn on_pointer_down(&self, event: &Event)
  {
    let Some(mouse) = event.dyn_ref::<MouseEvent>()
    else
    {
      return;
    };

    let button = PointerButton::from_dom_button(mouse.button());
    let response = self.controls.borrow_mut().pointer_down(button, client_position(mouse));

    self.finish(event, response);
  }

  fn on_pointer_move(&self, event: &Event)
  {
    let Some(mouse) = event.dyn_ref::<MouseEvent>()
    else
    {
      return;
    };

    let movement = DVec2::new(f64::from(mouse.movement_x()), f64::from(mouse.movement_y()));
    let response = self.controls.borrow_mut().pointer_move(client_position(mouse), movement);

    self.finish(event, response);
  }

  fn on_pointer_up(&self, event: &Event)
  {
    let response = self.controls.borrow_mut().pointer_up();

    self.finish(event, response);
  }

  fn on_wheel(&self, event: &Event)
  {
    let Some(wheel) = event.dyn_ref::<WheelEvent>()
    else
    {
      return;
    };

    let response = self.controls.borrow_mut().wheel(wheel.delta_y());

    self.finish(event, response);
  }

  fn on_key_down(&self, event: &Event)
  {
    let Some(key) = event.dyn_ref::<KeyboardEvent>()
    else
    {
      return;
    };

    let response = self.controls.borrow_mut().key_down(KeyCode(key.key_code()));

    self.finish(event, response);
  }

  // Shared tail: suppress the default action and move the drag
  // listeners on or off the document.
  fn finish(&self, event: &Event, response: InputResponse)
  {
    if response.is_handled()
    {
      event.prevent_default();
    }

    let result = match response
    {
      InputResponse::CaptureStarted => self.set_drag_listeners(true),
      InputResponse::CaptureEnded => self.set_drag_listeners(false),
      _ => Ok(()),
    };

    if let Err(err) = result
    {
      log::warn!("failed to update drag listeners: {err:?}");
    }
  }

  fn set_drag_listeners(&self, attach: bool) -> Result<(), JsValue>
  {
    let handlers = self.handlers.borrow();
    let Some(handlers) = handlers.as_ref()
    else
    {
      return Ok(());
    };

    let document = &self.document;

    if attach
    {
      document.add_event_listener_with_callback("mousemove", as_fn(&handlers.pointer_move))?;
      document.add_event_listener_with_callback("mouseup", as_fn(&handlers.pointer_up))?;
    }
    else
    {
      document.remove_event_listener_with_callback("mousemove", as_fn(&handlers.pointer_move))?;
      document.remove_event_listener_with_callback("mouseup", as_fn(&handlers.pointer_up))?;
    }

    Ok(())
  }
}

impl Drop for DomBinding
{
  fn drop(&mut self)
  {
    self.detach();
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Helpers
// ──────────────────────────────────────────────────────────────
//

// Handlers hold a weak reference so the binding can be dropped while
// the DOM still references the closures.
fn listener(binding: &Weak<DomBinding>, handle: fn(&DomBinding, &Event)) -> Listener
{
  let binding = binding.clone();

  Closure::wrap(Box::new(move |event: Event| {
    if let Some(binding) = binding.upgrade()
    {
      handle(&binding, &event);
    }
  }) as Box<dyn FnMut(Event)>)
}

fn as_fn(listener: &Listener) -> &js_sys::Function
{
  listener.as_ref().unchecked_ref()
}

fn client_position(event: &MouseEvent) -> DVec2
{
  DVec2::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests
{
  use orbit_core::{Camera, GestureState};
  use wasm_bindgen_test::*;
  use web_sys::{Element, EventInit, MouseEventInit};

  use super::*;

  wasm_bindgen_test_configure!(run_in_browser);

  struct Fixture
  {
    controls: Rc<RefCell<OrbitControls>>,
    element: Element,
    document: Document,
    binding: Rc<DomBinding>,
  }

  fn fixture() -> Fixture
  {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    let controls = Rc::new(RefCell::new(OrbitControls::new(Camera::new(1.0))));
    let binding =
      DomBinding::attach(controls.clone(), element.clone().unchecked_into(), document.clone()).unwrap();

    Fixture { controls, element, document, binding }
  }

  fn mouse(kind: &str, button: i16, x: i32, y: i32) -> MouseEvent
  {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_button(button);
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
  }

  fn fire(target: &EventTarget, event: &Event)
  {
    target.dispatch_event(event).unwrap();
  }

  #[wasm_bindgen_test]
  fn drag_on_the_element_tracks_moves_on_the_document()
  {
    let f = fixture();

    fire(&f.element, &mouse("mousedown", 0, 0, 0));
    assert_eq!(f.controls.borrow().state(), GestureState::Rotate);

    fire(&f.document, &mouse("mousemove", 0, 100, 0));

    let expected = -2.0 * std::f64::consts::PI * 100.0 / 1800.0;
    assert!((f.controls.borrow().theta_delta() - expected).abs() < 1e-12);
  }

  #[wasm_bindgen_test]
  fn mouseup_takes_the_drag_listeners_off_the_document()
  {
    let f = fixture();

    fire(&f.element, &mouse("mousedown", 0, 0, 0));
    fire(&f.document, &mouse("mouseup", 0, 0, 0));
    assert!(!f.controls.borrow().is_capturing());

    // Capture started outside the DOM binding: no document listener
    // exists, so document moves must not reach the controller.
    f.controls.borrow_mut().pointer_down(PointerButton::Primary, DVec2::ZERO);
    fire(&f.document, &mouse("mousemove", 0, 100, 0));

    assert_eq!(f.controls.borrow().theta_delta(), 0.0);
  }

  #[wasm_bindgen_test]
  fn detached_binding_ignores_mousedown()
  {
    let f = fixture();

    f.binding.detach();
    fire(&f.element, &mouse("mousedown", 0, 0, 0));

    assert_eq!(f.controls.borrow().state(), GestureState::None);
    assert!(!f.controls.borrow().is_capturing());
  }

  #[wasm_bindgen_test]
  fn dropped_binding_ignores_mousedown()
  {
    let Fixture { controls, element, binding, .. } = fixture();

    drop(binding);
    fire(&element, &mouse("mousedown", 0, 0, 0));

    assert_eq!(controls.borrow().state(), GestureState::None);
  }

  #[wasm_bindgen_test]
  fn context_menu_is_suppressed()
  {
    let f = fixture();

    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("contextmenu", &init).unwrap();
    fire(&f.element, &event);

    assert!(event.default_prevented());
  }

  #[wasm_bindgen_test]
  fn handled_mousedown_prevents_default()
  {
    let f = fixture();

    let event = mouse("mousedown", 0, 0, 0);
    fire(&f.element, &event);
    assert!(event.default_prevented());

    let unknown = mouse("mousedown", 4, 0, 0);
    fire(&f.element, &unknown);
    assert!(!unknown.default_prevented());
  }
}
