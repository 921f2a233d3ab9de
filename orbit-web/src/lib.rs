//! Browser binding for the orbit controller.
//!
//! `WebOrbitControls` attaches to a DOM element (or the whole document),
//! turns mouse, wheel and keyboard events into controller input and hands
//! the resulting camera back to JavaScript as plain numbers. Rendering
//! stays on the JS side: call `update()` once per animation frame, then
//! read `view_proj_matrix()` or `camera_position()`.

mod binding;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec3;
use orbit_core::{Camera, CameraRig, ListenerId, OrbitConfig, OrbitControls};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use crate::binding::DomBinding;

#[wasm_bindgen(start)]
pub fn init()
{
  console_error_panic_hook::set_once();

  // A second init (e.g. hot reload) keeps the first logger.
  if console_log::init_with_level(log::Level::Info).is_err()
  {
    log::debug!("console logger already installed");
  }
}

//
// ──────────────────────────────────────────────────────────────
//   JS-facing controller
// ──────────────────────────────────────────────────────────────
//

#[wasm_bindgen]
pub struct WebOrbitControls
{
  binding: Option<Rc<DomBinding>>,
  controls: Rc<RefCell<OrbitControls>>,
  on_change: Option<ChangeCallback>,
}

// The core listener only raises `pending`; the JS function runs from
// `update()` once the controller borrow is released, so it may call
// back into this object.
struct ChangeCallback
{
  function: js_sys::Function,
  listener: ListenerId,
  pending: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl WebOrbitControls
{
  /// Attach to the element with `element_id`, or to the document when
  /// no id is given.
  #[wasm_bindgen(constructor)]
  pub fn new(element_id: Option<String>, aspect: f32) -> Result<WebOrbitControls, JsValue>
  {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let source: EventTarget = match element_id
    {
      Some(id) => document
        .get_element_by_id(&id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {id}")))?
        .unchecked_into(),
      None => document.clone().unchecked_into(),
    };

    let controls = Rc::new(RefCell::new(OrbitControls::new(Camera::new(aspect))));
    let binding = DomBinding::attach(controls.clone(), source, document)?;

    log::info!("orbit controls ready");

    Ok(Self { binding: Some(binding), controls, on_change: None })
  }

  /// Apply pending input to the camera. Returns whether the camera moved;
  /// the change callback (if any) runs after the move is applied.
  pub fn update(&mut self) -> Result<bool, JsValue>
  {
    let changed = self.controls.borrow_mut().update();

    if let Some(callback) = &self.on_change
    {
      if callback.pending.replace(false)
      {
        callback.function.call0(&JsValue::NULL)?;
      }
    }

    Ok(changed)
  }

  /// Replace the change callback; `null` unsubscribes.
  #[wasm_bindgen(js_name = setOnChange)]
  pub fn set_on_change(&mut self, function: Option<js_sys::Function>)
  {
    let mut controls = self.controls.borrow_mut();

    if let Some(previous) = self.on_change.take()
    {
      controls.remove_change_listener(previous.listener);
    }

    self.on_change = function.map(|function| {
      let pending = Rc::new(Cell::new(false));
      let flag = pending.clone();
      let listener = controls.add_change_listener(move || flag.set(true));

      ChangeCallback { function, listener, pending }
    });
  }

  #[wasm_bindgen(js_name = hasOnChange)]
  pub fn has_on_change(&self) -> bool
  {
    self.controls.borrow().has_change_listeners()
  }

  /// Replace the whole configuration from JSON. Missing fields take their
  /// defaults; an invalid document leaves the current config untouched.
  #[wasm_bindgen(js_name = setConfigJson)]
  pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue>
  {
    let config = OrbitConfig::from_json_str(json).map_err(to_js_error)?;
    self.controls.borrow_mut().config = config;
    Ok(())
  }

  #[wasm_bindgen(js_name = configJson)]
  pub fn config_json(&self) -> Result<String, JsValue>
  {
    self.controls.borrow().config.to_json_string().map_err(to_js_error)
  }

  #[wasm_bindgen(js_name = setEnabled)]
  pub fn set_enabled(&mut self, enabled: bool)
  {
    self.controls.borrow_mut().config.enabled = enabled;
  }

  #[wasm_bindgen(js_name = setAutoRotate)]
  pub fn set_auto_rotate(&mut self, auto_rotate: bool)
  {
    self.controls.borrow_mut().config.auto_rotate = auto_rotate;
  }

  #[wasm_bindgen(js_name = cameraPosition)]
  pub fn camera_position(&self) -> Vec<f64>
  {
    self.controls.borrow().camera().position().to_array().to_vec()
  }

  /// Move the camera and re-aim it at the centre. The next `update()`
  /// orbits from the new position.
  #[wasm_bindgen(js_name = setCameraPosition)]
  pub fn set_camera_position(&mut self, position: &[f64]) -> Result<(), JsValue>
  {
    let position = vec3_from_slice(position).ok_or_else(|| JsValue::from_str(VEC3_ERROR))?;

    let mut controls = self.controls.borrow_mut();
    let center = controls.center;
    let camera = controls.camera_mut();
    camera.set_position(position);
    camera.look_at(center);

    Ok(())
  }

  pub fn center(&self) -> Vec<f64>
  {
    self.controls.borrow().center.to_array().to_vec()
  }

  #[wasm_bindgen(js_name = setCenter)]
  pub fn set_center(&mut self, center: &[f64]) -> Result<(), JsValue>
  {
    let center = vec3_from_slice(center).ok_or_else(|| JsValue::from_str(VEC3_ERROR))?;
    self.controls.borrow_mut().center = center;
    Ok(())
  }

  #[wasm_bindgen(js_name = setAspect)]
  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.controls.borrow_mut().camera_mut().set_aspect(aspect);
  }

  /// Column-major 4×4 view-projection matrix.
  #[wasm_bindgen(js_name = viewProjMatrix)]
  pub fn view_proj_matrix(&self) -> Vec<f32>
  {
    self.controls.borrow().camera().build_view_proj().to_cols_array().to_vec()
  }

  /// Remove every DOM listener. The controller keeps working through
  /// the programmatic API.
  pub fn dispose(&mut self)
  {
    if let Some(binding) = self.binding.take()
    {
      binding.detach();
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Helpers
// ──────────────────────────────────────────────────────────────
//

const VEC3_ERROR: &str = "expected three finite numbers";

fn vec3_from_slice(values: &[f64]) -> Option<DVec3>
{
  match values
  {
    [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => Some(DVec3::new(*x, *y, *z)),
    _ => None,
  }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue
{
  JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn vec3_needs_three_finite_numbers()
  {
    assert_eq!(vec3_from_slice(&[1.0, 2.0, 3.0]), Some(DVec3::new(1.0, 2.0, 3.0)));
    assert_eq!(vec3_from_slice(&[1.0, 2.0]), None);
    assert_eq!(vec3_from_slice(&[1.0, 2.0, 3.0, 4.0]), None);
    assert_eq!(vec3_from_slice(&[1.0, f64::NAN, 3.0]), None);
  }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests
{
  use wasm_bindgen_test::*;

  use super::*;

  wasm_bindgen_test_configure!(run_in_browser);

  #[wasm_bindgen_test]
  fn change_callback_rides_on_the_core_listener()
  {
    let mut controls = WebOrbitControls::new(None, 1.0).unwrap();

    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let closure = Closure::<dyn FnMut()>::new(move || seen.set(seen.get() + 1));
    let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();

    controls.set_on_change(Some(function));
    assert!(controls.has_on_change());

    assert!(controls.update().unwrap());
    assert!(!controls.update().unwrap());
    assert_eq!(calls.get(), 1);

    controls.set_on_change(None);
    assert!(!controls.has_on_change());

    controls.set_camera_position(&[1.0, 2.0, 3.0]).unwrap();
    assert!(controls.update().unwrap());
    assert_eq!(calls.get(), 1);

    controls.dispose();
  }
}
