//! Orbit camera controller.
//!
//! [`OrbitControls`] turns pointer, wheel and keyboard input into orbit,
//! dolly and pan motion of a camera around a centre point. Input handlers
//! only accumulate deltas; [`OrbitControls::update`], called once per
//! rendered frame, commits them to the camera and reports whether it moved.
//!
//! ```
//! use orbit_core::{Camera, OrbitControls};
//!
//! let mut controls = OrbitControls::new(Camera::new(16.0 / 9.0));
//! controls.rotate_left(0.25);
//! controls.zoom_in(None);
//!
//! if controls.update()
//! {
//!   // re-render
//! }
//! ```

pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod input;

pub use camera::{Camera, CameraRig};
pub use config::{KeyBindings, KeyCode, OrbitConfig};
pub use controls::{GestureState, ListenerId, OrbitControls, Spherical};
pub use error::ConfigError;
pub use input::{InputResponse, PointerButton};
