use std::f64::consts::PI;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

//
// ──────────────────────────────────────────────────────────────
//   Key codes
//
//   DOM `keyCode` numbers. Native hosts translate their own key
//   identifiers into these so one binding table serves every host.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode
{
  pub const ARROW_LEFT: KeyCode = KeyCode(37);
  pub const ARROW_UP: KeyCode = KeyCode(38);
  pub const ARROW_RIGHT: KeyCode = KeyCode(39);
  pub const ARROW_DOWN: KeyCode = KeyCode(40);

  /// Code of an ASCII letter key (`'a'` and `'A'` both give 65).
  pub fn letter(c: char) -> Option<KeyCode>
  {
    c.is_ascii_alphabetic().then(|| KeyCode(c.to_ascii_uppercase() as u32))
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Key bindings (keyboard pan)
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings
{
  pub left: KeyCode,
  pub up: KeyCode,
  pub right: KeyCode,
  pub bottom: KeyCode,
}

impl Default for KeyBindings
{
  fn default() -> Self
  {
    Self {
      left: KeyCode::ARROW_LEFT,
      up: KeyCode::ARROW_UP,
      right: KeyCode::ARROW_RIGHT,
      bottom: KeyCode::ARROW_DOWN,
    }
  }
}

impl KeyBindings
{
  /// Unit pan vector (camera-local) bound to `key`, if any.
  /// When a key is bound twice, up/bottom win over left/right.
  pub fn pan_direction(&self, key: KeyCode) -> Option<DVec3>
  {
    if key == self.up
    {
      Some(DVec3::Y)
    }
    else if key == self.bottom
    {
      Some(DVec3::NEG_Y)
    }
    else if key == self.left
    {
      Some(DVec3::NEG_X)
    }
    else if key == self.right
    {
      Some(DVec3::X)
    }
    else
    {
      None
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Controller configuration
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig
{
  /// Master switch; every input handler is a no-op while false.
  pub enabled: bool,

  pub user_zoom: bool,
  pub user_zoom_speed: f64,

  pub user_rotate: bool,
  pub user_rotate_speed: f64,

  pub user_pan: bool,
  pub user_pan_speed: f64,

  pub auto_rotate: bool,
  /// 2.0 is one revolution every 30 seconds at 60 fps.
  pub auto_rotate_speed: f64,

  /// Polar angle limits, radians from +Y.
  pub min_polar_angle: f64,
  pub max_polar_angle: f64,

  pub min_distance: f64,
  /// `null` in JSON means unbounded.
  #[serde(with = "unbounded")]
  pub max_distance: f64,

  pub keys: KeyBindings,
}

impl Default for OrbitConfig
{
  fn default() -> Self
  {
    Self {
      enabled: true,

      user_zoom: true,
      user_zoom_speed: 1.0,

      user_rotate: true,
      user_rotate_speed: 1.0,

      user_pan: true,
      user_pan_speed: 2.0,

      auto_rotate: false,
      auto_rotate_speed: 2.0,

      min_polar_angle: 0.0,
      max_polar_angle: PI,

      min_distance: 0.0,
      max_distance: f64::INFINITY,

      keys: KeyBindings::default(),
    }
  }
}

impl OrbitConfig
{
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError>
  {
    let config: OrbitConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError>
  {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let config = Self::from_json_str(&json)?;
    log::debug!("loaded orbit config from {}", path.display());
    Ok(config)
  }

  pub fn to_json_string(&self) -> Result<String, ConfigError>
  {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn validate(&self) -> Result<(), ConfigError>
  {
    let speeds = [
      ("user_zoom_speed", self.user_zoom_speed),
      ("user_rotate_speed", self.user_rotate_speed),
      ("user_pan_speed", self.user_pan_speed),
      ("auto_rotate_speed", self.auto_rotate_speed),
    ];

    for (name, value) in speeds
    {
      if !value.is_finite()
      {
        return Err(invalid(format!("{name} must be finite, got {value}")));
      }
    }

    check_range("polar angle", self.min_polar_angle, self.max_polar_angle)?;
    check_range("distance", self.min_distance, self.max_distance)?;

    if self.min_distance < 0.0
    {
      return Err(invalid(format!("min_distance must not be negative, got {}", self.min_distance)));
    }

    Ok(())
  }
}

fn check_range(what: &str, min: f64, max: f64) -> Result<(), ConfigError>
{
  if min.is_nan() || max.is_nan()
  {
    return Err(invalid(format!("{what} bounds must not be NaN")));
  }

  if min > max
  {
    return Err(invalid(format!("{what} minimum {min} exceeds maximum {max}")));
  }

  Ok(())
}

fn invalid(msg: String) -> ConfigError
{
  ConfigError::Invalid(msg)
}

// Positive infinity round-trips through JSON as `null`.
mod unbounded
{
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    if *value == f64::INFINITY
    {
      serializer.serialize_none()
    }
    else
    {
      serializer.serialize_some(value)
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
  }
}
