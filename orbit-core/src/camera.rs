use glam::{DMat3, DQuat, DVec3, Mat4};

//
// ──────────────────────────────────────────────────────────────
//   Camera contract
//
//   The orbit controller only needs three things from a camera:
//   a settable position, a "face this point" operation, and a way
//   to carry a camera-local direction into world space (panning).
// ──────────────────────────────────────────────────────────────
//

pub trait CameraRig
{
  fn position(&self) -> DVec3;

  fn set_position(&mut self, position: DVec3);

  /// Orient the camera so its forward axis (local −Z) faces `target`.
  fn look_at(&mut self, target: DVec3);

  /// Rotate a camera-local direction into world space and normalise it.
  /// A zero vector stays zero.
  fn transform_direction(&self, local: DVec3) -> DVec3;
}

//
// ──────────────────────────────────────────────────────────────
//   Perspective camera (right-handed, Y-up)
//
//   Coordinate system:
//     X → right
//     Y → up (polar axis of the orbit)
//     Z → towards the viewer
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct Camera
{
  pub position: DVec3,
  pub orientation: DQuat,
  pub up: DVec3,

  pub aspect: f32,
  pub fovy: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Camera
{
  pub fn new(aspect: f32) -> Self
  {
    let mut camera = Self {
      position: default_eye(),
      orientation: DQuat::IDENTITY,
      up: DVec3::Y,

      aspect,
      fovy: std::f32::consts::FRAC_PI_4, // 45° vertical FOV
      znear: 0.1,
      zfar: 10_000.0,
    };

    camera.look_at(DVec3::ZERO);
    camera
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  /// World-space direction the camera is facing.
  pub fn forward(&self) -> DVec3
  {
    self.orientation * DVec3::NEG_Z
  }

  pub fn build_view_proj(&self) -> Mat4
  {
    let view = build_view_matrix(self);
    let proj = build_projection_matrix(self);
    proj * view
  }
}

impl CameraRig for Camera
{
  fn position(&self) -> DVec3
  {
    self.position
  }

  fn set_position(&mut self, position: DVec3)
  {
    self.position = position;
  }

  fn look_at(&mut self, target: DVec3)
  {
    let Some(orientation) = look_rotation(self.position, target, self.up)
    else
    {
      return;
    };

    self.orientation = orientation;
  }

  fn transform_direction(&self, local: DVec3) -> DVec3
  {
    (self.orientation * local).normalize_or_zero()
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Helper functions
// ──────────────────────────────────────────────────────────────
//

fn default_eye() -> DVec3
{
  DVec3::new(6.0, 4.0, 10.0)
}

/// Rotation whose −Z axis points from `eye` to `target`.
/// `None` when the direction is zero or parallel to `up`.
fn look_rotation(eye: DVec3, target: DVec3, up: DVec3) -> Option<DQuat>
{
  let forward = (target - eye).try_normalize()?;
  let right = forward.cross(up).try_normalize()?;
  let cam_up = right.cross(forward);

  Some(DQuat::from_mat3(&DMat3::from_cols(right, cam_up, -forward)))
}

fn build_view_matrix(cam: &Camera) -> Mat4
{
  let eye = cam.position.as_vec3();
  let dir = cam.forward().as_vec3();
  let up = (cam.orientation * DVec3::Y).as_vec3();

  Mat4::look_to_rh(eye, dir, up)
}

fn build_projection_matrix(cam: &Camera) -> Mat4
{
  Mat4::perspective_rh(cam.fovy, cam.aspect, cam.znear, cam.zfar)
}
