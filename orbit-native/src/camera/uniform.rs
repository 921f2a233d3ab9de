use glam::Mat4;
use orbit_core::Camera;

//
// ──────────────────────────────────────────────────────────────
//   Camera Uniform (GPU side)
//
//   WGSL layout (scene.wgsl):
//     view_proj : mat4x4<f32>   → 64 bytes
//     eye       : vec4<f32>     → 16 bytes (w unused)
//   Total: 80 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform
{
  pub view_proj: [[f32; 4]; 4], // 64 bytes
  pub eye: [f32; 4],            // 16 bytes
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 80);

impl CameraUniform
{
  pub fn from_camera(camera: &Camera) -> Self
  {
    let mat: Mat4 = camera.build_view_proj();
    let eye = camera.position.as_vec3();

    Self { view_proj: mat.to_cols_array_2d(), eye: eye.extend(1.0).to_array() }
  }
}
