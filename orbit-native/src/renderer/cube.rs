use wgpu::util::DeviceExt;

use super::{make_vertex, Vertex};

//
// ──────────────────────────────────────────────────────────────
//   Reference cube (Y-up), one colour per face so the orbit
//   direction is readable on screen
// ──────────────────────────────────────────────────────────────
//

const HALF: f32 = 1.0;

const COL_X: [f32; 3] = [0.85, 0.30, 0.30];
const COL_X_NEG: [f32; 3] = [0.45, 0.18, 0.18];
const COL_Y: [f32; 3] = [0.35, 0.80, 0.35];
const COL_Y_NEG: [f32; 3] = [0.18, 0.40, 0.18];
const COL_Z: [f32; 3] = [0.35, 0.45, 0.90];
const COL_Z_NEG: [f32; 3] = [0.18, 0.22, 0.45];

pub struct CubeMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,
}

impl CubeMesh
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let vertices = build_vertices();
    let indices = build_indices();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Cube Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Cube Index Buffer"),
      contents: bytemuck::cast_slice(&indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    Self { vertex_buffer, index_buffer, index_count: indices.len() as u32 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry builders
// ──────────────────────────────────────────────────────────────
//

// Each face: four corners counter-clockwise seen from outside
fn faces() -> [([[f32; 3]; 4], [f32; 3]); 6]
{
  let h = HALF;

  [
    ([[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]], COL_X),         // +X
    ([[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], COL_X_NEG), // -X
    ([[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]], COL_Y),         // +Y
    ([[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], COL_Y_NEG), // -Y
    ([[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]], COL_Z),         // +Z
    ([[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]], COL_Z_NEG), // -Z
  ]
}

fn build_vertices() -> Vec<Vertex>
{
  faces()
    .iter()
    .flat_map(|(corners, col)| corners.iter().map(move |c| make_vertex(*c, *col)))
    .collect()
}

fn build_indices() -> Vec<u16>
{
  (0..6u16).flat_map(|face| {
    let base = face * 4;
    [base, base + 1, base + 2, base, base + 2, base + 3]
  })
  .collect()
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn every_face_has_its_own_corners()
  {
    assert_eq!(build_vertices().len(), 24);

    let indices = build_indices();
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| i < 24));
  }
}
