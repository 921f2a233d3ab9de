use glam::DVec3;

use super::{make_vertex, Vertex};

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const AXIS_LENGTH: f32 = 5.0;
const MARKER_ARM: f32 = 0.3;

const COL_X_AXIS: [f32; 3] = [1.0, 0.2, 0.2];
const COL_Y_AXIS: [f32; 3] = [0.2, 1.0, 0.2];
const COL_Z_AXIS: [f32; 3] = [0.2, 0.4, 1.0];

const COL_CENTER: [f32; 3] = [1.0, 1.0, 1.0]; // white
const COL_GROUND: [f32; 3] = [1.0, 1.0, 0.2]; // yellow
const COL_CONNECT: [f32; 3] = [0.5, 0.5, 0.5]; // grey

// World axes 6, centre cross 6, ground cross 6, connecting line 2
const MAX_VERTS: u64 = 20;

//
// ──────────────────────────────────────────────────────────────
//   MarkerMesh — world axes plus the orbit centre, which moves
//   whenever the user pans
// ──────────────────────────────────────────────────────────────
//

pub struct MarkerMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
}

impl MarkerMesh
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some("Marker Vertex Buffer"),
      size: MAX_VERTS * std::mem::size_of::<Vertex>() as u64,
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });

    Self { vertex_buffer, vertex_count: 0 }
  }

  pub fn update(&mut self, queue: &wgpu::Queue, center: DVec3)
  {
    let verts = build_vertices(center.as_vec3().to_array());

    self.vertex_count = verts.len() as u32;

    queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&verts));
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry helpers
// ──────────────────────────────────────────────────────────────
//

fn build_vertices(center: [f32; 3]) -> Vec<Vertex>
{
  let mut verts: Vec<Vertex> = Vec::with_capacity(MAX_VERTS as usize);
  let origin = [0.0_f32, 0.0, 0.0];

  verts.push(make_vertex(origin, COL_X_AXIS));
  verts.push(make_vertex([AXIS_LENGTH, 0.0, 0.0], COL_X_AXIS));
  verts.push(make_vertex(origin, COL_Y_AXIS));
  verts.push(make_vertex([0.0, AXIS_LENGTH, 0.0], COL_Y_AXIS));
  verts.push(make_vertex(origin, COL_Z_AXIS));
  verts.push(make_vertex([0.0, 0.0, AXIS_LENGTH], COL_Z_AXIS));

  push_cross(&mut verts, center, COL_CENTER);

  // Ground shadow and drop line, only when the centre is off the XZ plane
  if center[1].abs() > 0.001
  {
    let ground = [center[0], 0.0, center[2]];

    push_cross(&mut verts, ground, COL_GROUND);
    verts.push(make_vertex(center, COL_CONNECT));
    verts.push(make_vertex(ground, COL_CONNECT));
  }

  verts
}

fn push_cross(verts: &mut Vec<Vertex>, centre: [f32; 3], col: [f32; 3])
{
  let [x, y, z] = centre;

  verts.push(make_vertex([x - MARKER_ARM, y, z], col));
  verts.push(make_vertex([x + MARKER_ARM, y, z], col));

  verts.push(make_vertex([x, y - MARKER_ARM, z], col));
  verts.push(make_vertex([x, y + MARKER_ARM, z], col));

  verts.push(make_vertex([x, y, z - MARKER_ARM], col));
  verts.push(make_vertex([x, y, z + MARKER_ARM], col));
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn centre_on_ground_skips_shadow()
  {
    assert_eq!(build_vertices([1.0, 0.0, 2.0]).len(), 12);
  }

  #[test]
  fn raised_centre_fills_buffer()
  {
    assert_eq!(build_vertices([1.0, 3.0, 2.0]).len() as u64, MAX_VERTS);
  }
}
