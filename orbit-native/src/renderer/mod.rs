mod core;
mod cube;
mod depth;
mod gui;
mod marker;

pub use self::core::Renderer;

/// Vertex layout shared by every pipeline: [x, y, z,  r, g, b]
pub type Vertex = [f32; 6];

pub fn make_vertex(pos: [f32; 3], col: [f32; 3]) -> Vertex
{
  [pos[0], pos[1], pos[2], col[0], col[1], col[2]]
}
