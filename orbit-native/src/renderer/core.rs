use std::sync::Arc;

use anyhow::Context;
use glam::DVec3;
use winit::event::WindowEvent;
use winit::window::Window;

use orbit_core::Camera;

use crate::camera::CameraUniform;

use super::cube::CubeMesh;
use super::depth::{DepthResources, DEPTH_FORMAT};
use super::gui::GuiRenderer;
use super::marker::MarkerMesh;
use super::Vertex;

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthResources,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  mesh_pipeline: wgpu::RenderPipeline,
  line_pipeline: wgpu::RenderPipeline,
  cube: CubeMesh,
  marker: MarkerMesh,

  gui: GuiRenderer,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone()).context("failed to create surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthResources::create(&device, &config);

    let (camera_buffer, camera_bind_group, camera_bgl) = create_camera_resources(&device);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
      label: Some("Scene Shader"),
      source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
    });

    let mesh_pipeline = create_pipeline(
      &device,
      &config,
      &camera_bgl,
      &shader,
      wgpu::PrimitiveTopology::TriangleList,
    );
    let line_pipeline =
      create_pipeline(&device, &config, &camera_bgl, &shader, wgpu::PrimitiveTopology::LineList);

    let cube = CubeMesh::create(&device);
    let marker = MarkerMesh::create(&device);
    let gui = GuiRenderer::new(&device, config.format, &window);

    log::info!("renderer ready: {}x{} {:?}", config.width, config.height, config.format);

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth,
      camera_buffer,
      camera_bind_group,
      mesh_pipeline,
      line_pipeline,
      cube,
      marker,
      gui,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthResources::create(&self.device, &self.config);
  }

  pub fn gui_event(&mut self, window: &Window, event: &WindowEvent) -> egui_winit::EventResponse
  {
    self.gui.on_window_event(window, event)
  }

  pub fn update_camera(&mut self, camera: &Camera, center: DVec3)
  {
    let uniform = CameraUniform::from_camera(camera);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    self.marker.update(&self.queue, center);
  }

  pub fn render(&mut self, build_ui: impl FnMut(&egui::Context)) -> Result<(), wgpu::SurfaceError>
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        self.surface.configure(&self.device, &self.config);
        self.surface.get_current_texture()?
      }
      Err(err) => return Err(err),
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    record_scene_pass(
      &mut encoder,
      &view,
      &self.depth.view,
      &self.mesh_pipeline,
      &self.line_pipeline,
      &self.camera_bind_group,
      &self.cube,
      &self.marker,
    );

    let full_output = self.gui.run(&self.window, build_ui);
    self.gui.render(&self.device, &self.queue, &mut encoder, &self.window, &view, full_output);

    self.queue.submit(Some(encoder.finish()));
    self.window.pre_present_notify();
    frame.present();

    Ok(())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> anyhow::Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor { label: Some("Orbit Device"), ..Default::default() })
    .await
    .context("failed to create device")
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let config = surface
    .get_default_config(adapter, size.width.max(1), size.height.max(1))
    .context("surface is not supported by the adapter")?;

  surface.configure(device, &config);
  Ok(config)
}

fn create_camera_resources(
  device: &wgpu::Device,
) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Camera Buffer"),
    size: std::mem::size_of::<CameraUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera BG"),
    layout: &camera_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
  });

  (camera_buffer, camera_bind_group, camera_bgl)
}

fn create_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  camera_bgl: &wgpu::BindGroupLayout,
  shader: &wgpu::ShaderModule,
  topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline
{
  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Scene Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Scene Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
          0 => Float32x3,  // position
          1 => Float32x3,  // colour
        ],
      }],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState { topology, ..Default::default() },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn record_scene_pass(
  encoder: &mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
  mesh_pipeline: &wgpu::RenderPipeline,
  line_pipeline: &wgpu::RenderPipeline,
  camera_bg: &wgpu::BindGroup,
  cube: &CubeMesh,
  marker: &MarkerMesh,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Scene Render Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      resolve_target: None,
      ops: wgpu::Operations {
        load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 }),
        store: wgpu::StoreOp::Store,
      },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations {
        load: wgpu::LoadOp::Clear(1.0),
        store: wgpu::StoreOp::Store,
      }),
      stencil_ops: None,
    }),
    ..Default::default()
  });

  pass.set_bind_group(0, camera_bg, &[]);

  pass.set_pipeline(mesh_pipeline);
  pass.set_vertex_buffer(0, cube.vertex_buffer.slice(..));
  pass.set_index_buffer(cube.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
  pass.draw_indexed(0..cube.index_count, 0, 0..1);

  if marker.vertex_count > 0
  {
    pass.set_pipeline(line_pipeline);
    pass.set_vertex_buffer(0, marker.vertex_buffer.slice(..));
    pass.draw(0..marker.vertex_count, 0..1);
  }
}
