use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use winit::{
  application::ApplicationHandler,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use orbit_core::{Camera, OrbitConfig, OrbitControls};

use crate::input::{camera_control, InputState};
use crate::renderer::Renderer;

// Controller tick rate; auto-rotation speed is defined per tick
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

pub fn run(config: OrbitConfig) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = OrbitApp::new(config);

  event_loop.run_app(&mut app).context("event loop terminated abnormally")?;

  match app.error.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct OrbitApp
{
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  controls: OrbitControls,
  input: InputState,
  next_tick: Instant,
  error: Option<anyhow::Error>,
}

impl OrbitApp
{
  fn new(config: OrbitConfig) -> Self
  {
    let camera = Camera::new(16.0 / 9.0);

    Self {
      window: None,
      renderer: None,
      controls: OrbitControls::with_config(camera, config),
      input: InputState::new(),
      next_tick: Instant::now(),
      error: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes().with_title("Orbit — drag to rotate, middle-drag to zoom, right-drag to pan");
    let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

    self.input.set_scale_factor(window.scale_factor());

    let size = window.inner_size();
    if size.width > 0 && size.height > 0
    {
      self.controls.camera_mut().set_aspect(size.width as f32 / size.height as f32);
    }

    let renderer = pollster::block_on(Renderer::new(window.clone()))?;

    self.window = Some(window);
    self.renderer = Some(renderer);

    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    let gui_consumed = match &mut self.renderer
    {
      Some(renderer) =>
      {
        let response = renderer.gui_event(&window, &event);
        if response.repaint
        {
          window.request_redraw();
        }
        response.consumed
      }
      None => false,
    };

    camera_control::apply_event(&mut self.input, &mut self.controls, &event, gui_consumed);

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        self.controls.camera_mut().set_aspect(size.width as f32 / size.height as f32);
        window.request_redraw();
      }

      WindowEvent::RedrawRequested =>
      {
        self.redraw();
      }

      _ =>
      {}
    }
  }

  fn redraw(&mut self)
  {
    let Some(renderer) = &mut self.renderer
    else
    {
      return;
    };

    renderer.update_camera(self.controls.camera(), self.controls.center);

    let controls = &mut self.controls;
    if let Err(err) = renderer.render(|ctx| crate::panel::show(ctx, controls))
    {
      log::warn!("frame skipped: {err}");
    }
  }

  // One controller tick per frame interval. Input between ticks only
  // accumulates deltas inside the controller.
  fn frame(&mut self, event_loop: &ActiveEventLoop)
  {
    let now = Instant::now();
    let due = now >= self.next_tick;

    if due
    {
      self.next_tick = now + FRAME_INTERVAL;

      if self.controls.update()
      {
        if let Some(window) = &self.window
        {
          window.request_redraw();
        }
      }
    }

    let flow = if !due || self.controls.config.auto_rotate
    {
      ControlFlow::WaitUntil(self.next_tick)
    }
    else
    {
      ControlFlow::Wait
    };

    event_loop.set_control_flow(flow);
  }
}

impl ApplicationHandler for OrbitApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      log::error!("startup failed: {err:#}");
      self.error = Some(err);
      event_loop.exit();
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    self.frame(event_loop);
  }
}
