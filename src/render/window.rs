//! Blocking on-screen presentation of a [`Plot`].

use std::sync::Arc;

use kurbo::{Affine, Size};
use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{ElementState, KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{Key, NamedKey},
  platform::run_on_demand::EventLoopExtRunOnDemand,
  window::{Window, WindowId},
};

use crate::{
  Plot,
  error::{DisplayError, ResultExt},
  render::{GpuHandle, Render, RenderConfig},
  runner::Presenter,
};

/// Shows each plot in a window and returns once that window is closed.
///
/// The event loop, window and GPU state are created for the first plot and
/// kept for the whole run. Closing the window hides it and hands control back;
/// the next plot retitles, resizes and shows the same window. A run that shows
/// nothing never touches the display.
#[derive(Default)]
pub struct Viewer {
  event_loop: Option<EventLoop<()>>,
  init:       Option<Init>,
}

impl Viewer {
  pub fn new() -> Self { Viewer::default() }

  fn take_event_loop(&mut self) -> Result<EventLoop<()>, DisplayError> {
    match self.event_loop.take() {
      Some(event_loop) => Ok(event_loop),
      None => {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        Ok(event_loop)
      }
    }
  }
}

impl Presenter for Viewer {
  fn present(&mut self, plot: &Plot) -> Result<(), DisplayError> {
    let mut event_loop = self.take_event_loop()?;

    if let Some(init) = &self.init {
      init.show(plot);
    }

    let mut app = App { plot, stale: true, render: Render::new(), init: &mut self.init, error: None };
    let result = event_loop.run_app_on_demand(&mut app);
    let error = app.error.take();
    self.event_loop = Some(event_loop);

    result?;
    match error {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }
}

impl Drop for Viewer {
  fn drop(&mut self) {
    // Tearing down the surface and device segfaults on some drivers, and the
    // process is about to exit anyway.
    if let Some(init) = self.init.take() {
      std::mem::forget(init);
    }
  }
}

struct App<'a> {
  plot:   &'a Plot,
  stale:  bool,
  render: Render,
  init:   &'a mut Option<Init>,
  error:  Option<DisplayError>,
}

struct Init {
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,
  blit:    wgpu::util::TextureBlitter,
  vello:   vello::Renderer,
  window:  Arc<Window>,
}

impl ApplicationHandler for App<'_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match Init::new(event_loop, self.plot) {
      Ok(init) => {
        log::debug!("opened window for {:?}", self.plot.title_text());
        init.window.request_redraw();
        *self.init = Some(init);
        self.stale = true;
      }
      Err(e) => {
        self.error = Some(e);
        event_loop.exit();
      }
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => self.close(event_loop),

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key, state: ElementState::Pressed, .. },
        ..
      } => match logical_key {
        Key::Named(NamedKey::Escape) => self.close(event_loop),
        Key::Character(c) if c == "q" => self.close(event_loop),
        _ => {}
      },

      WindowEvent::Resized(new_size) => {
        if let Some(init) = self.init.as_mut() {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init.handle.resize(&RenderConfig { width: new_size.width, height: new_size.height });
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::ScaleFactorChanged { .. } => self.stale = true,

      WindowEvent::RedrawRequested => {
        let Some(init) = self.init.as_mut() else { return };

        if self.stale {
          self.stale = false;
          let scale = init.window.scale_factor();
          let logical = Size::new(
            f64::from(init.config.width) / scale,
            f64::from(init.config.height) / scale,
          );

          self.render.scene.reset();
          self.plot.draw(&mut self.render, logical);

          let mut scene = vello::Scene::new();
          scene.append(&self.render.scene, Some(Affine::scale(scale)));

          init
            .vello
            .render_to_texture(
              &init.handle.device,
              &init.handle.queue,
              &scene,
              &init.handle.view,
              &vello::RenderParams {
                base_color:          self.render.background,
                width:               init.config.width,
                height:              init.config.height,
                antialiasing_method: vello::AaConfig::Msaa16,
              },
            )
            .log_err();
        }
        init.redraw();
      }

      _ => (),
    }
  }
}

impl App<'_> {
  fn close(&mut self, event_loop: &ActiveEventLoop) {
    log::debug!("closing window for {:?}", self.plot.title_text());
    if let Some(init) = self.init.as_ref() {
      init.window.set_visible(false);
    }
    event_loop.exit();
  }
}

impl Init {
  fn new(event_loop: &ActiveEventLoop, plot: &Plot) -> Result<Self, DisplayError> {
    let figure = plot.figure_size();
    let window = Arc::new(
      event_loop.create_window(
        Window::default_attributes()
          .with_title(plot.title_text().unwrap_or("plotdir"))
          .with_inner_size(LogicalSize::new(figure.width, figure.height))
          .with_min_inner_size(LogicalSize::new(320, 240)),
      )?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))
    .map_err(|e| DisplayError::Adapter(e.to_string()))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| f.is_srgb())
      .or_else(|| surface_caps.formats.first().copied())
      .ok_or_else(|| DisplayError::Adapter("surface supports no formats".to_string()))?;

    let render_config = RenderConfig { width: size.width.max(1), height: size.height.max(1) };
    let handle = GpuHandle::new(&render_config, &adapter)?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT,
      format:                        surface_format,
      width:                         render_config.width,
      height:                        render_config.height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto),
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    Ok(Init { surface, config, handle, blit, vello, window })
  }

  /// Points the kept window at the next plot.
  fn show(&self, plot: &Plot) {
    let figure = plot.figure_size();
    self.window.set_title(plot.title_text().unwrap_or("plotdir"));
    // Any size change arrives as a `Resized` event once the loop runs.
    let _ = self.window.request_inner_size(LogicalSize::new(figure.width, figure.height));
    self.window.set_visible(true);
    self.window.request_redraw();
  }

  fn redraw(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        self.window.request_redraw();
        return;
      }
      Err(e) => {
        log::warn!("dropped frame: {e}");
        return;
      }
    };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    self.window.pre_present_notify();
    frame.present();
  }
}
