use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};
use arcent::camera::OrbitCamera;
use arcent::cli::Cli;
use arcent::config::ArcentConfig;
use arcent::frame::{FpsCounter, FrameIterator};
use arcent::renderer::MeshRenderer;
use arcent::{panel, FrameDriver, SierpinskiGenerator};

struct App {
    config: ArcentConfig,
    window: Option<Arc<Window>>,
    renderer: Option<MeshRenderer>,
    driver: FrameDriver<SierpinskiGenerator>,
    camera: OrbitCamera,
    frames: FrameIterator,
    fps: FpsCounter,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: ArcentConfig, driver: FrameDriver<SierpinskiGenerator>) -> Self {
        let aspect = config.window.width as f32 / config.window.height as f32;
        Self {
            config,
            window: None,
            renderer: None,
            driver,
            camera: OrbitCamera::new(aspect),
            frames: FrameIterator::new(),
            fps: FpsCounter::new(),
            fatal: None,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        self.camera.set_aspect(width, height);
        self.driver.resize(width, height);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            return;
        };
        if let Some(fps) = self.fps.update(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let update = match self.driver.update(frame.delta) {
            Ok(update) => update,
            Err(e) => {
                log::error!("Geometry update failed: {:#}", e);
                self.fatal = Some(e);
                event_loop.exit();
                return;
            }
        };
        if update.regenerated {
            log::trace!("t={:.3} forward={}", update.time, update.forward);
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        renderer.sync(self.driver.scene());
        let model = self.driver.scene().world_transform().unwrap_or_default();
        let uniforms = self.driver.shader().to_block(self.camera.view_proj(), model);

        let show_ui = self.config.show_ui;
        let fps = self.fps.fps();
        let driver = &mut self.driver;
        let result = renderer.render(window, &uniforms, |ctx| {
            if show_ui {
                panel::draw(ctx, driver.panel_state(), fps);
            }
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(MeshRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.resize(width, height);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.camera.process_keyboard(&event),
            WindowEvent::MouseInput { state, button, .. } => self.camera.process_mouse_button(button, state),
            WindowEvent::CursorMoved { position, .. } => self.camera.process_cursor_moved(position.x, position.y),
            WindowEvent::MouseWheel { delta, .. } => self.camera.process_scroll(delta),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Simulate frames without a window, logging every geometry rebuild
fn run_headless(driver: &mut FrameDriver<SierpinskiGenerator>, frames: u64) -> anyhow::Result<()> {
    let mut rebuilds = 0u64;
    let processed = driver.run(FrameIterator::fixed_step(1.0 / 60.0).take(frames as usize), |frame, update| {
        if update.regenerated {
            rebuilds += 1;
            log::debug!(
                "frame {}: t={:.3} {}",
                frame.number,
                update.time,
                if update.forward { "forward" } else { "backward" }
            );
        }
        false
    })?;

    log::info!(
        "Headless run finished: {} frames, {} rebuilds, t={:.3}",
        processed,
        rebuilds,
        driver.animation().time()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ArcentConfig::load(&cli)?;

    let mut driver = FrameDriver::new(SierpinskiGenerator::default(), &config);
    driver.prime().context("Failed to build initial geometry")?;

    if cli.headless {
        return run_headless(&mut driver, cli.frames);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, driver);

    log::info!("The First Arcent - drag to orbit, scroll to zoom, R to reset, Escape to quit");
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
