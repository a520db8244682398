use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use edu_viz::cli::Cli;
use edu_viz::core::controller::{Button, Controller};
use edu_viz::core::input_adapter::WinitController;
use edu_viz::core::picking::SurfaceRect;
use edu_viz::core::timer::FpsCounter;
use edu_viz::core::window::WindowDimensions;
use edu_viz::core::{Clock, GpuContext, Lifecycle};
use edu_viz::prefs::Preferences;
use edu_viz::render::{EguiOverlay, WindowSurface};
use edu_viz::scenes::{self, MountContext, ViewKind};
use edu_viz::traits::{FrameContext, Visualization};
use edu_viz::ui;

const FPS_REPORT_HZ: f32 = 1.0;

fn dimensions(size: winit::dpi::PhysicalSize<u32>) -> WindowDimensions {
    WindowDimensions::new(size.width, size.height)
}

/// Window, GPU and the one mounted visualization
struct Viewer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: WindowSurface,
    overlay: EguiOverlay,
    input: WinitController,
    views: Lifecycle<Box<dyn Visualization>>,
    mount_ctx: MountContext,
    clock: Clock,
    fps: FpsCounter,
    show_ui: bool,
}

impl Viewer {
    async fn new(window: Arc<Window>, cli: &Cli, prefs: Preferences) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let size = dimensions(window.inner_size());
        let surface = WindowSurface::new(surface, &gpu, size);
        let overlay = EguiOverlay::new(&window, gpu.device(), surface.format());

        let mount_ctx = MountContext {
            gpu: gpu.clone(),
            color_format: surface.format(),
            size,
            asset_dir: cli.asset_dir.clone(),
            offline: cli.offline,
            texture_timeout: cli.texture_timeout(),
            prefs,
        };

        Ok(Self {
            window,
            gpu,
            surface,
            overlay,
            input: WinitController::new(),
            views: Lifecycle::new(),
            mount_ctx,
            clock: Clock::new(),
            fps: FpsCounter::new(FPS_REPORT_HZ),
            show_ui: !cli.no_ui,
        })
    }

    fn current_kind(&self) -> Option<ViewKind> {
        self.views.handle().map(|v| v.kind())
    }

    /// Unmount the current view (keeping its preferences) and mount `kind`
    fn show(&mut self, kind: ViewKind) -> Result<()> {
        if let Some(view) = self.views.handle() {
            view.store_preferences(&mut self.mount_ctx.prefs);
        }
        self.mount_ctx.prefs.last_view = kind;
        self.mount_ctx.size = self.surface.size();

        let ctx = &self.mount_ctx;
        self.views.mount(|| -> Result<Box<dyn Visualization>> { Ok(scenes::mount(kind, ctx)) })?;
        self.window.set_title(&format!("edu-viz - {}", kind.title()));
        self.clock.tick();
        Ok(())
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        let consumed = self.show_ui && self.overlay.handle_event(&self.window, event);
        // keys typed into a panel never reach the scene
        if consumed && matches!(event, WindowEvent::KeyboardInput { .. }) {
            return;
        }
        self.input.process_event(event);
    }

    fn resize(&mut self, size: WindowDimensions) {
        if size.is_empty() {
            return;
        }
        self.surface.resize(&self.gpu, size);
        self.mount_ctx.size = size;
        if let Some(view) = self.views.handle_mut() {
            view.resize(&self.gpu, size);
        }
    }

    fn requested_view(&self) -> Option<ViewKind> {
        [
            (Button::Digit1, ViewKind::Solar),
            (Button::Digit2, ViewKind::Globe),
            (Button::Digit3, ViewKind::Geometry),
        ]
        .into_iter()
        .find(|(button, _)| self.input.was_pressed(*button))
        .map(|(_, kind)| kind)
    }

    /// Fire the pending frame: update, draw the scene, then the panels
    fn redraw(&mut self) -> Result<()> {
        let Some(ticket) = self.views.pending_ticket() else {
            return Ok(());
        };
        let Some(frame) = self.surface.acquire(&self.gpu)? else {
            return Ok(());
        };

        let delta = self.clock.tick();
        if let Some(fps) = self.fps.frame(delta) {
            debug!("{:.0} fps", fps);
        }

        let mut switch_to = self.requested_view();
        if self.input.was_pressed(Button::KeyR) {
            if let Some(view) = self.views.handle_mut() {
                view.reset();
            }
        }

        let pointer_free = !(self.show_ui && self.overlay.wants_pointer());
        let click = self.input.take_click().filter(|_| pointer_free);
        let size = self.surface.size();
        let target = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let gpu = &self.gpu;
        let input: &dyn Controller = &self.input;
        self.views.fire(ticket, |view, _| {
            let frame_ctx = FrameContext {
                gpu,
                input,
                click,
                pointer_free,
                surface: SurfaceRect::from_size(size.width as f32, size.height as f32),
                delta,
            };
            view.update(&frame_ctx);
            view.render(gpu, &mut encoder, &target);
        });

        if self.show_ui {
            let fps = self.fps.fps();
            let current = self.current_kind();
            if let Some(view) = self.views.handle_mut() {
                self.overlay.render(&self.window, &self.gpu, &mut encoder, &target, |ctx| {
                    view.ui(ctx);
                    if let Some(kind) = current.and_then(|k| ui::common::view_selector(ctx, k)) {
                        switch_to = Some(kind);
                    }
                    ui::common::fps_badge(ctx, fps);
                });
            }
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        self.input.reset_deltas();

        if let Some(kind) = switch_to.filter(|k| Some(*k) != self.current_kind()) {
            info!("switching to {}", kind);
            self.show(kind)?;
        }
        Ok(())
    }

    fn preferences(&self) -> Preferences {
        let mut prefs = self.mount_ctx.prefs.clone();
        if let Some(view) = self.views.handle() {
            view.store_preferences(&mut prefs);
            prefs.last_view = view.kind();
        }
        prefs
    }
}

struct App {
    cli: Cli,
    prefs: Preferences,
    prefs_path: Option<PathBuf>,
    viewer: Option<Viewer>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: Cli, prefs: Preferences, prefs_path: Option<PathBuf>) -> Self {
        Self {
            cli,
            prefs,
            prefs_path,
            viewer: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("edu-viz")
                    .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let mut viewer = pollster::block_on(Viewer::new(window, &self.cli, self.prefs.clone()))?;
        let first = self.cli.view.unwrap_or(self.prefs.last_view);
        viewer.show(first)?;
        Ok(viewer)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_none() {
            match self.start(event_loop) {
                Ok(viewer) => self.viewer = Some(viewer),
                Err(err) => self.fail(event_loop, err),
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

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
            WindowEvent::Resized(size) => viewer.resize(dimensions(size)),
            WindowEvent::RedrawRequested => {
                if let Err(err) = viewer.redraw() {
                    self.fail(event_loop, err);
                }
            }
            other => viewer.handle_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            if viewer.views.frame_pending() {
                viewer.window.request_redraw();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.take() else {
            return;
        };
        let prefs = viewer.preferences();
        drop(viewer);

        if let Some(path) = &self.prefs_path {
            if let Err(err) = prefs.save(path) {
                warn!("could not save preferences: {:#}", err);
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let prefs_path = cli.prefs_path();
    let prefs = prefs_path
        .as_deref()
        .map(Preferences::load_or_default)
        .unwrap_or_default();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(cli, prefs, prefs_path);

    println!("edu-viz - Controls: drag to orbit, wheel to zoom, click to pick, 1/2/3 views, R reset, Escape to quit");
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
