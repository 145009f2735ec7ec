mod overlay;

use anyhow::{Context as _, Result};
use clap::Parser;
use overlay::{TITLE, TitleOverlay};
use pixelboy_common::Viewport;
use pixelboy_render_wgpu::{GpuContext, WgpuBackend};
use pixelboy_runtime::SceneRuntime;
use pixelboy_scene::SceneConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "pixelboy-desktop", about = "Animated voxel pixel boy in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Scene configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// MSAA sample count (1 or 4)
    #[arg(long, default_value_t = 4, value_parser = parse_msaa)]
    msaa: u32,

    /// Hide the title overlay
    #[arg(long)]
    no_overlay: bool,
}

fn parse_msaa(s: &str) -> Result<u32, String> {
    match s {
        "1" => Ok(1),
        "4" => Ok(4),
        other => Err(format!("unsupported sample count {other}, expected 1 or 4")),
    }
}

type Backend = WgpuBackend<Option<TitleOverlay>>;

struct PixelBoyApp {
    config: SceneConfig,
    initial_size: PhysicalSize<u32>,
    msaa: u32,
    show_overlay: bool,
    window: Option<Arc<Window>>,
    runtime: Option<SceneRuntime<Backend>>,
    fatal: Option<anyhow::Error>,
}

impl PixelBoyApp {
    fn new(cli: &Cli, config: SceneConfig) -> Self {
        Self {
            config,
            initial_size: PhysicalSize::new(cli.width, cli.height),
            msaa: cli.msaa,
            show_overlay: !cli.no_overlay,
            window: None,
            runtime: None,
            fatal: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(self.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let mut viewport = Viewport::new(size.width, size.height);
        if viewport.is_empty() {
            viewport = Viewport::new(self.initial_size.width, self.initial_size.height);
        }

        let gpu = GpuContext::new(window.clone(), viewport, self.msaa)
            .context("failed to initialize GPU")?;
        let overlay = self
            .show_overlay
            .then(|| TitleOverlay::new(window.clone(), gpu.device(), gpu.format()));

        let backend = WgpuBackend::with_overlay(gpu, overlay);
        let mut runtime = SceneRuntime::new(self.config.clone(), backend);
        runtime
            .initialize(viewport)
            .context("failed to initialize scene")?;

        window.request_redraw();
        self.window = Some(window);
        self.runtime = Some(runtime);
        Ok(())
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(runtime) = &mut self.runtime {
            if runtime.is_running() {
                if let Err(e) = runtime.teardown() {
                    tracing::warn!("teardown failed: {e}");
                }
            }
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.fatal = Some(error);
        self.shut_down(event_loop);
    }
}

impl ApplicationHandler for PixelBoyApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(runtime) = &mut self.runtime else {
            return;
        };

        if let Some(Some(overlay)) = runtime.backend_mut().overlay_mut() {
            if overlay.on_window_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                self.shut_down(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Err(e) = runtime.resize(new_size.width, new_size.height) {
                    self.fail(event_loop, e.into());
                }
            }
            WindowEvent::RedrawRequested => {
                if !runtime.wants_frame() {
                    return;
                }
                if let Err(e) = runtime.frame_step() {
                    self.fail(event_loop, anyhow::Error::new(e).context("frame failed"));
                    return;
                }
                if runtime.wants_frame() {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let running = self.runtime.as_ref().is_some_and(|r| r.wants_frame());
        if let (true, Some(window)) = (running, &self.window) {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    tracing::info!("pixelboy-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PixelBoyApp::new(&cli, config);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
