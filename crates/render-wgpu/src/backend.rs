use crate::RenderError;
use crate::context::GpuContext;
use crate::gpu::WgpuRenderer;
use pixelboy_common::Viewport;
use pixelboy_render::RenderBackend;
use pixelboy_scene::{FigureGroup, Scene};

/// Everything an overlay needs to draw on top of a finished scene frame.
pub struct OverlayFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Resolved, single-sample surface view. Load it, do not clear it.
    pub target: &'a wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    /// Surface size in physical pixels.
    pub size: [u32; 2],
}

/// Hook for 2D content drawn over the scene each frame, such as a title.
pub trait OverlayPainter {
    fn paint(&mut self, frame: OverlayFrame<'_>);
}

/// Overlay that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlay;

impl OverlayPainter for NoOverlay {
    fn paint(&mut self, _frame: OverlayFrame<'_>) {}
}

impl<T: OverlayPainter> OverlayPainter for Option<T> {
    fn paint(&mut self, frame: OverlayFrame<'_>) {
        if let Some(inner) = self {
            inner.paint(frame);
        }
    }
}

/// [`RenderBackend`] that draws the scene into a window surface with wgpu.
///
/// Owns the GPU context, scene resources and the overlay. `release` drops
/// all of them, surface included.
pub struct WgpuBackend<O: OverlayPainter = NoOverlay> {
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    overlay: Option<O>,
}

impl WgpuBackend<NoOverlay> {
    pub fn new(gpu: GpuContext) -> Self {
        Self::with_overlay(gpu, NoOverlay)
    }
}

impl<O: OverlayPainter> WgpuBackend<O> {
    pub fn with_overlay(gpu: GpuContext, overlay: O) -> Self {
        Self {
            gpu: Some(gpu),
            renderer: None,
            overlay: Some(overlay),
        }
    }

    pub fn gpu(&self) -> Option<&GpuContext> {
        self.gpu.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut O> {
        self.overlay.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.renderer.is_some()
    }
}

impl<O: OverlayPainter> RenderBackend for WgpuBackend<O> {
    type Error = RenderError;

    fn attach(
        &mut self,
        scene: &Scene,
        figure: &FigureGroup,
        viewport: Viewport,
    ) -> Result<(), RenderError> {
        let gpu = self.gpu.as_mut().ok_or(RenderError::Released)?;
        if gpu.size() != viewport {
            gpu.resize(viewport);
        }
        let renderer = WgpuRenderer::new(
            gpu.device(),
            gpu.format(),
            gpu.sample_count(),
            viewport,
            scene,
            figure,
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), RenderError> {
        let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_mut()) else {
            return Err(RenderError::NotAttached);
        };
        gpu.resize(viewport);
        renderer.resize(gpu.device(), viewport);
        Ok(())
    }

    fn draw(&mut self, scene: &Scene, figure: &FigureGroup) -> Result<(), RenderError> {
        let (Some(gpu), Some(renderer)) = (self.gpu.as_ref(), self.renderer.as_ref()) else {
            return Err(RenderError::NotAttached);
        };

        let output = match gpu.surface().get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e)),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        renderer.render(gpu.queue(), &mut encoder, &view, scene, figure);

        if let Some(overlay) = self.overlay.as_mut() {
            let size = gpu.size();
            overlay.paint(OverlayFrame {
                device: gpu.device(),
                queue: gpu.queue(),
                encoder: &mut encoder,
                target: &view,
                format: gpu.format(),
                size: [size.width, size.height],
            });
        }

        gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        // Scene resources and the overlay go before the device they came from.
        self.renderer = None;
        self.overlay = None;
        if self.gpu.take().is_some() {
            tracing::debug!("GPU context released");
        }
    }
}
