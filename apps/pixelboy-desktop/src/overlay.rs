use egui::{Align2, Color32, FontId, LayerId, Order, Pos2, Vec2};
use pixelboy_render_wgpu::{OverlayFrame, OverlayPainter};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

pub const TITLE: &str = "3D Pixel Boy";
const TITLE_POS: Pos2 = Pos2::new(20.0, 20.0);
const TITLE_SIZE: f32 = 20.0;
const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

/// Draws the title text over the scene with egui.
pub struct TitleOverlay {
    window: Arc<Window>,
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl TitleOverlay {
    pub fn new(window: Arc<Window>, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        // Drawn into the resolved surface view, so single-sampled.
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        Self {
            window,
            ctx,
            winit_state,
            renderer,
        }
    }

    /// Forward a window event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        self.winit_state
            .on_window_event(&self.window, event)
            .consumed
    }

    fn draw_title(ctx: &egui::Context) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, egui::Id::new("title")));
        let font = FontId::monospace(TITLE_SIZE);
        painter.text(
            TITLE_POS + SHADOW_OFFSET,
            Align2::LEFT_TOP,
            TITLE,
            font.clone(),
            Color32::from_black_alpha(128),
        );
        painter.text(TITLE_POS, Align2::LEFT_TOP, TITLE, font, Color32::WHITE);
    }
}

impl OverlayPainter for TitleOverlay {
    fn paint(&mut self, frame: OverlayFrame<'_>) {
        let raw_input = self.winit_state.take_egui_input(&self.window);
        let full_output = self.ctx.run(raw_input, Self::draw_title);
        self.winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: frame.size,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(frame.device, frame.queue, *id, image_delta);
        }
        self.renderer.update_buffers(
            frame.device,
            frame.queue,
            frame.encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = frame
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: frame.target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
