use pixelboy_common::Viewport;
use pixelboy_scene::{ArmSide, FigureGroup, Scene};
use std::convert::Infallible;

/// Renderer-agnostic backend. All renderers implement this trait.
///
/// The runtime drives the lifecycle: `attach` once, then any interleaving of
/// `resize` and `draw`, then `release` once.
pub trait RenderBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create the geometry, materials and surface state for the scene.
    fn attach(
        &mut self,
        scene: &Scene,
        figure: &FigureGroup,
        viewport: Viewport,
    ) -> Result<(), Self::Error>;

    /// Resize the drawable surface to exactly `viewport` pixels.
    fn resize(&mut self, viewport: Viewport) -> Result<(), Self::Error>;

    /// Draw one frame from the current scene and figure pose.
    fn draw(&mut self, scene: &Scene, figure: &FigureGroup) -> Result<(), Self::Error>;

    /// Drop every resource created by `attach`.
    fn release(&mut self);
}

/// Headless backend that renders each frame as a text report.
///
/// Useful for CLI output, logging, and testing the runtime without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    viewport: Option<Viewport>,
    cube_count: usize,
    frames_drawn: u64,
    resizes: u64,
    last_frame: Option<String>,
    released: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current surface size, if attached.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn cube_count(&self) -> usize {
        self.cube_count
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Number of surface resizes performed since attach.
    pub fn resizes(&self) -> u64 {
        self.resizes
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Render a frame report without recording it.
    pub fn render_text(&self, scene: &Scene, figure: &FigureGroup) -> String {
        let mut out = String::new();
        let viewport = self
            .viewport
            .map(|v| v.to_string())
            .unwrap_or_else(|| "detached".into());
        let cam = &scene.camera;
        out.push_str(&format!(
            "=== Frame {} (viewport {viewport}) ===\n",
            self.frames_drawn + 1
        ));
        out.push_str(&format!("Background: {}\n", scene.background));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}\n",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.fov_degrees,
            cam.aspect()
        ));
        out.push_str(&format!(
            "Figure: cubes={} rotation={:.4} offset={:.4}\n",
            figure.len(),
            figure.rotation(),
            figure.vertical_offset()
        ));

        let shoulder = |side| {
            figure
                .world_position(figure.arm_indices(side).start)
                .map(|p| format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z))
                .unwrap_or_else(|| "-".into())
        };
        out.push_str(&format!(
            "Arms: left={} right={}\n",
            shoulder(ArmSide::Left),
            shoulder(ArmSide::Right)
        ));
        out
    }
}

impl RenderBackend for DebugTextRenderer {
    type Error = Infallible;

    fn attach(
        &mut self,
        _scene: &Scene,
        figure: &FigureGroup,
        viewport: Viewport,
    ) -> Result<(), Infallible> {
        self.viewport = Some(viewport);
        self.cube_count = figure.len();
        self.released = false;
        tracing::debug!("debug renderer attached: {} cubes at {viewport}", self.cube_count);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), Infallible> {
        self.viewport = Some(viewport);
        self.resizes += 1;
        Ok(())
    }

    fn draw(&mut self, scene: &Scene, figure: &FigureGroup) -> Result<(), Infallible> {
        let frame = self.render_text(scene, figure);
        tracing::trace!("{frame}");
        self.last_frame = Some(frame);
        self.frames_drawn += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.viewport = None;
        self.cube_count = 0;
        self.last_frame = None;
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelboy_figure::build_layout;
    use pixelboy_scene::SceneConfig;

    fn fixture() -> (Scene, FigureGroup) {
        let scene = Scene::new(&SceneConfig::default(), Viewport::new(800, 600));
        let figure = FigureGroup::from_layout(build_layout());
        (scene, figure)
    }

    #[test]
    fn report_before_attach() {
        let (scene, figure) = fixture();
        let renderer = DebugTextRenderer::new();
        let text = renderer.render_text(&scene, &figure);
        assert!(text.contains("viewport detached"));
        assert!(text.contains("cubes=55"));
        assert!(text.contains("Background: #87ceeb"));
    }

    #[test]
    fn report_is_one_line_per_section() {
        let (scene, figure) = fixture();
        let text = DebugTextRenderer::new().render_text(&scene, &figure);
        assert!(text.ends_with('\n'));
        let heads: Vec<&str> = text
            .lines()
            .map(|l| l.split([':', ' ']).next().unwrap_or(""))
            .collect();
        assert_eq!(heads, ["===", "Background", "Camera", "Figure", "Arms"]);
    }

    #[test]
    fn draw_records_frames() {
        let (scene, figure) = fixture();
        let mut renderer = DebugTextRenderer::new();
        renderer
            .attach(&scene, &figure, Viewport::new(800, 600))
            .unwrap();
        renderer.draw(&scene, &figure).unwrap();
        renderer.draw(&scene, &figure).unwrap();

        assert_eq!(renderer.frames_drawn(), 2);
        let last = renderer.last_frame().unwrap();
        assert!(last.contains("=== Frame 2 (viewport 800x600) ==="));
        assert!(last.contains("aspect=1.333"));
        assert!(last.contains("left=(-2.00, 5.00, 0.00)"));
        assert!(last.contains("right=(2.00, 5.00, 0.00)"));
    }

    #[test]
    fn release_drops_state() {
        let (scene, figure) = fixture();
        let mut renderer = DebugTextRenderer::new();
        renderer
            .attach(&scene, &figure, Viewport::new(800, 600))
            .unwrap();
        renderer.resize(Viewport::new(640, 480)).unwrap();
        assert_eq!(renderer.viewport(), Some(Viewport::new(640, 480)));
        assert_eq!(renderer.resizes(), 1);

        renderer.release();
        assert!(renderer.is_released());
        assert!(!renderer.is_attached());
        assert_eq!(renderer.cube_count(), 0);
        assert!(renderer.last_frame().is_none());
    }
}
