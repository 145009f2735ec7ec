use crate::schedule::FrameSchedule;
use pixelboy_common::Viewport;
use pixelboy_figure::build_layout;
use pixelboy_render::RenderBackend;
use pixelboy_scene::{AnimationClock, FigureGroup, IdlePose, Scene, SceneConfig};
use std::fmt;

/// Lifecycle of a [`SceneRuntime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    Uninitialized,
    Running,
    TornDown,
}

impl fmt::Display for RuntimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuntimeState::Uninitialized => "uninitialized",
            RuntimeState::Running => "running",
            RuntimeState::TornDown => "torn down",
        };
        f.write_str(name)
    }
}

/// Errors from runtime lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("runtime already initialized")]
    AlreadyInitialized,
    #[error("runtime is {0}, expected running")]
    NotRunning(RuntimeState),
    #[error("runtime already torn down")]
    AlreadyTornDown,
    #[error("cannot initialize with empty viewport {0}")]
    EmptyViewport(Viewport),
    #[error("frame schedule halted")]
    Halted,
    #[error("render backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn backend_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> RuntimeError {
    RuntimeError::Backend(Box::new(e))
}

/// State that exists only while running.
#[derive(Debug)]
struct Live {
    scene: Scene,
    figure: FigureGroup,
    viewport: Viewport,
}

/// Owns the scene, the figure group and the animation clock, and drives a
/// render backend through attach, draw, resize and release.
///
/// Each runtime keeps its own clock, so independent instances never share
/// animation time.
pub struct SceneRuntime<B: RenderBackend> {
    config: SceneConfig,
    backend: B,
    state: RuntimeState,
    live: Option<Live>,
    clock: AnimationClock,
    schedule: FrameSchedule,
}

impl<B: RenderBackend> SceneRuntime<B> {
    pub fn new(config: SceneConfig, backend: B) -> Self {
        let clock = AnimationClock::new(config.animation.time_step);
        Self {
            config,
            backend,
            state: RuntimeState::Uninitialized,
            live: None,
            clock,
            schedule: FrameSchedule::new(),
        }
    }

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RuntimeState::Running
    }

    /// Whether the host should schedule another frame step.
    pub fn wants_frame(&self) -> bool {
        self.is_running() && self.schedule.is_active()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.live.as_ref().map(|l| &l.scene)
    }

    pub fn figure(&self) -> Option<&FigureGroup> {
        self.live.as_ref().map(|l| &l.figure)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.live.as_ref().map(|l| l.viewport)
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Build the scene and figure, attach the backend and start the frame
    /// schedule.
    pub fn initialize(&mut self, viewport: Viewport) -> Result<(), RuntimeError> {
        match self.state {
            RuntimeState::Uninitialized => {}
            RuntimeState::Running => return Err(RuntimeError::AlreadyInitialized),
            RuntimeState::TornDown => return Err(RuntimeError::AlreadyTornDown),
        }
        if viewport.is_empty() {
            return Err(RuntimeError::EmptyViewport(viewport));
        }

        let scene = Scene::new(&self.config, viewport);
        let figure = FigureGroup::from_layout(build_layout());
        self.backend
            .attach(&scene, &figure, viewport)
            .map_err(backend_error)?;

        tracing::info!(
            "scene runtime running: {} cubes, viewport {viewport}",
            figure.len()
        );
        self.live = Some(Live {
            scene,
            figure,
            viewport,
        });
        self.schedule.start();
        self.state = RuntimeState::Running;
        Ok(())
    }

    /// Advance the clock, pose the figure group and draw one frame.
    ///
    /// A backend failure cancels the schedule; later steps return
    /// [`RuntimeError::Halted`].
    pub fn frame_step(&mut self) -> Result<IdlePose, RuntimeError> {
        if self.state != RuntimeState::Running {
            return Err(RuntimeError::NotRunning(self.state));
        }
        if !self.schedule.is_active() {
            return Err(RuntimeError::Halted);
        }
        let Some(live) = self.live.as_mut() else {
            return Err(RuntimeError::NotRunning(self.state));
        };

        let time = self.clock.advance();
        let pose = IdlePose::at(time, &self.config.animation);
        live.figure.apply_pose(pose);

        if let Err(e) = self.backend.draw(&live.scene, &live.figure) {
            self.schedule.cancel();
            tracing::error!("frame {} failed, halting: {e}", self.clock.frames());
            return Err(backend_error(e));
        }
        self.schedule.record_frame();
        tracing::trace!(
            "frame {} t={time:.2} rotation={:.4} offset={:.4}",
            self.clock.frames(),
            pose.rotation,
            pose.offset
        );
        Ok(pose)
    }

    /// Adapt camera aspect and surface size to a new viewport.
    ///
    /// Returns `false` without touching anything when the size is unchanged
    /// or empty (a minimized window).
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, RuntimeError> {
        if self.state != RuntimeState::Running {
            return Err(RuntimeError::NotRunning(self.state));
        }
        let Some(live) = self.live.as_mut() else {
            return Err(RuntimeError::NotRunning(self.state));
        };

        let viewport = Viewport::new(width, height);
        if viewport.is_empty() {
            tracing::debug!("ignoring resize to empty viewport {viewport}");
            return Ok(false);
        }
        if viewport == live.viewport {
            return Ok(false);
        }

        self.backend.resize(viewport).map_err(backend_error)?;
        live.scene.camera.set_aspect(viewport.aspect());
        live.scene.camera.update_projection();
        live.viewport = viewport;
        tracing::debug!("resized to {viewport}");
        Ok(true)
    }

    /// Stop the frame schedule and release every backend resource.
    pub fn teardown(&mut self) -> Result<(), RuntimeError> {
        if self.state == RuntimeState::TornDown {
            return Err(RuntimeError::AlreadyTornDown);
        }
        self.schedule.cancel();
        self.backend.release();
        self.live = None;
        self.state = RuntimeState::TornDown;
        tracing::info!(
            "scene runtime torn down after {} frames",
            self.schedule.frames()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelboy_render::DebugTextRenderer;
    use std::f64::consts::PI;

    fn runtime() -> SceneRuntime<DebugTextRenderer> {
        SceneRuntime::new(SceneConfig::default(), DebugTextRenderer::new())
    }

    fn running(width: u32, height: u32) -> SceneRuntime<DebugTextRenderer> {
        let mut rt = runtime();
        rt.initialize(Viewport::new(width, height)).unwrap();
        rt
    }

    #[test]
    fn initialize_builds_scene_and_figure() {
        let rt = running(1024, 768);
        assert_eq!(rt.state(), RuntimeState::Running);
        assert!(rt.wants_frame());
        assert_eq!(rt.scene().unwrap().camera.aspect(), 1024.0 / 768.0);
        assert_eq!(rt.figure().unwrap().len(), 55);
        assert_eq!(rt.backend().cube_count(), 55);
        assert_eq!(rt.backend().viewport(), Some(Viewport::new(1024, 768)));
        assert_eq!(rt.clock().time(), 0.0);
    }

    #[test]
    fn frame_step_requires_running() {
        let mut rt = runtime();
        assert!(!rt.wants_frame());
        assert!(matches!(
            rt.frame_step(),
            Err(RuntimeError::NotRunning(RuntimeState::Uninitialized))
        ));
        assert_eq!(rt.backend().frames_drawn(), 0);
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut rt = running(800, 600);
        assert!(matches!(
            rt.initialize(Viewport::new(800, 600)),
            Err(RuntimeError::AlreadyInitialized)
        ));
    }

    #[test]
    fn initialize_rejects_empty_viewport() {
        let mut rt = runtime();
        assert!(matches!(
            rt.initialize(Viewport::new(0, 600)),
            Err(RuntimeError::EmptyViewport(_))
        ));
        assert_eq!(rt.state(), RuntimeState::Uninitialized);
    }

    #[test]
    fn frame_step_poses_group_and_draws() {
        let mut rt = running(800, 600);
        let pose = rt.frame_step().unwrap();
        let t = rt.clock().time();
        assert!((t - 0.01).abs() < 1e-9);
        assert!((f64::from(pose.rotation) - (t * 0.5).sin() * 0.3).abs() < 1e-7);
        assert!((f64::from(pose.offset) - t.sin().abs() * 0.3).abs() < 1e-7);

        let figure = rt.figure().unwrap();
        assert_eq!(figure.rotation(), pose.rotation);
        assert_eq!(figure.vertical_offset(), pose.offset);
        assert_eq!(rt.backend().frames_drawn(), 1);
        assert_eq!(rt.schedule().frames(), 1);
    }

    #[test]
    fn frame_steps_leave_scene_static() {
        let mut rt = running(800, 600);
        let before: Scene = rt.scene().unwrap().clone();
        let cubes = rt.figure().unwrap().cubes().to_vec();
        for _ in 0..50 {
            rt.frame_step().unwrap();
        }
        assert_eq!(rt.scene().unwrap(), &before);
        assert_eq!(rt.figure().unwrap().cubes(), cubes.as_slice());
    }

    #[test]
    fn end_to_end_closed_form() {
        let mut rt = running(1024, 768);
        assert_eq!(rt.scene().unwrap().camera.aspect(), 1024.0 / 768.0);

        // Step until the clock passes pi / 4.
        let mut pose = IdlePose::REST;
        while rt.clock().time() < PI / 4.0 {
            pose = rt.frame_step().unwrap();
        }
        let t = rt.clock().time();
        assert!((t - PI / 4.0).abs() < 0.011);
        assert!((f64::from(pose.rotation) - (t * 0.5).sin() * 0.3).abs() < 1e-6);
        assert!((f64::from(pose.offset) - t.sin().abs() * 0.3).abs() < 1e-6);
        assert!(rt.backend().last_frame().unwrap().contains("cubes=55"));
    }

    #[test]
    fn independent_runtimes_keep_separate_clocks() {
        let mut a = running(800, 600);
        let mut b = running(800, 600);
        for _ in 0..10 {
            a.frame_step().unwrap();
        }
        b.frame_step().unwrap();
        assert_eq!(a.clock().frames(), 10);
        assert_eq!(b.clock().frames(), 1);
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut rt = running(1024, 768);
        assert!(rt.resize(1920, 1080).unwrap());
        let cam = &rt.scene().unwrap().camera;
        assert_eq!(cam.aspect(), 1920.0 / 1080.0);
        assert_eq!(
            cam.projection_matrix(),
            glam::Mat4::perspective_rh(75.0_f32.to_radians(), 1920.0 / 1080.0, 0.1, 1000.0)
        );
        assert_eq!(rt.backend().viewport(), Some(Viewport::new(1920, 1080)));
        assert_eq!(rt.viewport(), Some(Viewport::new(1920, 1080)));
    }

    #[test]
    fn resize_to_same_size_is_noop() {
        let mut rt = running(1024, 768);
        let before = rt.scene().unwrap().clone();
        assert!(!rt.resize(1024, 768).unwrap());
        assert_eq!(rt.scene().unwrap(), &before);
        assert_eq!(rt.backend().resizes(), 0);
    }

    #[test]
    fn resize_to_empty_is_ignored() {
        let mut rt = running(1024, 768);
        assert!(!rt.resize(0, 0).unwrap());
        assert_eq!(rt.viewport(), Some(Viewport::new(1024, 768)));
        assert_eq!(rt.backend().resizes(), 0);
    }

    #[test]
    fn teardown_releases_and_stops_frames() {
        let mut rt = running(800, 600);
        rt.frame_step().unwrap();
        rt.teardown().unwrap();

        assert_eq!(rt.state(), RuntimeState::TornDown);
        assert!(!rt.wants_frame());
        assert!(rt.schedule().is_cancelled());
        assert!(rt.backend().is_released());
        assert!(rt.scene().is_none());
        assert!(rt.figure().is_none());

        assert!(matches!(
            rt.frame_step(),
            Err(RuntimeError::NotRunning(RuntimeState::TornDown))
        ));
        assert!(rt.resize(640, 480).is_err());
        assert_eq!(rt.backend().frames_drawn(), 1);
    }

    #[test]
    fn second_teardown_is_rejected() {
        let mut rt = running(800, 600);
        rt.teardown().unwrap();
        assert!(matches!(rt.teardown(), Err(RuntimeError::AlreadyTornDown)));
        assert!(matches!(
            rt.initialize(Viewport::new(800, 600)),
            Err(RuntimeError::AlreadyTornDown)
        ));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("device lost")]
    struct DeviceLost;

    /// Backend whose draws fail after a number of successful frames.
    #[derive(Default)]
    struct FlakyBackend {
        ok_frames: u32,
        draws: u32,
        fail_resize: bool,
        released: bool,
    }

    impl RenderBackend for FlakyBackend {
        type Error = DeviceLost;

        fn attach(&mut self, _: &Scene, _: &FigureGroup, _: Viewport) -> Result<(), DeviceLost> {
            Ok(())
        }

        fn resize(&mut self, _: Viewport) -> Result<(), DeviceLost> {
            if self.fail_resize {
                Err(DeviceLost)
            } else {
                Ok(())
            }
        }

        fn draw(&mut self, _: &Scene, _: &FigureGroup) -> Result<(), DeviceLost> {
            self.draws += 1;
            if self.draws > self.ok_frames {
                Err(DeviceLost)
            } else {
                Ok(())
            }
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    #[test]
    fn draw_failure_halts_schedule() {
        let backend = FlakyBackend {
            ok_frames: 2,
            ..Default::default()
        };
        let mut rt = SceneRuntime::new(SceneConfig::default(), backend);
        rt.initialize(Viewport::new(800, 600)).unwrap();
        rt.frame_step().unwrap();
        rt.frame_step().unwrap();

        let err = rt.frame_step().unwrap_err();
        assert!(matches!(err, RuntimeError::Backend(_)));
        assert!(err.to_string().contains("device lost"));
        assert!(!rt.wants_frame());
        assert!(matches!(rt.frame_step(), Err(RuntimeError::Halted)));
        assert_eq!(rt.backend().draws, 3);

        rt.teardown().unwrap();
        assert!(rt.backend().released);
    }

    #[test]
    fn failed_backend_resize_keeps_camera_and_viewport() {
        let backend = FlakyBackend {
            fail_resize: true,
            ..Default::default()
        };
        let mut rt = SceneRuntime::new(SceneConfig::default(), backend);
        rt.initialize(Viewport::new(1024, 768)).unwrap();
        let before = rt.scene().unwrap().clone();

        assert!(matches!(rt.resize(1920, 1080), Err(RuntimeError::Backend(_))));
        assert_eq!(rt.scene().unwrap(), &before);
        assert_eq!(rt.scene().unwrap().camera.aspect(), 1024.0 / 768.0);
        assert_eq!(rt.viewport(), Some(Viewport::new(1024, 768)));
    }
}
