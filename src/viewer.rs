//! Windowed splash viewer.
//!
//! [`Splash`] wires the pieces together: winit wheel and touch events go
//! through the [`ScrollInputTracker`] into the [`SplashController`], and every
//! redraw paints the [`Scene`] at the controller's progress. Once the splash
//! completes, scrolling moves a page offset instead, standing in for the
//! host document.
//!
//! ```ignore
//! Splash::new()
//!     .with_config(SplashConfig::bucket())
//!     .with_duration(1800.0)
//!     .run()?;
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::compositor::Scene;
use crate::config::SplashConfig;
use crate::controller::{Disposition, InputKind, ScrollInput, SplashController};
use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::input::ScrollInputTracker;

const TITLE: &str = "Aquasplash";

/// Builder for the splash viewer.
#[derive(Debug, Clone, Default)]
pub struct Splash {
    config: SplashConfig,
}

impl Splash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SplashConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the scroll distance that completes the splash.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.config.duration = duration;
        self
    }

    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let scene = Scene::new(&self.config)?;
        let controller = SplashController::new(self.config.duration)?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(scene, controller);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    controller: SplashController,
    tracker: ScrollInputTracker,
    /// Document scroll position once the splash has let go of input.
    page_offset: f64,
    error: Option<ViewerError>,
}

impl App {
    fn new(scene: Scene, controller: SplashController) -> Self {
        Self {
            window: None,
            gpu_state: None,
            scene,
            controller,
            tracker: ScrollInputTracker::new(),
            page_offset: 0.0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn scroll(&mut self, input: ScrollInput) {
        let before = self.controller.progress();
        match self.controller.handle(input) {
            Disposition::Consumed => {
                if self.controller.progress() != before {
                    self.refresh();
                }
            }
            Disposition::PassThrough => {
                // Wheel deltas are positive upward, touch deltas positive downward.
                let down = match input.kind {
                    InputKind::Wheel => -input.delta,
                    InputKind::TouchMove => input.delta,
                };
                self.page_offset = (self.page_offset + down).max(0.0);
                log::trace!("page offset {:.0}px", self.page_offset);
                self.update_title();
            }
        }
    }

    fn refresh(&self) {
        self.update_title();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let title = if self.controller.is_complete() {
            format!("{TITLE} - page offset {:.0}px", self.page_offset)
        } else {
            format!("{TITLE} - {:.0}%", self.controller.progress().get() * 100.0)
        };
        window.set_title(&title);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        let frame = self.scene.render(self.controller.progress(), gpu_state.viewport());
        match gpu_state.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, self.scene.capacity())) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(err) => return self.fail(event_loop, err.into()),
        }
        self.refresh();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.refresh();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Some(input) = self.tracker.handle_event(&event) {
                    self.scroll(input);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Progress;

    fn app(duration: f64) -> App {
        let config = SplashConfig::light();
        App::new(Scene::new(&config).unwrap(), SplashController::new(duration).unwrap())
    }

    #[test]
    fn test_builder_overrides_duration() {
        let splash = Splash::new().with_config(SplashConfig::bucket()).with_duration(900.0);
        assert_eq!(splash.config().duration, 900.0);
        assert_eq!(splash.config().droplets, SplashConfig::bucket().droplets);
    }

    #[test]
    fn test_scroll_drives_progress_then_page() {
        let mut app = app(200.0);
        app.scroll(ScrollInput::wheel(-100.0));
        assert_eq!(app.controller.progress(), Progress::clamped(0.5));
        assert_eq!(app.page_offset, 0.0);

        app.scroll(ScrollInput::wheel(-100.0));
        assert!(app.controller.is_complete());
        assert_eq!(app.page_offset, 0.0);

        app.scroll(ScrollInput::wheel(-30.0));
        app.scroll(ScrollInput::touch_move(20.0));
        assert_eq!(app.page_offset, 50.0);

        // The page cannot scroll above its top.
        app.scroll(ScrollInput::wheel(500.0));
        assert_eq!(app.page_offset, 0.0);
    }
}
