//! Window shell: winit event loop wiring, pointer input and per-frame
//! driving of the viewer.

mod input;
mod timing;

use crate::catalog::AssetRequest;
use crate::loader::ThreadedLoader;
use crate::render::HeadlessRenderer;
use crate::settings::SettingUpdate;
use crate::viewer::ViewerShell;
use input::{PointerDrag, PointerState};
use timing::FrameTiming;

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Pixels of drag per radian of orbit.
const ORBIT_PIXELS_PER_RADIAN: f32 = 300.0;
/// Pan scale relative to the viewer rectangle.
const PAN_PIXELS: f32 = 800.0;
/// Wheel lines per zoom unit.
const ZOOM_PER_LINE: f32 = 0.25;

pub struct App {
    window: Option<Arc<Window>>,
    shell: ViewerShell,
    loader: ThreadedLoader,
    renderer: HeadlessRenderer,
    pointer: PointerState,
    timing: FrameTiming,
    close_requested: bool,
}

impl App {
    pub fn new(request: AssetRequest) -> Self {
        let title = format!("exhibit3d - {}", request.display_title);
        Self {
            window: None,
            shell: ViewerShell::new(request),
            loader: ThreadedLoader::new(),
            renderer: HeadlessRenderer::new(),
            pointer: PointerState::default(),
            timing: FrameTiming::new(title),
            close_requested: false,
        }
    }

    fn handle_key(&mut self, key: PhysicalKey, event_loop: &ActiveEventLoop) {
        match key {
            PhysicalKey::Code(KeyCode::Escape) => {
                log::info!("escape pressed, shutting down");
                self.close_requested = true;
                event_loop.exit();
            }
            // Number row jumps between the named viewpoints.
            PhysicalKey::Code(KeyCode::Digit1) => self.shell.go_to_viewpoint("front"),
            PhysicalKey::Code(KeyCode::Digit2) => self.shell.go_to_viewpoint("back"),
            PhysicalKey::Code(KeyCode::Digit3) => self.shell.go_to_viewpoint("left"),
            PhysicalKey::Code(KeyCode::Digit4) => self.shell.go_to_viewpoint("right"),
            PhysicalKey::Code(KeyCode::Digit5) => self.shell.go_to_viewpoint("top"),
            PhysicalKey::Code(KeyCode::Digit6) => self.shell.go_to_viewpoint("bottom"),
            PhysicalKey::Code(KeyCode::KeyR) => self.shell.reset_zoom(),
            PhysicalKey::Code(KeyCode::KeyW) => {
                let wireframe = !self.shell.settings().wireframe;
                self.shell.apply_setting(SettingUpdate::Wireframe(wireframe));
            }
            PhysicalKey::Code(KeyCode::KeyG) => {
                let grid = !self.shell.settings().show_grid;
                self.shell.apply_setting(SettingUpdate::ShowGrid(grid));
            }
            PhysicalKey::Code(KeyCode::KeyL) => {
                let lit = !self.shell.settings().background_light;
                self.shell
                    .apply_setting(SettingUpdate::BackgroundLight(lit));
            }
            _ => {}
        }
    }

    fn render_frame(&mut self) {
        let now = Instant::now();
        self.shell.pump(&self.loader, now);
        self.shell.advance(self.timing.frame_dt, now);
        self.shell.present(&mut self.renderer);
        self.timing.update(
            self.window.as_deref(),
            now,
            self.shell.frame().content.name(),
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(format!(
                "exhibit3d - {}",
                self.shell.request().display_title
            ))
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                log::info!(
                    "window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height
                );
                self.window = Some(Arc::new(window));
            }
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.handle_key(event.physical_key, event_loop);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer
                    .handle_button(button, state == ElementState::Pressed);
            }
            WindowEvent::CursorLeft { .. } => self.pointer.clear(),
            WindowEvent::CursorMoved { position, .. } => {
                let drag = self
                    .pointer
                    .handle_motion(position.x as f32, position.y as f32);
                match drag {
                    Some(PointerDrag::Orbit { dx, dy }) => self.shell.rig_mut().orbit(
                        -dx / ORBIT_PIXELS_PER_RADIAN,
                        -dy / ORBIT_PIXELS_PER_RADIAN,
                    ),
                    Some(PointerDrag::Pan { dx, dy }) => {
                        self.shell.rig_mut().pan(-dx / PAN_PIXELS, dy / PAN_PIXELS)
                    }
                    None => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                };
                self.shell.rig_mut().zoom(lines * ZOOM_PER_LINE);
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("window resized to {}x{}", new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

pub fn run(request: AssetRequest) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(request);
    event_loop.run_app(&mut app)
}
