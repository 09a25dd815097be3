//! Seam between the viewer and the rendering/interaction backend.
//!
//! The viewer describes one frame; the backend draws it. Everything engine
//! specific (scene graph traversal, material flags, shadow maps, the actual
//! swap chain) lives behind [`SceneRenderer`]. The headless implementation
//! here records frame summaries, which is all the app shell and the tests
//! need.

use glam::Vec3;

use crate::lights::LightRig;
use crate::loader::{FailureReason, SceneHandle};
use crate::placeholder::ShapeDescriptor;
use crate::presets::{Fill, Rgb};

/// The graphics context is gone and will not come back within this process.
/// The user has to reload; no automatic recovery is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("render context lost")]
pub struct ContextLost;

/// What to draw inside the viewer rectangle.
#[derive(Debug)]
pub enum FrameContent<'a> {
    Spinner { title: &'a str, progress: u8 },
    Scene(&'a SceneHandle),
    ErrorBanner(&'a FailureReason),
    Placeholder {
        shape: ShapeDescriptor,
        color: Rgb,
        /// Slow idle spin around Y, radians.
        spin: f32,
    },
    ContextLost,
}

impl FrameContent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FrameContent::Spinner { .. } => "spinner",
            FrameContent::Scene(_) => "scene",
            FrameContent::ErrorBanner(_) => "error-banner",
            FrameContent::Placeholder { .. } => "placeholder",
            FrameContent::ContextLost => "context-lost",
        }
    }
}

/// One fully described frame.
#[derive(Debug)]
pub struct FrameDesc<'a> {
    pub background: Fill,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    /// `None` when background lighting is off.
    pub lights: Option<LightRig>,
    pub content: FrameContent<'a>,
    pub wireframe: bool,
    pub show_grid: bool,
    pub light_marker: Option<Vec3>,
}

pub trait SceneRenderer {
    /// Draw one frame. `Err(ContextLost)` means the backend's context is
    /// unrecoverably gone; the caller switches the viewer to its blocking
    /// reload state.
    fn present(&mut self, frame: &FrameDesc<'_>) -> Result<(), ContextLost>;
}

/// Backend-free renderer: counts frames and keeps the last content tag.
pub struct HeadlessRenderer {
    frames: u64,
    last_content: Option<&'static str>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self {
            frames: 0,
            last_content: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_content(&self) -> Option<&'static str> {
        self.last_content
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn present(&mut self, frame: &FrameDesc<'_>) -> Result<(), ContextLost> {
        self.frames += 1;
        let content = frame.content.name();
        if self.last_content != Some(content) {
            log::debug!(
                "frame content -> {content} (eye {:?}, lights {})",
                frame.camera_eye,
                if frame.lights.is_some() { "on" } else { "off" }
            );
            if let FrameContent::Scene(scene) = &frame.content {
                let buffer_bytes: usize =
                    scene.buffers().iter().map(|data| data.0.len()).sum();
                log::info!(
                    "scene on screen: {} root scenes, {} nodes, {} meshes, {} primitives, {buffer_bytes} buffer bytes",
                    scene.document().scenes().count(),
                    scene.node_count(),
                    scene.mesh_count(),
                    scene.primitive_count(),
                );
            }
        }
        self.last_content = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::BACKGROUNDS;

    #[test]
    fn headless_renderer_tracks_content() {
        let mut renderer = HeadlessRenderer::new();
        let frame = FrameDesc {
            background: BACKGROUNDS[0].fill,
            camera_eye: Vec3::new(0.0, 0.0, 5.0),
            camera_target: Vec3::ZERO,
            lights: None,
            content: FrameContent::Spinner {
                title: "Earth Layers",
                progress: 10,
            },
            wireframe: false,
            show_grid: false,
            light_marker: None,
        };
        renderer.present(&frame).unwrap();
        renderer.present(&frame).unwrap();
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last_content(), Some("spinner"));
    }

    #[test]
    fn presenting_a_scene_reads_its_summary() {
        let scene = crate::loader::parse_scene(crate::loader::parse::EMPTY_GLTF).unwrap();
        let mut renderer = HeadlessRenderer::new();
        let frame = FrameDesc {
            background: BACKGROUNDS[0].fill,
            camera_eye: Vec3::new(0.0, 0.0, 5.0),
            camera_target: Vec3::ZERO,
            lights: None,
            content: FrameContent::Scene(&scene),
            wireframe: false,
            show_grid: false,
            light_marker: None,
        };
        renderer.present(&frame).unwrap();
        assert_eq!(renderer.last_content(), Some("scene"));
        assert_eq!(scene.buffers().len(), scene.document().buffers().count());
    }
}
