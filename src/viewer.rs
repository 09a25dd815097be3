//! Viewer composition: load controller + camera rig + settings, plus the
//! surface external controls drive (settings, viewpoints, zoom reset).

use std::time::Instant;

use crate::camera::CameraRig;
use crate::catalog::AssetRequest;
use crate::lights::{light_marker, light_rig};
use crate::loader::{AssetLoadController, FailureReason, LoadState, SceneHandle, ThreadedLoader};
use crate::placeholder::placeholder_for;
use crate::presets::background_or_default;
use crate::render::{FrameContent, FrameDesc, SceneRenderer};
use crate::settings::{SettingUpdate, ViewerSettings};

/// Rotation speed of the degraded placeholder, radians per second.
const PLACEHOLDER_SPIN_RATE: f32 = 0.5;

/// What the surrounding UI shows, derived from the load state. Context loss
/// overrides everything else.
#[derive(Debug)]
pub enum DisplayState<'a> {
    Spinner { progress: u8 },
    Scene(&'a SceneHandle),
    ErrorBanner(&'a FailureReason),
    Placeholder,
    ContextLost,
}

pub struct ViewerShell {
    request: AssetRequest,
    settings: ViewerSettings,
    rig: CameraRig,
    controller: AssetLoadController,
    context_lost: bool,
    placeholder_spin: f32,
}

impl ViewerShell {
    pub fn new(request: AssetRequest) -> Self {
        let rig = CameraRig::for_asset(&request.asset_id);
        let mut controller = AssetLoadController::new();
        controller.start(request.clone());
        Self {
            request,
            settings: ViewerSettings::default(),
            rig,
            controller,
            context_lost: false,
            placeholder_spin: 0.0,
        }
    }

    pub fn request(&self) -> &AssetRequest {
        &self.request
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// Supersede the current asset. Re-frames the camera for the new
    /// asset's zoom profile; a same-URL request is a no-op end to end.
    pub fn load(&mut self, request: AssetRequest) {
        if !self.controller.start(request.clone()) {
            return;
        }
        self.rig = CameraRig::for_asset(&request.asset_id);
        self.placeholder_spin = 0.0;
        self.request = request;
    }

    // -- the four hooks external control widgets need ----------------------

    pub fn apply_setting(&mut self, update: SettingUpdate) {
        self.settings.apply(update);
    }

    /// Jump the camera to a named viewpoint. The active viewpoint setting
    /// only changes when the id exists; unknown ids change nothing.
    pub fn go_to_viewpoint(&mut self, id: &str) {
        if self.rig.go_to_viewpoint(id) {
            self.settings.apply(SettingUpdate::Viewpoint(id.to_string()));
        } else {
            log::warn!("unknown viewpoint id: {id}");
        }
    }

    pub fn reset_zoom(&mut self) {
        self.rig.reset_zoom();
    }

    // ----------------------------------------------------------------------

    /// Spawn the armed download (at most one per request) and commit any
    /// completions the load threads have delivered. Never waits; a pending
    /// download just leaves the spinner up for another frame.
    pub fn pump(&mut self, loader: &ThreadedLoader, now: Instant) {
        if let Some(job) = self.controller.take_job() {
            loader.spawn(job);
        }
        while let Some(event) = loader.poll() {
            self.controller.apply(event, now);
        }
        self.controller.tick(now);
    }

    #[cfg(test)]
    fn controller_mut(&mut self) -> &mut AssetLoadController {
        &mut self.controller
    }

    /// Per-frame bookkeeping: degrade timer and placeholder spin.
    pub fn advance(&mut self, frame_dt: f32, now: Instant) {
        self.controller.tick(now);
        if matches!(self.controller.state(), LoadState::Degraded) {
            self.placeholder_spin += frame_dt * PLACEHOLDER_SPIN_RATE;
        }
    }

    /// The graphics context is gone. Blocking state, manual reload only.
    pub fn notify_context_lost(&mut self) {
        if !self.context_lost {
            log::error!("render context lost; manual reload required");
        }
        self.context_lost = true;
    }

    pub fn context_lost(&self) -> bool {
        self.context_lost
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        if self.context_lost {
            return DisplayState::ContextLost;
        }
        match self.controller.state() {
            LoadState::Idle => DisplayState::Spinner { progress: 0 },
            LoadState::Loading { progress } => DisplayState::Spinner {
                progress: *progress,
            },
            LoadState::Loaded { scene } => DisplayState::Scene(scene),
            LoadState::Failed { reason, .. } => DisplayState::ErrorBanner(reason),
            LoadState::Degraded => DisplayState::Placeholder,
        }
    }

    /// Describe the current frame for the render backend.
    pub fn frame(&self) -> FrameDesc<'_> {
        let content = match self.display_state() {
            DisplayState::Spinner { progress } => FrameContent::Spinner {
                title: &self.request.display_title,
                progress,
            },
            DisplayState::Scene(scene) => FrameContent::Scene(scene),
            DisplayState::ErrorBanner(reason) => FrameContent::ErrorBanner(reason),
            DisplayState::Placeholder => {
                let (shape, color) = placeholder_for(&self.request.asset_id);
                FrameContent::Placeholder {
                    shape,
                    color,
                    spin: self.placeholder_spin,
                }
            }
            DisplayState::ContextLost => FrameContent::ContextLost,
        };

        FrameDesc {
            background: background_or_default(&self.settings.background).fill,
            camera_eye: self.rig.position,
            camera_target: self.rig.target,
            lights: light_rig(&self.settings),
            content,
            wireframe: self.settings.wireframe,
            show_grid: self.settings.show_grid,
            light_marker: light_marker(&self.settings),
        }
    }

    /// Describe and present one frame, folding a lost context back into the
    /// display state.
    pub fn present(&mut self, renderer: &mut dyn SceneRenderer) {
        let result = renderer.present(&self.frame());
        if result.is_err() {
            self.notify_context_lost();
        }
    }
}
