//! Orbit camera for the viewer: position + look-at target, named viewpoint
//! jumps and per-asset zoom bounds.

use glam::Vec3;

use crate::presets;

pub const ZOOM_SPEED: f32 = 2.0;
pub const PAN_SPEED: f32 = 1.0;
pub const ROTATE_SPEED: f32 = 1.0;

/// Small scanned artifacts need a much closer default framing and a much
/// smaller minimum orbit distance for close-up inspection. This is an
/// explicit identity-based allowlist keyed by asset id, not something
/// inferred from the asset geometry.
const SMALL_ARTIFACT_IDS: [&str; 2] = ["priest-king", "harappa-stamp"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomProfile {
    pub default_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl ZoomProfile {
    pub fn for_asset(asset_id: &str) -> Self {
        if SMALL_ARTIFACT_IDS.contains(&asset_id) {
            Self {
                default_distance: 3.0,
                min_distance: 0.005,
                max_distance: 200.0,
            }
        } else {
            Self {
                default_distance: 5.0,
                min_distance: 0.05,
                max_distance: 200.0,
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    profile: ZoomProfile,
}

impl CameraRig {
    pub fn new(profile: ZoomProfile) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, profile.default_distance),
            target: Vec3::ZERO,
            profile,
        }
    }

    pub fn for_asset(asset_id: &str) -> Self {
        Self::new(ZoomProfile::for_asset(asset_id))
    }

    pub fn profile(&self) -> &ZoomProfile {
        &self.profile
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Jump to a named viewpoint. Unknown ids are a strict no-op; returns
    /// whether the id was found so the caller knows to record the selection.
    pub fn go_to_viewpoint(&mut self, id: &str) -> bool {
        match presets::viewpoint(id) {
            Some(viewpoint) => {
                self.position = viewpoint.position_vec();
                self.target = Vec3::ZERO;
                true
            }
            None => false,
        }
    }

    /// Back to the per-asset default framing along the forward axis.
    pub fn reset_zoom(&mut self) {
        self.position = Vec3::new(0.0, 0.0, self.profile.default_distance);
        self.target = Vec3::ZERO;
    }

    /// Rotate the eye around the target, preserving distance. Pitch stops
    /// short of the poles to keep the up vector stable.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let offset = self.position - self.target;
        let distance = offset.length().max(self.profile.min_distance);

        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        yaw += yaw_delta * ROTATE_SPEED;
        pitch = (pitch + pitch_delta * ROTATE_SPEED).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );

        let cos_pitch = pitch.cos();
        self.position = self.target
            + Vec3::new(
                yaw.sin() * cos_pitch * distance,
                pitch.sin() * distance,
                yaw.cos() * cos_pitch * distance,
            );
    }

    /// Dolly along the view direction. Positive amounts move closer; the
    /// resulting distance is clamped to the profile bounds.
    pub fn zoom(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let distance = offset.length().max(1e-6);
        let new_distance = (distance - amount * ZOOM_SPEED)
            .clamp(self.profile.min_distance, self.profile.max_distance);
        self.position = self.target + offset / distance * new_distance;
    }

    /// Slide eye and target together in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let shift = (right * dx + up * dy) * PAN_SPEED * self.distance();
        self.position += shift;
        self.target += shift;
    }
}
