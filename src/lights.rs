//! Light rig derived from the viewer settings.
//!
//! Four lights orbit the model as a unit: ambient fill, a shadow-casting key
//! light, and two accents offset 60 degrees to either side of the key. All
//! share the active preset color and scale off the one intensity setting.

use glam::Vec3;

use crate::presets::{light_preset_color, Rgb};
use crate::settings::ViewerSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub color: Rgb,
    pub ambient_intensity: f32,
    /// Key light; the only shadow caster.
    pub directional: Light,
    pub point: Light,
    pub spot: Light,
    pub spot_angle: f32,
    pub spot_penumbra: f32,
}

/// `None` when background lighting is switched off.
pub fn light_rig(settings: &ViewerSettings) -> Option<LightRig> {
    if !settings.background_light {
        return None;
    }

    let color = light_preset_color(&settings.light_preset);
    let intensity = settings.environment_light;
    let rotation = f32::from(settings.light_rotation_deg).to_radians();

    let directional = Light {
        position: ring_position(rotation, 10.0, 10.0),
        intensity: intensity * 0.8,
    };
    let point = Light {
        position: ring_position(rotation + std::f32::consts::FRAC_PI_3, 5.0, 5.0),
        intensity: intensity * 0.5,
    };
    let spot = Light {
        position: ring_position(rotation - std::f32::consts::FRAC_PI_3, 8.0, 8.0),
        intensity: intensity * 0.6,
    };

    Some(LightRig {
        color,
        ambient_intensity: intensity * 0.3,
        directional,
        point,
        spot,
        spot_angle: 0.3,
        spot_penumbra: 0.5,
    })
}

/// Marker position for the light-source indicator, when enabled.
pub fn light_marker(settings: &ViewerSettings) -> Option<Vec3> {
    settings
        .show_light_source
        .then(|| Vec3::from_array(settings.light_position))
}

fn ring_position(angle: f32, radius: f32, height: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}
