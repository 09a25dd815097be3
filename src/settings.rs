//! Mutable display configuration for one viewer instance.
//!
//! All mutation flows through [`ViewerSettings::apply`], which replaces
//! exactly one field per update and leaves the rest untouched. Values are not
//! range-clamped here; controls that feed this struct cap their own ranges
//! (intensity slider 0.0..=3.0, rotation slider 0..=360 in 15-degree steps).

/// Display configuration, created with fixed defaults when a viewer mounts.
/// Not persisted across mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    pub background_light: bool,
    pub environment_light: f32,
    /// Id token into [`crate::presets::BACKGROUNDS`].
    pub background: String,
    pub wireframe: bool,
    pub light_rotation_deg: u16,
    /// Id token into [`crate::presets::LIGHT_PRESETS`].
    pub light_preset: String,
    /// Id token into [`crate::presets::VIEWPOINTS`].
    pub viewpoint: String,
    pub show_light_source: bool,
    pub light_position: [f32; 3],
    pub show_grid: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            background_light: true,
            environment_light: 0.6,
            background: "dark-gradient".to_string(),
            wireframe: false,
            light_rotation_deg: 0,
            light_preset: "white".to_string(),
            viewpoint: "front".to_string(),
            show_light_source: false,
            light_position: [0.0, 10.0, 0.0],
            show_grid: false,
        }
    }
}

/// One targeted field replacement, tagged by field.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingUpdate {
    BackgroundLight(bool),
    EnvironmentLight(f32),
    Background(String),
    Wireframe(bool),
    LightRotation(u16),
    LightPreset(String),
    Viewpoint(String),
    ShowLightSource(bool),
    LightPosition([f32; 3]),
    ShowGrid(bool),
}

impl ViewerSettings {
    /// Replace the single field named by `update`.
    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::BackgroundLight(value) => self.background_light = value,
            SettingUpdate::EnvironmentLight(value) => self.environment_light = value,
            SettingUpdate::Background(value) => self.background = value,
            SettingUpdate::Wireframe(value) => self.wireframe = value,
            SettingUpdate::LightRotation(value) => self.light_rotation_deg = value,
            SettingUpdate::LightPreset(value) => self.light_preset = value,
            SettingUpdate::Viewpoint(value) => self.viewpoint = value,
            SettingUpdate::ShowLightSource(value) => self.show_light_source = value,
            SettingUpdate::LightPosition(value) => self.light_position = value,
            SettingUpdate::ShowGrid(value) => self.show_grid = value,
        }
    }
}
