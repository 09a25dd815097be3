//! Static option tables for the viewer: backgrounds, light color presets and
//! named camera viewpoints. These are read-only configuration; the active
//! selection lives in `ViewerSettings` as an id token.

use glam::Vec3;

/// 8-bit sRGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn as_f32(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

/// How a background is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// 135-degree linear gradient from the first color to the second.
    Gradient(Rgb, Rgb),
    Solid(Rgb),
}

#[derive(Debug, Clone, Copy)]
pub struct Background {
    pub id: &'static str,
    pub name: &'static str,
    pub fill: Fill,
}

pub const BACKGROUNDS: [Background; 10] = [
    Background {
        id: "dark-gradient",
        name: "Dark Gradient",
        fill: Fill::Gradient(Rgb(0x1f, 0x29, 0x37), Rgb(0x11, 0x18, 0x27)),
    },
    Background {
        id: "blue-gradient",
        name: "Blue Gradient",
        fill: Fill::Gradient(Rgb(0x1e, 0x3a, 0x8a), Rgb(0x1e, 0x40, 0xaf)),
    },
    Background {
        id: "purple-gradient",
        name: "Purple Gradient",
        fill: Fill::Gradient(Rgb(0x58, 0x1c, 0x87), Rgb(0x7c, 0x3a, 0xed)),
    },
    Background {
        id: "green-gradient",
        name: "Green Gradient",
        fill: Fill::Gradient(Rgb(0x16, 0x65, 0x34), Rgb(0x16, 0xa3, 0x4a)),
    },
    Background {
        id: "red-gradient",
        name: "Red Gradient",
        fill: Fill::Gradient(Rgb(0x99, 0x1b, 0x1b), Rgb(0xdc, 0x26, 0x26)),
    },
    Background {
        id: "orange-gradient",
        name: "Orange Gradient",
        fill: Fill::Gradient(Rgb(0xc2, 0x41, 0x0c), Rgb(0xea, 0x58, 0x0c)),
    },
    Background {
        id: "pink-gradient",
        name: "Pink Gradient",
        fill: Fill::Gradient(Rgb(0xbe, 0x18, 0x5d), Rgb(0xec, 0x48, 0x99)),
    },
    Background {
        id: "black",
        name: "Pure Black",
        fill: Fill::Solid(Rgb(0x00, 0x00, 0x00)),
    },
    Background {
        id: "white",
        name: "Pure White",
        fill: Fill::Solid(Rgb(0xff, 0xff, 0xff)),
    },
    Background {
        id: "gray",
        name: "Gray",
        fill: Fill::Solid(Rgb(0x6b, 0x72, 0x80)),
    },
];

pub fn background(id: &str) -> Option<&'static Background> {
    BACKGROUNDS.iter().find(|entry| entry.id == id)
}

/// Unknown ids fall back to the first table entry.
pub fn background_or_default(id: &str) -> &'static Background {
    background(id).unwrap_or(&BACKGROUNDS[0])
}

#[derive(Debug, Clone, Copy)]
pub struct LightPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub color: Rgb,
}

pub const LIGHT_PRESETS: [LightPreset; 6] = [
    LightPreset {
        id: "white",
        name: "White",
        color: Rgb(0xff, 0xff, 0xff),
    },
    LightPreset {
        id: "warm",
        name: "Warm",
        color: Rgb(0xff, 0xd7, 0x00),
    },
    LightPreset {
        id: "cool",
        name: "Cool",
        color: Rgb(0x87, 0xce, 0xeb),
    },
    LightPreset {
        id: "red",
        name: "Red",
        color: Rgb(0xff, 0x44, 0x44),
    },
    LightPreset {
        id: "blue",
        name: "Blue",
        color: Rgb(0x44, 0x44, 0xff),
    },
    LightPreset {
        id: "green",
        name: "Green",
        color: Rgb(0x44, 0xff, 0x44),
    },
];

/// Preset color lookup; unknown ids fall back to plain white.
pub fn light_preset_color(id: &str) -> Rgb {
    LIGHT_PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .map(|preset| preset.color)
        .unwrap_or(Rgb(0xff, 0xff, 0xff))
}

#[derive(Debug, Clone, Copy)]
pub struct Viewpoint {
    pub id: &'static str,
    pub name: &'static str,
    pub position: [f32; 3],
}

impl Viewpoint {
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

pub const VIEWPOINTS: [Viewpoint; 6] = [
    Viewpoint {
        id: "front",
        name: "Front",
        position: [0.0, 0.0, 5.0],
    },
    Viewpoint {
        id: "back",
        name: "Back",
        position: [0.0, 0.0, -5.0],
    },
    Viewpoint {
        id: "left",
        name: "Left",
        position: [-5.0, 0.0, 0.0],
    },
    Viewpoint {
        id: "right",
        name: "Right",
        position: [5.0, 0.0, 0.0],
    },
    Viewpoint {
        id: "top",
        name: "Top",
        position: [0.0, 5.0, 0.0],
    },
    Viewpoint {
        id: "bottom",
        name: "Bottom",
        position: [0.0, -5.0, 0.0],
    },
];

pub fn viewpoint(id: &str) -> Option<&'static Viewpoint> {
    VIEWPOINTS.iter().find(|entry| entry.id == id)
}
