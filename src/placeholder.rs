//! Procedural stand-in shapes for models that could not be loaded.
//!
//! The mapping is a total function: every asset id resolves to a shape and a
//! color, with a neutral gray unit cube for anything not in the table. This
//! must never fail, since it is the last line of defense when the real asset
//! is unavailable.

use crate::presets::Rgb;

/// A primitive solid with fixed dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDescriptor {
    Sphere { radius: f32, segments: u32 },
    Cone { radius: f32, height: f32, segments: u32 },
    Box { x: f32, y: f32, z: f32 },
}

pub const DEFAULT_SHAPE: ShapeDescriptor = ShapeDescriptor::Box {
    x: 1.0,
    y: 1.0,
    z: 1.0,
};
pub const DEFAULT_COLOR: Rgb = Rgb(0x64, 0x74, 0x8b);

pub fn placeholder_for(asset_id: &str) -> (ShapeDescriptor, Rgb) {
    let shape = match asset_id {
        "earth-layers" => ShapeDescriptor::Sphere {
            radius: 1.5,
            segments: 32,
        },
        "prokaryotes-eukaryotes" | "blood-components" => ShapeDescriptor::Sphere {
            radius: 1.0,
            segments: 16,
        },
        "root-structure" => ShapeDescriptor::Cone {
            radius: 0.8,
            height: 2.0,
            segments: 8,
        },
        "harappa-stamp" | "priest-king" => ShapeDescriptor::Box {
            x: 1.5,
            y: 2.0,
            z: 0.3,
        },
        "varaha" => ShapeDescriptor::Box {
            x: 1.2,
            y: 1.8,
            z: 1.0,
        },
        _ => DEFAULT_SHAPE,
    };

    let color = match asset_id {
        "earth-layers" => Rgb(0x4f, 0x46, 0xe5),
        "prokaryotes-eukaryotes" => Rgb(0x05, 0x96, 0x69),
        "root-structure" => Rgb(0x16, 0xa3, 0x4a),
        "blood-components" => Rgb(0xdc, 0x26, 0x26),
        "harappa-stamp" => Rgb(0xd9, 0x77, 0x06),
        "priest-king" => Rgb(0xb4, 0x53, 0x09),
        "varaha" => Rgb(0x93, 0x33, 0xea),
        _ => DEFAULT_COLOR,
    };

    (shape, color)
}
