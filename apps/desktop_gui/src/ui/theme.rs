//! Colours for the city map and panels.

use egui::Color32;
use shared::domain::Layer;

#[derive(Debug, Clone, Copy)]
pub struct MapPalette {
    pub sky_top: Color32,
    pub sky_bottom: Color32,
    pub ground: Color32,
    pub underground_top: Color32,
    pub underground_bottom: Color32,
    pub street: Color32,
    pub building: [Color32; 3],
    pub window: Color32,
    pub celestial: Color32,
}

pub const DAY: MapPalette = MapPalette {
    sky_top: Color32::from_rgb(0x87, 0xce, 0xeb),
    sky_bottom: Color32::from_rgb(0xe6, 0xf7, 0xff),
    ground: Color32::from_rgb(0xe6, 0xf7, 0xff),
    underground_top: Color32::from_rgb(0x8b, 0x45, 0x13),
    underground_bottom: Color32::from_rgb(0x65, 0x43, 0x21),
    street: Color32::from_rgb(0x55, 0x55, 0x55),
    building: [
        Color32::from_rgb(0x4a, 0x4a, 0x4a),
        Color32::from_rgb(0x6a, 0x6a, 0x6a),
        Color32::from_rgb(0x5a, 0x5a, 0x5a),
    ],
    window: Color32::from_rgb(0xbf, 0xdb, 0xfe),
    celestial: Color32::from_rgb(0xfa, 0xcc, 0x15),
};

pub const NIGHT: MapPalette = MapPalette {
    sky_top: Color32::from_rgb(0x0a, 0x19, 0x29),
    sky_bottom: Color32::from_rgb(0x16, 0x2a, 0x3a),
    ground: Color32::from_rgb(0x0a, 0x19, 0x29),
    underground_top: Color32::from_rgb(0x3a, 0x20, 0x08),
    underground_bottom: Color32::from_rgb(0x25, 0x18, 0x08),
    street: Color32::from_rgb(0x33, 0x33, 0x33),
    building: [
        Color32::from_rgb(0x2a, 0x2a, 0x2a),
        Color32::from_rgb(0x3a, 0x3a, 0x3a),
        Color32::from_rgb(0x2a, 0x2a, 0x2a),
    ],
    window: Color32::from_rgb(0xfd, 0xe0, 0x47),
    celestial: Color32::from_rgb(0xe5, 0xe7, 0xeb),
};

pub fn palette(is_day: bool) -> &'static MapPalette {
    if is_day {
        &DAY
    } else {
        &NIGHT
    }
}

pub fn layer_accent(layer: Layer) -> Color32 {
    match layer {
        Layer::Perception => Color32::from_rgb(0x22, 0xc5, 0x5e),
        Layer::Network => Color32::from_rgb(0x3b, 0x82, 0xf6),
        Layer::Middleware => Color32::from_rgb(0xa8, 0x55, 0xf7),
        Layer::Application => Color32::from_rgb(0x14, 0xb8, 0xa6),
    }
}

pub const SCORE_BAR_START: Color32 = Color32::from_rgb(0x93, 0x33, 0xea);
pub const TOAST_FILL: Color32 = Color32::from_rgb(0xea, 0xb3, 0x08);
pub const LABEL_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 178);
pub const LOCKED_SHADE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 110);
pub const HINT_FILL: Color32 = Color32::from_rgb(0x1e, 0x3a, 0x8a);
