//! Clickable city map: one region per layer plus the ambient day/night cycle
//! and street traffic.

use std::{f32::consts::PI, time::Duration};

use egui::{pos2, vec2, Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke};
use rand::Rng;
use shared::domain::Layer;
use sim_core::SimulationSnapshot;

use crate::{
    controller::events::UiEvent,
    ui::theme::{self, MapPalette},
};

const MAP_ASPECT: f32 = 3.0 / 4.0;
const CAR_SPEED: f32 = 0.06;
const STARS: [(f32, f32); 7] = [
    (0.15, 0.05),
    (0.25, 0.08),
    (0.45, 0.03),
    (0.65, 0.07),
    (0.85, 0.10),
    (0.35, 0.12),
    (0.75, 0.02),
];
const SENSORS: [(f32, f32); 5] = [(0.2, 0.2), (0.4, 0.4), (0.6, 0.3), (0.8, 0.6), (0.3, 0.7)];

/// Region of the map owned by `layer`, as fractions of the map: `(x, y, w, h)`.
pub fn region_fraction(layer: Layer) -> (f32, f32, f32, f32) {
    match layer {
        Layer::Application => (0.40, 0.15, 0.20, 0.25),
        Layer::Middleware => (0.15, 0.30, 0.70, 0.30),
        Layer::Network => (0.10, 0.60, 0.80, 0.20),
        Layer::Perception => (0.0, 0.80, 1.0, 0.20),
    }
}

fn sub_rect(outer: Rect, (x, y, w, h): (f32, f32, f32, f32)) -> Rect {
    Rect::from_min_size(
        outer.min + vec2(x * outer.width(), y * outer.height()),
        vec2(w * outer.width(), h * outer.height()),
    )
}

pub fn region_rect(map: Rect, layer: Layer) -> Rect {
    sub_rect(map, region_fraction(layer))
}

/// Layer whose region is under `pos`. Lower regions are drawn over higher ones.
pub fn layer_at(map: Rect, pos: Pos2) -> Option<Layer> {
    Layer::ALL
        .into_iter()
        .find(|layer| region_rect(map, *layer).contains(pos))
}

#[derive(Debug, Clone, Copy)]
pub struct DayNightCycle {
    period: Duration,
    flipped: bool,
}

impl DayNightCycle {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            flipped: false,
        }
    }

    pub fn is_day(&self, elapsed: Duration) -> bool {
        let halves = (elapsed.as_secs_f64() / self.period.as_secs_f64()) as u64;
        (halves % 2 == 0) != self.flipped
    }

    pub fn toggle(&mut self) {
        self.flipped = !self.flipped;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Car {
    start_x: f32,
    lane: f32,
    heading: Heading,
}

impl Car {
    pub fn new(start_x: f32, lane: f32, heading: Heading) -> Self {
        Self {
            start_x,
            lane,
            heading,
        }
    }

    /// Horizontal position as a fraction of the street band, wrapping at the edges.
    pub fn x_at(&self, elapsed_secs: f32) -> f32 {
        let travelled = CAR_SPEED * elapsed_secs;
        let raw = match self.heading {
            Heading::Right => self.start_x + travelled,
            Heading::Left => self.start_x - travelled,
        };
        raw.rem_euclid(1.0)
    }
}

pub fn random_cars(count: usize, rng: &mut impl Rng) -> Vec<Car> {
    (0..count)
        .map(|_| {
            let heading = if rng.gen_bool(0.5) {
                Heading::Right
            } else {
                Heading::Left
            };
            Car::new(rng.gen_range(0.0..0.8), rng.gen_range(0.60..0.75), heading)
        })
        .collect()
}

pub struct CityMap {
    cycle: DayNightCycle,
    cars: Vec<Car>,
    hovered: Option<Layer>,
}

impl CityMap {
    pub fn new(day_night_period: Duration, cars: Vec<Car>) -> Self {
        Self {
            cycle: DayNightCycle::new(day_night_period),
            cars,
            hovered: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        snapshot: &SimulationSnapshot,
        elapsed: Duration,
    ) -> Vec<UiEvent> {
        let mut events = Vec::new();
        let available = ui.available_size();
        let height = (available.x * MAP_ASPECT).min(available.y);
        let size = vec2(height / MAP_ASPECT, height);
        let (map, response) = ui.allocate_exact_size(size, Sense::click());

        let is_day = self.cycle.is_day(elapsed);
        let palette = theme::palette(is_day);
        let t = elapsed.as_secs_f32();
        let painter = ui.painter_at(map);

        vertical_gradient(&painter, map, palette.ground, palette.ground);
        paint_sky(&painter, map, palette, is_day, t);
        paint_application(&painter, region_rect(map, Layer::Application), palette, is_day);
        paint_middleware(&painter, region_rect(map, Layer::Middleware), palette, is_day);
        paint_network(&painter, region_rect(map, Layer::Network), palette, &self.cars, t);
        paint_perception(&painter, region_rect(map, Layer::Perception), palette, t);

        let hovered = response.hover_pos().and_then(|pos| layer_at(map, pos));
        if hovered != self.hovered {
            self.hovered = hovered;
            events.push(UiEvent::LayerHovered(hovered));
        }

        for layer in Layer::ALL {
            let region = region_rect(map, layer);
            if !snapshot.is_unlocked(layer) {
                painter.rect_filled(region, CornerRadius::ZERO, theme::LOCKED_SHADE);
                painter.text(
                    region.center(),
                    Align2::CENTER_CENTER,
                    "🔒",
                    FontId::proportional(18.0),
                    Color32::WHITE,
                );
            }
            if snapshot.active_layer == Some(layer) {
                painter.rect_filled(
                    region,
                    CornerRadius::same(2),
                    Color32::from_white_alpha(28),
                );
                painter.rect_stroke(
                    region,
                    CornerRadius::same(2),
                    Stroke::new(2.0, Color32::from_white_alpha(200)),
                    egui::StrokeKind::Middle,
                );
            }
            if hovered == Some(layer) || snapshot.active_layer == Some(layer) {
                paint_label(&painter, region, &format!("{} Layer", layer.title()));
            }
        }

        if response.clicked() {
            if let Some(layer) = response.interact_pointer_pos().and_then(|pos| layer_at(map, pos)) {
                events.push(UiEvent::LayerClicked(layer));
            }
        }
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let toggle_rect = Rect::from_min_size(map.right_top() + vec2(-44.0, 12.0), vec2(32.0, 32.0));
        let toggle_icon = if is_day { "🌙" } else { "☀" };
        let toggle = egui::Button::new(toggle_icon)
            .fill(Color32::from_black_alpha(80))
            .corner_radius(CornerRadius::same(16));
        if ui.put(toggle_rect, toggle).clicked() {
            self.cycle.toggle();
            events.push(UiEvent::DayNightToggled);
        }

        events
    }
}

fn vertical_gradient(painter: &Painter, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    painter.add(egui::Shape::mesh(mesh));
}

fn paint_sky(painter: &Painter, map: Rect, palette: &MapPalette, is_day: bool, t: f32) {
    let sky = sub_rect(map, (0.0, 0.0, 1.0, 0.25));
    vertical_gradient(painter, sky, palette.sky_top, palette.sky_bottom);

    if is_day {
        let sun = sky.lerp_inside(vec2(0.85, 0.35));
        painter.circle_filled(sun, 18.0, palette.celestial);
    } else {
        let moon = sky.lerp_inside(vec2(0.2, 0.35));
        painter.circle_filled(moon, 15.0, palette.celestial);
        painter.circle_filled(moon + vec2(6.0, -4.0), 13.0, palette.sky_top);
        for (index, (x, y)) in STARS.iter().enumerate() {
            let twinkle = 0.6 + 0.4 * (t * 2.0 + index as f32).sin().abs();
            painter.circle_filled(
                map.lerp_inside(vec2(*x, *y)),
                1.5,
                Color32::WHITE.gamma_multiply(twinkle),
            );
        }
    }
}

fn paint_building(painter: &Painter, rect: Rect, fill: Color32, palette: &MapPalette, lit: bool) {
    painter.rect_filled(rect, CornerRadius::same(1), fill);
    if !lit {
        return;
    }
    let cols = 3;
    let rows = ((rect.height() / 14.0) as usize).max(1);
    let cell = vec2(rect.width() / cols as f32, rect.height() / rows as f32);
    for row in 0..rows {
        for col in 0..cols {
            // Leave every third window dark.
            if (row + col) % 3 == 2 {
                continue;
            }
            let min = rect.min + vec2(col as f32 * cell.x, row as f32 * cell.y) + vec2(2.0, 2.0);
            let window = Rect::from_min_size(min, cell - vec2(4.0, 4.0));
            painter.rect_filled(window, CornerRadius::ZERO, palette.window.gamma_multiply(0.8));
        }
    }
}

fn paint_application(painter: &Painter, region: Rect, palette: &MapPalette, is_day: bool) {
    let towers = [(0.30, 0.55), (0.20, 0.85), (0.25, 0.70)];
    let gap = region.width() * 0.04;
    let total: f32 = towers.iter().map(|(w, _)| w * region.width()).sum::<f32>()
        + gap * (towers.len() - 1) as f32;
    let mut x = region.center().x - total / 2.0;
    for (index, (w, h)) in towers.iter().enumerate() {
        let width = w * region.width();
        let height = h * region.height();
        let rect = Rect::from_min_max(pos2(x, region.bottom() - height), pos2(x + width, region.bottom()));
        paint_building(
            painter,
            rect,
            palette.building[index % palette.building.len()],
            palette,
            !is_day,
        );
        x += width + gap;
    }
}

fn paint_middleware(painter: &Painter, region: Rect, palette: &MapPalette, is_day: bool) {
    let heights = [0.55, 0.75, 0.45, 0.65, 0.8, 0.5];
    let slot = region.width() / heights.len() as f32;
    for (index, h) in heights.iter().enumerate() {
        let left = region.left() + index as f32 * slot + slot * 0.15;
        let rect = Rect::from_min_max(
            pos2(left, region.bottom() - h * region.height()),
            pos2(left + slot * 0.7, region.bottom()),
        );
        paint_building(
            painter,
            rect,
            palette.building[index % palette.building.len()],
            palette,
            !is_day,
        );
        // Rooftop antenna lights.
        painter.circle_filled(rect.left_top() + vec2(2.0, 2.0), 1.5, Color32::from_rgb(0xfd, 0xe0, 0x47));
        painter.circle_filled(rect.right_top() + vec2(-2.0, 2.0), 1.5, Color32::from_rgb(0xfc, 0xa5, 0xa5));
    }
}

fn paint_network(painter: &Painter, region: Rect, palette: &MapPalette, cars: &[Car], t: f32) {
    let lane = region.height() * 0.2;
    let roads = [
        Rect::from_min_size(region.min, vec2(region.width(), lane)),
        Rect::from_min_size(region.min + vec2(0.0, region.height() * 0.5), vec2(region.width(), lane)),
        Rect::from_min_size(region.min + vec2(region.width() * 0.2, 0.0), vec2(lane, region.height())),
        Rect::from_min_size(region.min + vec2(region.width() * 0.6, 0.0), vec2(lane, region.height())),
    ];
    for road in roads {
        painter.rect_filled(road, CornerRadius::ZERO, palette.street);
    }

    for (index, car) in cars.iter().enumerate() {
        let center = region.lerp_inside(vec2(car.x_at(t), car.lane));
        let body = Rect::from_center_size(center, vec2(14.0, 7.0));
        let colour = match index % 3 {
            0 => Color32::from_rgb(0xef, 0x44, 0x44),
            1 => Color32::from_rgb(0x3b, 0x82, 0xf6),
            _ => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        };
        painter.rect_filled(body, CornerRadius::same(2), colour);
        let lamp_x = match car.heading {
            Heading::Right => body.right(),
            Heading::Left => body.left(),
        };
        painter.circle_filled(pos2(lamp_x, center.y), 1.5, Color32::from_rgb(0xfd, 0xe0, 0x47));
    }
}

fn paint_perception(painter: &Painter, region: Rect, palette: &MapPalette, t: f32) {
    vertical_gradient(painter, region, palette.underground_top, palette.underground_bottom);
    for (index, (x, y)) in SENSORS.iter().enumerate() {
        let pulse = 0.5 + 0.5 * (t * PI + index as f32 * 0.5).sin();
        let center = region.lerp_inside(vec2(*x, *y));
        painter.circle_filled(
            center,
            5.0 * (1.0 + 0.5 * pulse),
            Color32::from_rgb(0xfa, 0xcc, 0x15).gamma_multiply(0.7 + 0.3 * pulse),
        );
    }
}

fn paint_label(painter: &Painter, region: Rect, text: &str) {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(12.0), Color32::WHITE);
    let anchor = pos2(region.center().x, region.top() - 4.0);
    let text_rect = Align2::CENTER_BOTTOM.anchor_size(anchor, galley.size());
    let backdrop = text_rect.expand2(vec2(6.0, 3.0));
    painter.rect_filled(backdrop, CornerRadius::same(4), theme::LABEL_FILL);
    painter.galley(text_rect.min, galley, Color32::WHITE);
}
