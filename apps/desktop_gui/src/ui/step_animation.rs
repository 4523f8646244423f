//! Cosmetic data-flow animation for the active (layer, step).

use std::f32::consts::TAU;

use egui::{pos2, vec2, Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke};
use shared::domain::{Layer, Step};

use crate::ui::theme;

const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const BLUE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const YELLOW: Color32 = Color32::from_rgb(0xea, 0xb3, 0x08);
const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const PURPLE: Color32 = Color32::from_rgb(0xa8, 0x55, 0xf7);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Sensor {
        label: &'static str,
        at: (f32, f32),
        colour: Color32,
    },
    RisingParticles,
    Packet {
        label: &'static str,
        at: (f32, f32),
        colour: Color32,
    },
    FlowLine,
    TravellingPackets,
    Node {
        at: (f32, f32),
    },
    Server,
    ProcessingRing,
    Database {
        at: (f32, f32),
    },
    Dashboard,
    MetricBars,
    Controls([&'static str; 3]),
}

/// Everything drawn for `layer` at `step`. Later steps keep earlier glyphs.
pub fn scene(layer: Layer, step: Step) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    let reached = |index: u8| step.index() >= index;

    match layer {
        Layer::Perception => {
            glyphs.extend([
                Glyph::Sensor {
                    label: "25°C",
                    at: (0.3, 0.4),
                    colour: RED,
                },
                Glyph::Sensor {
                    label: "50%",
                    at: (0.5, 0.4),
                    colour: BLUE,
                },
                Glyph::Sensor {
                    label: "800 lux",
                    at: (0.7, 0.4),
                    colour: YELLOW,
                },
            ]);
            if reached(1) {
                glyphs.push(Glyph::RisingParticles);
                glyphs.push(Glyph::Packet {
                    label: "DATA",
                    at: (0.5, 0.85),
                    colour: GREEN,
                });
            }
        }
        Layer::Network => {
            glyphs.push(Glyph::FlowLine);
            if reached(1) {
                glyphs.push(Glyph::TravellingPackets);
                glyphs.push(Glyph::Node { at: (0.25, 0.3) });
                glyphs.push(Glyph::Node { at: (0.75, 0.4) });
            }
        }
        Layer::Middleware => {
            glyphs.push(Glyph::Server);
            if reached(1) {
                glyphs.push(Glyph::ProcessingRing);
                glyphs.push(Glyph::Database { at: (0.3, 0.3) });
                glyphs.extend([
                    Glyph::Packet {
                        label: "T",
                        at: (0.38, 0.7),
                        colour: GREEN,
                    },
                    Glyph::Packet {
                        label: "H",
                        at: (0.62, 0.7),
                        colour: BLUE,
                    },
                    Glyph::Packet {
                        label: "L",
                        at: (0.5, 0.2),
                        colour: YELLOW,
                    },
                ]);
            }
        }
        Layer::Application => {
            glyphs.push(Glyph::Dashboard);
            glyphs.push(Glyph::MetricBars);
            if reached(2) {
                glyphs.push(Glyph::Controls(["Traffic", "Energy", "Air Quality"]));
            }
        }
    }

    glyphs
}

pub fn show(ui: &mut egui::Ui, layer: Layer, step: Step, time: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 200.0), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_black_alpha(14));
    painter.rect_stroke(
        rect,
        CornerRadius::same(8),
        Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        egui::StrokeKind::Inside,
    );

    for glyph in scene(layer, step) {
        paint_glyph(&painter, rect, glyph, layer, time);
    }
}

fn at(rect: Rect, (x, y): (f32, f32)) -> Pos2 {
    rect.lerp_inside(vec2(x, y))
}

/// Point on the network flow curve, `s` in `0..=1`.
fn flow_curve(rect: Rect, s: f32) -> Pos2 {
    let p0 = at(rect, (0.125, 0.5));
    let p1 = at(rect, (0.25, 0.25));
    let p2 = at(rect, (0.75, 0.75));
    let p3 = at(rect, (0.875, 0.5));
    let u = 1.0 - s;
    let weights = [u * u * u, 3.0 * u * u * s, 3.0 * u * s * s, s * s * s];
    pos2(
        weights[0] * p0.x + weights[1] * p1.x + weights[2] * p2.x + weights[3] * p3.x,
        weights[0] * p0.y + weights[1] * p1.y + weights[2] * p2.y + weights[3] * p3.y,
    )
}

fn paint_glyph(painter: &Painter, rect: Rect, glyph: Glyph, layer: Layer, time: f32) {
    let accent = theme::layer_accent(layer);
    match glyph {
        Glyph::Sensor { label, at: spot, colour } => {
            let center = at(rect, spot);
            painter.circle_filled(center, 14.0, colour);
            painter.text(
                center + vec2(0.0, 26.0),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(12.0),
                painter_text_colour(painter),
            );
        }
        Glyph::RisingParticles => {
            for i in 0..5 {
                let phase = ((time - i as f32 * 0.2) / 3.0).rem_euclid(1.0);
                let x = rect.left() + rect.width() * (0.2 + i as f32 * 0.15);
                let y = rect.bottom() - phase * 100.0;
                let alpha = (1.0 - (phase * 2.0 - 1.0).abs()).clamp(0.0, 1.0);
                painter.circle_filled(pos2(x, y), 4.0, GREEN.gamma_multiply(alpha));
            }
        }
        Glyph::Packet { label, at: spot, colour } => {
            let bob = (time * TAU / 2.0).sin() * 4.0;
            let center = at(rect, spot) + vec2(0.0, bob);
            painter.circle_filled(center, 14.0, colour);
            painter.text(
                center,
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(10.0),
                Color32::WHITE,
            );
        }
        Glyph::FlowLine => {
            let points: Vec<Pos2> = (0..=32).map(|i| flow_curve(rect, i as f32 / 32.0)).collect();
            for (width, alpha) in [(12.0, 0.1), (8.0, 0.3), (4.0, 1.0)] {
                painter.add(Shape::line(points.clone(), Stroke::new(width, GREEN.gamma_multiply(alpha))));
            }
        }
        Glyph::TravellingPackets => {
            for i in 0..3 {
                let s = ((time + i as f32 * 0.8) / 2.4).rem_euclid(1.0);
                let center = flow_curve(rect, s);
                painter.circle_filled(center, 12.0, GREEN);
                painter.text(center, Align2::CENTER_CENTER, "DATA", FontId::proportional(8.0), Color32::WHITE);
                painter.text(center + vec2(0.0, -22.0), Align2::CENTER_CENTER, "📶", FontId::proportional(12.0), BLUE);
            }
        }
        Glyph::Node { at: spot } => {
            let pulse = 1.0 + 0.25 * (time * TAU / 2.0).sin();
            painter.circle_filled(at(rect, spot), 6.0 * pulse, BLUE);
        }
        Glyph::Server => {
            let body = Rect::from_center_size(rect.center(), vec2(44.0, 56.0));
            painter.rect_filled(body, CornerRadius::same(4), accent);
            for row in 0..3 {
                let y = body.top() + 12.0 + row as f32 * 16.0;
                painter.line_segment(
                    [pos2(body.left() + 6.0, y), pos2(body.right() - 6.0, y)],
                    Stroke::new(2.0, Color32::WHITE.gamma_multiply(0.7)),
                );
            }
        }
        Glyph::ProcessingRing => {
            let center = rect.center();
            let spin = time * TAU / 8.0;
            for dash in 0..16 {
                let start = spin + dash as f32 * TAU / 16.0;
                let end = start + TAU / 32.0;
                painter.line_segment(
                    [center + polar(60.0, start), center + polar(60.0, end)],
                    Stroke::new(2.0, PURPLE),
                );
            }
            painter.circle_stroke(center, 70.0, Stroke::new(1.0, PURPLE.gamma_multiply(0.5)));
            for i in 0..6 {
                let angle = i as f32 * TAU / 6.0 + time;
                painter.circle_filled(center + polar(40.0, angle), 3.0, PURPLE);
            }
        }
        Glyph::Database { at: spot } => {
            let center = at(rect, spot);
            let body = Rect::from_center_size(center, vec2(30.0, 34.0));
            painter.rect_filled(body, CornerRadius::same(6), BLUE);
            painter.line_segment(
                [pos2(body.left(), center.y), pos2(body.right(), center.y)],
                Stroke::new(1.5, Color32::WHITE.gamma_multiply(0.6)),
            );
        }
        Glyph::Dashboard => {
            painter.text(
                at(rect, (0.5, 0.18)),
                Align2::CENTER_CENTER,
                "Smart City Dashboard",
                FontId::proportional(16.0),
                painter_text_colour(painter),
            );
            let chart = Rect::from_center_size(at(rect, (0.3, 0.5)), vec2(44.0, 44.0));
            for (i, h) in [0.4, 0.8, 0.6, 1.0].iter().enumerate() {
                let bar_w = chart.width() / 5.0;
                let left = chart.left() + i as f32 * (bar_w + 2.0);
                painter.rect_filled(
                    Rect::from_min_max(pos2(left, chart.bottom() - h * chart.height()), pos2(left + bar_w, chart.bottom())),
                    CornerRadius::ZERO,
                    accent,
                );
            }
        }
        Glyph::MetricBars => {
            let widths = [(0.35, BLUE), (0.25, RED), (0.3, PURPLE)];
            for (row, (target, colour)) in widths.iter().enumerate() {
                let grown = (time / 1.5).min(1.0);
                let left = at(rect, (0.45, 0.0)).x;
                let y = at(rect, (0.0, 0.38 + row as f32 * 0.12)).y;
                let width = rect.width() * target * grown;
                painter.rect_filled(
                    Rect::from_min_size(pos2(left, y), vec2(width, 12.0)),
                    CornerRadius::same(6),
                    *colour,
                );
            }
        }
        Glyph::Controls(labels) => {
            let spacing = rect.width() / (labels.len() + 1) as f32;
            for (i, label) in labels.iter().enumerate() {
                let center = pos2(rect.left() + spacing * (i + 1) as f32, at(rect, (0.0, 0.85)).y);
                let button = Rect::from_center_size(center, vec2(80.0, 22.0));
                painter.rect_filled(button, CornerRadius::same(4), accent);
                painter.text(center, Align2::CENTER_CENTER, *label, FontId::proportional(11.0), Color32::WHITE);
            }
        }
    }
}

fn polar(radius: f32, angle: f32) -> egui::Vec2 {
    vec2(radius * angle.cos(), radius * angle.sin())
}

fn painter_text_colour(painter: &Painter) -> Color32 {
    painter.ctx().style().visuals.text_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(index: u8) -> Step {
        Step::new(index).expect("step in range")
    }

    #[test]
    fn scenes_only_grow_as_steps_advance() {
        for layer in Layer::ALL {
            let mut previous = scene(layer, Step::FIRST);
            assert!(!previous.is_empty());
            for index in 1..4 {
                let current = scene(layer, step(index));
                assert!(current.starts_with(&previous), "{layer} step {index}");
                previous = current;
            }
        }
    }

    #[test]
    fn perception_opens_with_the_three_sensor_readings() {
        let labels: Vec<&str> = scene(Layer::Perception, Step::FIRST)
            .into_iter()
            .filter_map(|glyph| match glyph {
                Glyph::Sensor { label, .. } => Some(label),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["25°C", "50%", "800 lux"]);
    }

    #[test]
    fn dashboard_controls_appear_from_the_third_step() {
        let has_controls =
            |index| scene(Layer::Application, step(index)).iter().any(|g| matches!(g, Glyph::Controls(_)));
        assert!(!has_controls(1));
        assert!(has_controls(2));
        assert!(has_controls(3));
    }

    #[test]
    fn flow_curve_runs_between_its_endpoints() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 200.0));
        assert_eq!(flow_curve(rect, 0.0), pos2(50.0, 100.0));
        assert_eq!(flow_curve(rect, 1.0), pos2(350.0, 100.0));
    }
}
