//! Side panel: narration for the active step, or instructions when idle.

use egui::{Color32, RichText};
use shared::{
    content::{self, PHASE_CAPTIONS},
    domain::{Layer, Step, STEPS_PER_SEQUENCE},
};
use sim_core::SimulationSnapshot;

use crate::ui::{step_animation, theme};

pub fn heading(snapshot: &SimulationSnapshot) -> String {
    match snapshot.active_layer {
        Some(layer) => format!("{} Layer", layer.title()),
        None => "Smart City Architecture".to_string(),
    }
}

/// Instruction line for `layer`, marked when it is still locked.
pub fn instruction_line(layer: Layer, unlocked: bool) -> String {
    let line = format!(
        "{}: {} Layer ({})",
        layer.district(),
        layer.title(),
        layer.role()
    );
    if unlocked {
        line
    } else {
        format!("{line} (Locked)")
    }
}

pub fn show(ui: &mut egui::Ui, snapshot: &SimulationSnapshot, time: f32, status: Option<&str>) {
    ui.heading(heading(snapshot));
    ui.add_space(8.0);

    if let Some(hint) = status {
        egui::Frame::NONE
            .fill(theme::HINT_FILL)
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.label(RichText::new(hint).color(Color32::WHITE).small());
            });
        ui.add_space(8.0);
    }

    match snapshot.active_layer {
        Some(layer) => show_sequence(ui, layer, snapshot.step, time),
        None => show_instructions(ui, snapshot),
    }
}

fn show_sequence(ui: &mut egui::Ui, layer: Layer, step: Step, time: f32) {
    ui.label(RichText::new(content::describe(layer, step)).weak());
    ui.add_space(6.0);
    ui.add(
        egui::ProgressBar::new(f32::from(step.progress_percent()) / 100.0)
            .fill(theme::layer_accent(layer)),
    );
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.small(format!("Step {} of {}", step.ordinal(), STEPS_PER_SEQUENCE));
    });
    ui.add_space(10.0);

    step_animation::show(ui, layer, step, time);
    ui.add_space(10.0);

    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.label(RichText::new("Layer Progress").strong().small());
            ui.add(
                egui::ProgressBar::new(f32::from(step.progress_percent()) / 100.0)
                    .fill(theme::layer_accent(layer)),
            );
            ui.columns(PHASE_CAPTIONS.len(), |columns| {
                for (column, caption) in columns.iter_mut().zip(PHASE_CAPTIONS) {
                    column.vertical_centered(|ui| ui.small(caption));
                }
            });
        });
}

fn show_instructions(ui: &mut egui::Ui, snapshot: &SimulationSnapshot) {
    ui.label(
        "Click on any layer of the Smart City to see how data flows through the architecture.",
    );
    ui.add_space(8.0);
    for layer in Layer::ALL {
        let unlocked = snapshot.is_unlocked(layer);
        let text = RichText::new(format!("• {}", instruction_line(layer, unlocked)));
        ui.label(if unlocked { text } else { text.weak() });
    }
    ui.add_space(12.0);

    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.label(RichText::new("How to Play").strong());
            ui.label(
                RichText::new(
                    "Start by clicking on the Underground (Perception Layer). Complete each layer's \
                     animation to unlock the next layer and earn points!",
                )
                .small(),
            );
        });
}
