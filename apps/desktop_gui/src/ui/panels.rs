//! Score bar and achievement toast.

use egui::{Align2, Color32, RichText};
use sim_core::SimulationSnapshot;

use crate::{controller::events::UiEvent, ui::theme};

pub fn score_bar(ui: &mut egui::Ui, snapshot: &SimulationSnapshot) {
    egui::Frame::NONE
        .fill(theme::SCORE_BAR_START)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("🏆 Score: {}", snapshot.score))
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Right-to-left, so walk the unlock order backwards.
                    for layer in snapshot.unlocked_layers.iter().collect::<Vec<_>>().into_iter().rev() {
                        egui::Frame::NONE
                            .fill(Color32::from_white_alpha(50))
                            .corner_radius(10.0)
                            .inner_margin(egui::Margin::symmetric(8, 2))
                            .show(ui, |ui| {
                                ui.label(RichText::new(layer.title()).small().color(Color32::WHITE));
                            });
                    }
                });
            });
        });
}

/// Toast showing the most recent achievement, if any.
pub fn achievement_toast(ctx: &egui::Context, snapshot: &SimulationSnapshot) -> Option<UiEvent> {
    let latest = snapshot.latest_achievement()?;
    let mut dismissed = false;

    egui::Area::new(egui::Id::new("achievement_toast"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(theme::TOAST_FILL)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⭐").size(18.0).color(Color32::WHITE));
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new("Achievement Unlocked!")
                                    .strong()
                                    .color(Color32::WHITE),
                            );
                            ui.label(RichText::new(latest).small().color(Color32::WHITE));
                        });
                        if ui.small_button("✕").clicked() {
                            dismissed = true;
                        }
                    });
                });
        });

    dismissed.then_some(UiEvent::AchievementDismissed)
}
