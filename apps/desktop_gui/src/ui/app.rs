use std::time::{Duration, Instant};

use sim_core::{Settings, SimulationController, TickOutcome};

use crate::{
    controller::{events::UiEvent, orchestration::dispatch_ui_event},
    ui::{
        city_map::{random_cars, CityMap},
        layer_panel, panels,
    },
};

const AMBIENT_FRAME: Duration = Duration::from_millis(16);

pub struct SmartCityApp {
    controller: SimulationController,
    city_map: CityMap,
    started_at: Instant,
    status: Option<String>,
}

impl SmartCityApp {
    pub fn new(settings: &Settings) -> Self {
        let cars = random_cars(settings.ambient_cars, &mut rand::thread_rng());
        Self {
            controller: SimulationController::from_settings(settings),
            city_map: CityMap::new(settings.day_night_period(), cars),
            started_at: Instant::now(),
            status: None,
        }
    }

    fn process_ticks(&mut self, now: Instant) {
        for outcome in self.controller.advance(now) {
            if let TickOutcome::Completed(completion) = outcome {
                for label in &completion.new_achievements {
                    tracing::info!(achievement = %label, "achievement earned");
                }
            }
        }
    }
}

impl eframe::App for SmartCityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ticks(now);

        let snapshot = self.controller.snapshot();
        let elapsed = now.saturating_duration_since(self.started_at);
        let mut events: Vec<UiEvent> = Vec::new();

        egui::TopBottomPanel::top("score_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            panels::score_bar(ui, &snapshot);
            ui.add_space(6.0);
        });

        events.extend(panels::achievement_toast(ctx, &snapshot));

        egui::SidePanel::right("layer_panel")
            .resizable(false)
            .exact_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    layer_panel::show(ui, &snapshot, elapsed.as_secs_f32(), self.status.as_deref());
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                events.extend(self.city_map.show(ui, &snapshot, elapsed));
            });
        });

        for event in events {
            dispatch_ui_event(&mut self.controller, event, now, &mut self.status);
        }

        let wait = self
            .controller
            .time_until_tick(Instant::now())
            .map_or(AMBIENT_FRAME, |until| until.min(AMBIENT_FRAME));
        ctx.request_repaint_after(wait);
    }
}
