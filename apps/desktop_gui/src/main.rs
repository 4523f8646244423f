use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod controller;
mod ui;

use ui::SmartCityApp;

#[derive(Parser, Debug)]
#[command(about = "Interactive smart city data-flow walkthrough")]
struct Args {
    /// Settings file; defaults to ./smart_city.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Delay between sequence steps, overriding the settings file.
    #[arg(long)]
    step_interval_ms: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = sim_core::load_settings(args.config.as_deref());
    if let Some(ms) = args.step_interval_ms.filter(|ms| *ms > 0) {
        settings.step_interval_ms = ms;
    }
    tracing::info!(?settings, "starting smart city walkthrough");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Smart City Data Flow")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Smart City Data Flow",
        options,
        Box::new(move |_cc| Ok(Box::new(SmartCityApp::new(&settings)))),
    )
}
