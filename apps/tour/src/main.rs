use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    content,
    domain::{Layer, Step, STEPS_PER_SEQUENCE},
};
use sim_core::{spawn_simulation, ClickOutcome, SimulationHandle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Headless walkthrough of the smart city layers")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    step_interval_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Click each layer in turn and print every state change as a JSON line.
    Play {
        /// Layers to click, in order. Defaults to the full unlock progression.
        layers: Vec<Layer>,
        /// Dismiss each achievement once its sequence completes.
        #[arg(long)]
        dismiss: bool,
    },
    /// Print the narration for every layer and step.
    Content,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = sim_core::load_settings(cli.config.as_deref());
    if let Some(ms) = cli.step_interval_ms.filter(|ms| *ms > 0) {
        settings.step_interval_ms = ms;
    }

    match cli.command {
        Command::Play { layers, dismiss } => {
            let layers = if layers.is_empty() {
                Layer::ALL.to_vec()
            } else {
                layers
            };
            let (handle, task) = spawn_simulation(settings.step_interval());
            play(&handle, &layers, dismiss).await?;
            drop(handle);
            task.await.context("simulation task panicked")?;
        }
        Command::Content => {
            for layer in Layer::ALL {
                println!("{} Layer ({})", layer.title(), layer.district());
                for index in 0..STEPS_PER_SEQUENCE {
                    let step = Step::new(index)?;
                    println!("  {}. {}", step.ordinal(), content::describe(layer, step));
                }
            }
        }
    }

    Ok(())
}

async fn play(handle: &SimulationHandle, layers: &[Layer], dismiss: bool) -> Result<()> {
    let mut snapshots = handle.watch_snapshots();
    print_json(&*snapshots.borrow_and_update())?;

    for layer in layers {
        let outcome = handle.click(*layer).await?;
        if outcome != ClickOutcome::Started {
            tracing::warn!(%layer, ?outcome, "click did not start a sequence; skipping");
            continue;
        }

        loop {
            let snapshot = snapshots.borrow_and_update().clone();
            print_json(&snapshot)?;
            if !snapshot.is_animating {
                break;
            }
            snapshots
                .changed()
                .await
                .context("simulation stopped mid-sequence")?;
        }

        if dismiss {
            while let Some(label) = handle.dismiss_latest_achievement().await? {
                tracing::info!(achievement = %label, "dismissed");
            }
            print_json(&*snapshots.borrow_and_update())?;
        }
    }

    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
