//! Async host that runs a [`SimulationController`] on its own tokio task.
//!
//! The task is the only owner of the controller. Callers talk to it with
//! [`ControllerEvent`]s and observe it through a snapshot `watch` channel and
//! a completion `broadcast` channel.

use std::time::Duration;

use thiserror::Error;
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time,
};

use shared::domain::Layer;

use crate::{
    controller::SimulationController,
    events::{ClickOutcome, Completion, ControllerEvent, EventOutcome, TickOutcome},
    state::SimulationSnapshot,
};

const COMMAND_QUEUE: usize = 64;
const COMPLETION_QUEUE: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("simulation task has stopped")]
    Stopped,
}

struct Command {
    event: ControllerEvent,
    reply: Option<oneshot::Sender<EventOutcome>>,
}

#[derive(Clone)]
pub struct SimulationHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SimulationSnapshot>,
    completions: broadcast::Sender<Completion>,
}

impl SimulationHandle {
    /// Delivers `event` and waits for the controller's verdict.
    pub async fn apply(&self, event: ControllerEvent) -> Result<EventOutcome, DriverError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command {
                event,
                reply: Some(reply),
            })
            .await
            .map_err(|_| DriverError::Stopped)?;
        outcome.await.map_err(|_| DriverError::Stopped)
    }

    pub async fn click(&self, layer: Layer) -> Result<ClickOutcome, DriverError> {
        match self.apply(ControllerEvent::LayerClicked(layer)).await? {
            EventOutcome::Click(outcome) => Ok(outcome),
            _ => Err(DriverError::Stopped),
        }
    }

    pub async fn dismiss_latest_achievement(&self) -> Result<Option<String>, DriverError> {
        match self.apply(ControllerEvent::AchievementDismissed).await? {
            EventOutcome::Dismissed(label) => Ok(label),
            _ => Err(DriverError::Stopped),
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn watch_snapshots(&self) -> watch::Receiver<SimulationSnapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_completions(&self) -> broadcast::Receiver<Completion> {
        self.completions.subscribe()
    }
}

/// Starts a fresh session on the current tokio runtime.
///
/// The task ends once every [`SimulationHandle`] clone has been dropped.
pub fn spawn_simulation(step_interval: Duration) -> (SimulationHandle, JoinHandle<()>) {
    let controller = SimulationController::new(step_interval);
    let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE);
    let (snapshot_tx, snapshots) = watch::channel(controller.snapshot());
    let (completions, _) = broadcast::channel(COMPLETION_QUEUE);

    let task = tokio::spawn(run(
        controller,
        command_rx,
        snapshot_tx,
        completions.clone(),
    ));

    (
        SimulationHandle {
            commands,
            snapshots,
            completions,
        },
        task,
    )
}

async fn run(
    mut controller: SimulationController,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<SimulationSnapshot>,
    completions: broadcast::Sender<Completion>,
) {
    loop {
        let pending = controller.pending_tick();
        let wake = async move {
            match pending {
                Some(expiry) => time::sleep_until(time::Instant::from_std(expiry.deadline)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("all simulation handles dropped; stopping driver");
                    break;
                };
                let outcome = controller.apply(command.event, time::Instant::now().into_std());
                if let EventOutcome::Tick(TickOutcome::Completed(completion)) = &outcome {
                    let _ = completions.send(completion.clone());
                }
                publish(&snapshots, &controller);
                if let Some(reply) = command.reply {
                    let _ = reply.send(outcome);
                }
            }
            () = wake => {
                let Some(expiry) = pending else { continue };
                let outcome = controller.fire(expiry.token, time::Instant::now().into_std());
                if let TickOutcome::Completed(completion) = outcome {
                    let _ = completions.send(completion);
                }
                publish(&snapshots, &controller);
            }
        }
    }
}

fn publish(snapshots: &watch::Sender<SimulationSnapshot>, controller: &SimulationController) {
    let next = controller.snapshot();
    snapshots.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}
