//! Routing of view events into the simulation controller.

use std::time::Instant;

use shared::domain::Layer;
use sim_core::{ClickOutcome, EventOutcome, SimulationController};

use crate::controller::events::UiEvent;

/// Forwards `event` to the controller and refreshes the status hint.
///
/// Events that only concern the views are left to the caller.
pub fn dispatch_ui_event(
    controller: &mut SimulationController,
    event: UiEvent,
    now: Instant,
    status: &mut Option<String>,
) {
    let Some(controller_event) = event.controller_event() else {
        return;
    };

    match controller.apply(controller_event, now) {
        EventOutcome::Click(outcome) => {
            tracing::debug!(?event, ?outcome, "routed ui click");
            if let UiEvent::LayerClicked(layer) = event {
                *status = click_hint(layer, outcome);
            }
        }
        EventOutcome::Dismissed(label) => {
            tracing::debug!(?label, "routed achievement dismissal");
        }
        EventOutcome::Tick(_) => {}
    }
}

fn click_hint(layer: Layer, outcome: ClickOutcome) -> Option<String> {
    match outcome {
        ClickOutcome::Started | ClickOutcome::IgnoredAlreadyActive => None,
        ClickOutcome::IgnoredAnimating => {
            Some("Wait for the current layer to finish its walkthrough.".to_string())
        }
        ClickOutcome::IgnoredLocked => {
            let prerequisite = Layer::ALL
                .into_iter()
                .find(|candidate| candidate.successor() == Some(layer));
            Some(match prerequisite {
                Some(previous) => format!(
                    "{} Layer is locked. Complete the {} Layer first.",
                    layer.title(),
                    previous.title()
                ),
                None => format!("{} Layer is locked.", layer.title()),
            })
        }
    }
}
