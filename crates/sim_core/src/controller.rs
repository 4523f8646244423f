use std::time::{Duration, Instant};

use shared::domain::Layer;

use crate::{
    config::Settings,
    events::{ClickOutcome, ControllerEvent, EventOutcome, TickOutcome},
    state::{SimulationSnapshot, SimulationState},
    timer::{Expiry, StepTimer, TickToken},
};

/// Owns the session state and the step timer that paces it.
///
/// Hosts deliver clicks and timer expiries on one thread; a frame-driven host
/// calls [`SimulationController::advance`] every frame, an event-driven host
/// sleeps until [`SimulationController::pending_tick`] and then calls
/// [`SimulationController::fire`].
#[derive(Debug)]
pub struct SimulationController {
    state: SimulationState,
    timer: StepTimer,
}

impl SimulationController {
    pub fn new(step_interval: Duration) -> Self {
        Self {
            state: SimulationState::new(),
            timer: StepTimer::new(step_interval),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.step_interval())
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.state.snapshot()
    }

    pub fn step_interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn pending_tick(&self) -> Option<Expiry> {
        self.timer.pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until(now)
    }

    pub fn handle_layer_click(&mut self, layer: Layer, now: Instant) -> ClickOutcome {
        let outcome = self.state.select(layer);
        match outcome {
            ClickOutcome::Started => {
                // The new sequence owns the timer from here on.
                if self.timer.cancel() {
                    tracing::debug!(%layer, "cancelled pending tick of previous sequence");
                }
                self.timer.arm(now);
                tracing::info!(%layer, "layer sequence started");
            }
            ignored => tracing::debug!(%layer, outcome = ?ignored, "layer click ignored"),
        }
        outcome
    }

    /// Applies one tick immediately, regardless of the pending deadline.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.timer.cancel();
        let outcome = self.transition();
        if self.state.is_animating() {
            self.timer.arm(now);
        }
        outcome
    }

    /// Applies the expiry identified by `token`, if that arming is still live.
    pub fn fire(&mut self, token: TickToken, now: Instant) -> TickOutcome {
        if !self.timer.is_live(token) {
            tracing::debug!(?token, "discarding stale tick");
            return TickOutcome::Stale;
        }
        self.tick(now)
    }

    /// Applies every tick whose deadline is at or before `now`.
    ///
    /// Follow-up ticks are scheduled from the expired deadline, so a late
    /// frame catches up without stretching the cadence.
    pub fn advance(&mut self, now: Instant) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while let Some(expiry) = self.timer.take_due(now) {
            outcomes.push(self.transition());
            if !self.state.is_animating() {
                break;
            }
            self.timer.arm_at(expiry.deadline + self.timer.interval());
        }
        outcomes
    }

    pub fn dismiss_latest_achievement(&mut self) -> Option<String> {
        let dismissed = self.state.dismiss_latest_achievement();
        if let Some(label) = &dismissed {
            tracing::debug!(achievement = %label, "achievement dismissed");
        }
        dismissed
    }

    pub fn apply(&mut self, event: ControllerEvent, now: Instant) -> EventOutcome {
        match event {
            ControllerEvent::LayerClicked(layer) => {
                EventOutcome::Click(self.handle_layer_click(layer, now))
            }
            ControllerEvent::Tick => EventOutcome::Tick(self.tick(now)),
            ControllerEvent::AchievementDismissed => {
                EventOutcome::Dismissed(self.dismiss_latest_achievement())
            }
        }
    }

    fn transition(&mut self) -> TickOutcome {
        let outcome = self.state.step_forward();
        match &outcome {
            TickOutcome::Advanced(step) => {
                tracing::debug!(step = step.index(), "sequence advanced");
            }
            TickOutcome::Completed(completion) => {
                tracing::info!(
                    layer = %completion.layer,
                    score = completion.score,
                    "layer sequence completed"
                );
                if let Some(unlocked) = completion.newly_unlocked {
                    tracing::info!(layer = %unlocked, "layer unlocked");
                }
            }
            TickOutcome::Idle | TickOutcome::Stale => {}
        }
        outcome
    }
}
