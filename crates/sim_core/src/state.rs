//! Session state and the pure transitions applied to it.

use serde::Serialize;
use shared::domain::{Achievement, Layer, LayerSet, Step, POINTS_PER_SEQUENCE};

use crate::events::{ClickOutcome, Completion, TickOutcome};

/// Everything the player's session knows. Only the controller mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    active_layer: Option<Layer>,
    step: Step,
    is_animating: bool,
    score: u32,
    unlocked_layers: LayerSet,
    achievements: Vec<String>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// Fresh session: nothing selected, perception unlocked, zero score.
    pub fn new() -> Self {
        Self {
            active_layer: None,
            step: Step::FIRST,
            is_animating: false,
            score: 0,
            unlocked_layers: [Layer::Perception].into_iter().collect(),
            achievements: Vec::new(),
        }
    }

    pub fn active_layer(&self) -> Option<Layer> {
        self.active_layer
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn unlocked_layers(&self) -> LayerSet {
        self.unlocked_layers
    }

    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    pub fn is_unlocked(&self, layer: Layer) -> bool {
        self.unlocked_layers.contains(layer)
    }

    /// Validates a click and, when it passes, starts `layer`'s sequence.
    pub(crate) fn select(&mut self, layer: Layer) -> ClickOutcome {
        if self.is_animating {
            return ClickOutcome::IgnoredAnimating;
        }
        if !self.unlocked_layers.contains(layer) {
            return ClickOutcome::IgnoredLocked;
        }
        if self.active_layer == Some(layer) {
            return ClickOutcome::IgnoredAlreadyActive;
        }

        self.active_layer = Some(layer);
        self.step = Step::FIRST;
        self.is_animating = true;
        ClickOutcome::Started
    }

    /// One cadence tick: advance the step, or finish the sequence on the last step.
    pub(crate) fn step_forward(&mut self) -> TickOutcome {
        let Some(layer) = self.active_layer.filter(|_| self.is_animating) else {
            return TickOutcome::Idle;
        };

        if let Some(next) = self.step.next() {
            self.step = next;
            return TickOutcome::Advanced(next);
        }

        self.is_animating = false;
        self.score = self.score.saturating_add(POINTS_PER_SEQUENCE);

        let mut new_achievements = Vec::new();
        let newly_unlocked = layer
            .successor()
            .filter(|successor| self.unlocked_layers.insert(*successor));
        if let Some(unlocked) = newly_unlocked {
            new_achievements.push(Achievement::Unlocked(unlocked).label());
        }

        let mastery = Achievement::Mastered(layer).label();
        if !self.achievements.contains(&mastery) {
            new_achievements.push(mastery);
        }
        self.achievements.extend(new_achievements.iter().cloned());

        TickOutcome::Completed(Completion {
            layer,
            points_awarded: POINTS_PER_SEQUENCE,
            score: self.score,
            newly_unlocked,
            new_achievements,
        })
    }

    pub(crate) fn dismiss_latest_achievement(&mut self) -> Option<String> {
        self.achievements.pop()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            active_layer: self.active_layer,
            step: self.step,
            is_animating: self.is_animating,
            score: self.score,
            unlocked_layers: self.unlocked_layers,
            achievements: self.achievements.clone(),
        }
    }
}

/// Read-only copy of [`SimulationState`] handed to views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSnapshot {
    pub active_layer: Option<Layer>,
    pub step: Step,
    pub is_animating: bool,
    pub score: u32,
    pub unlocked_layers: LayerSet,
    pub achievements: Vec<String>,
}

impl Default for SimulationSnapshot {
    fn default() -> Self {
        SimulationState::new().snapshot()
    }
}

impl SimulationSnapshot {
    pub fn latest_achievement(&self) -> Option<&str> {
        self.achievements.last().map(String::as_str)
    }

    pub fn is_unlocked(&self, layer: Layer) -> bool {
        self.unlocked_layers.contains(layer)
    }
}
