//! Inbound controller events and the outcomes reported back to hosts.

use serde::Serialize;
use shared::domain::{Layer, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    LayerClicked(Layer),
    Tick,
    AchievementDismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    Started,
    IgnoredAnimating,
    IgnoredLocked,
    IgnoredAlreadyActive,
}

impl ClickOutcome {
    pub fn started(self) -> bool {
        self == ClickOutcome::Started
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub layer: Layer,
    pub points_awarded: u32,
    pub score: u32,
    pub newly_unlocked: Option<Layer>,
    pub new_achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(Step),
    Completed(Completion),
    /// No sequence was running.
    Idle,
    /// The tick belonged to a timer arming that has since been replaced.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Click(ClickOutcome),
    Tick(TickOutcome),
    Dismissed(Option<String>),
}
