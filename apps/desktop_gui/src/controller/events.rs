//! Events emitted by the desktop GUI views.

use shared::domain::Layer;
use sim_core::ControllerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    LayerClicked(Layer),
    LayerHovered(Option<Layer>),
    AchievementDismissed,
    DayNightToggled,
}

impl UiEvent {
    /// The simulation event this view event maps to, if it concerns the simulation at all.
    pub fn controller_event(self) -> Option<ControllerEvent> {
        match self {
            UiEvent::LayerClicked(layer) => Some(ControllerEvent::LayerClicked(layer)),
            UiEvent::AchievementDismissed => Some(ControllerEvent::AchievementDismissed),
            UiEvent::LayerHovered(_) | UiEvent::DayNightToggled => None,
        }
    }
}
