//! Simulation controller for the smart city walkthrough: layer selection,
//! step pacing, unlock progression and scoring.

pub mod config;
pub mod controller;
pub mod driver;
pub mod events;
pub mod state;
pub mod timer;

pub use config::{load_settings, Settings};
pub use controller::SimulationController;
pub use driver::{spawn_simulation, DriverError, SimulationHandle};
pub use events::{ClickOutcome, Completion, ControllerEvent, EventOutcome, TickOutcome};
pub use state::{SimulationSnapshot, SimulationState};
pub use timer::{Expiry, StepTimer, TickToken};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
