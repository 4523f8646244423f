//! Controller layer: view events and their routing into the simulation controller.

pub mod events;
pub mod orchestration;
