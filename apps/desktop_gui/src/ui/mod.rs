//! UI layer for the desktop GUI: app shell, city map, side panels, and theme.

pub mod app;
pub mod city_map;
pub mod layer_panel;
pub mod panels;
pub mod step_animation;
pub mod theme;

pub use app::SmartCityApp;
