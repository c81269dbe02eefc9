//! Debounced place search that steers the map camera.

pub mod camera;
pub mod location_search;
pub mod state;
