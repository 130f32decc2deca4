pub mod geopoint;
pub mod grid;
pub mod input;
pub mod map_config;
pub mod metric;
pub mod overlay;
pub mod panel;
pub mod route;
pub mod ship;
pub mod view_state;
