use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grid::{DEFAULT_GRID_STEP, GridExtent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: String::from("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"),
            attribution: String::from("© OpenStreetMap contributors"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lng]` the map opens on
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub grid_extent: GridExtent,
    pub grid_step: f64,
    pub ship_poll_interval_ms: u64,

    /// Sent with route requests; the server falls back to 10 knots
    pub route_speed_knots: Option<f64>,
}

impl MapConfig {
    pub fn ship_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ship_poll_interval_ms)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [43.1155, 131.8855],
            zoom: 13,
            tile_layer: TileLayer::default(),
            grid_extent: GridExtent::default(),
            grid_step: DEFAULT_GRID_STEP,
            ship_poll_interval_ms: 5000,
            route_speed_knots: None,
        }
    }
}
