use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShipPosition {
    #[serde(default)]
    pub id: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,

    /// Course over ground, degrees
    #[serde(default)]
    pub course: Option<f64>,

    /// True heading, degrees
    #[serde(default)]
    pub heading: Option<f64>,

    /// Speed over ground, knots
    #[serde(default)]
    pub speed: Option<f64>,

    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl ShipPosition {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ship {
    #[serde(default)]
    pub id: Option<u64>,
    pub mmsi: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub positions: Vec<ShipPosition>,
}

impl Ship {
    /// Positions are ordered oldest first; only the newest one is drawn.
    pub fn last_position(&self) -> Option<&ShipPosition> {
        self.positions.last()
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown vessel",
        }
    }
}
