use std::collections::BTreeMap;

use schemars::JsonSchema;
use seamap_core::{geopoint::GeoPoint, metric::MetricCell};
use serde::{Deserialize, Serialize};

/// `[lat, lng]`, the order the API uses for every coordinate pair.
pub type LatLngPair = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "RouteRequest")]
pub struct RouteRequestBody {
    pub start: LatLngPair,
    pub end: LatLngPair,

    /// Vessel speed used for the ETA, the server assumes 10 knots when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_knots: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteResponse {
    pub distance_km: f64,
    pub estimated_time_hours: f64,

    #[serde(default)]
    pub route: Option<Vec<LatLngPair>>,
}

impl RouteResponse {
    pub fn path(&self) -> Option<Vec<GeoPoint>> {
        self.route
            .as_ref()
            .map(|route| route.iter().copied().map(GeoPoint::from).collect())
    }
}

/// Cells per metric id, as returned by `GET /api/traffic-metrics/`.
pub type TrafficMetricsResponse = BTreeMap<String, Vec<MetricCell>>;
