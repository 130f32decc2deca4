use schemars::schema_for;
use seamap_core::{map_config::MapConfig, metric::MetricCell, ship::Ship};
use serde_json::json;

use crate::types::{RouteRequestBody, RouteResponse};

/// Schemas of everything exchanged with the API, plus the map config file.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "Ship": schema_for!(Ship),
        "RouteRequest": schema_for!(RouteRequestBody),
        "RouteResponse": schema_for!(RouteResponse),
        "MetricCell": schema_for!(MetricCell),
        "MapConfig": schema_for!(MapConfig),
    }))
}
