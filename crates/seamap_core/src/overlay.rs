use serde::Serialize;

use crate::{
    geopoint::GeoPoint,
    grid::GridCell,
    map_config::TileLayer,
    metric::TrafficSample,
    route::RouteEndpoint,
    ship::Ship,
    view_state::MapViewState,
};

pub const ROUTE_COLOR: &str = "blue";
pub const GRID_COLOR: &str = "grey";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub fill_opacity: f64,
}

/// A drawable item, independent of the map backend that renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    TileLayer {
        url_template: String,
        attribution: String,
    },
    RouteEndpoint {
        position: GeoPoint,
        endpoint: RouteEndpoint,
        popup: &'static str,
    },
    /// `index` is what a right click hands back to remove the marker.
    Marker {
        index: usize,
        position: GeoPoint,
        popup: String,
    },
    Ship {
        mmsi: String,
        position: GeoPoint,
        rotation_deg: f64,
        popup: Vec<String>,
    },
    Polyline {
        positions: Vec<GeoPoint>,
        color: &'static str,
    },
    Rectangle {
        bounds: [[f64; 2]; 2],
        style: PathStyle,
    },
    Label {
        position: GeoPoint,
        lines: Vec<String>,
    },
}

fn ship_overlay(ship: &Ship) -> Option<Overlay> {
    let position = ship.last_position()?;
    let speed = position
        .speed
        .map(|speed| speed.to_string())
        .unwrap_or_else(|| String::from("n/a"));

    Some(Overlay::Ship {
        mmsi: ship.mmsi.clone(),
        position: position.point(),
        rotation_deg: position.heading.unwrap_or(0.0),
        popup: vec![
            ship.display_name().to_owned(),
            format!("MMSI: {}", ship.mmsi),
            format!("speed: {}", speed),
            format!("lat: {}", position.latitude),
            format!("lon: {}", position.longitude),
        ],
    })
}

fn label_overlay(sample: &TrafficSample) -> Overlay {
    Overlay::Label {
        position: GeoPoint::from_lat_lng_pair(sample.cell_center),
        lines: sample.label_lines(),
    }
}

/// Projects the view state onto the overlays to draw, bottom layer first.
pub fn project_overlays(
    state: &MapViewState,
    grid: &[GridCell],
    tile_layer: &TileLayer,
) -> Vec<Overlay> {
    let mut overlays = vec![Overlay::TileLayer {
        url_template: tile_layer.url_template.clone(),
        attribution: tile_layer.attribution.clone(),
    }];

    overlays.extend(
        state
            .route_points()
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let endpoint = RouteEndpoint::from_index(index);
                Overlay::RouteEndpoint {
                    position: *point,
                    endpoint,
                    popup: endpoint.label(),
                }
            }),
    );

    overlays.extend(
        state
            .markers()
            .iter()
            .enumerate()
            .map(|(index, point)| Overlay::Marker {
                index,
                position: *point,
                popup: point.to_string(),
            }),
    );

    overlays.extend(state.ships().iter().filter_map(ship_overlay));

    let path = state.route_path();
    if path.len() > 1 {
        overlays.push(Overlay::Polyline {
            positions: path.to_vec(),
            color: ROUTE_COLOR,
        });
    }

    if state.show_traffic_grid() {
        overlays.extend(grid.iter().map(|cell| Overlay::Rectangle {
            bounds: cell.bounds,
            style: PathStyle {
                color: GRID_COLOR,
                weight: 1.0,
                fill_opacity: 0.1,
            },
        }));

        overlays.extend(state.traffic_samples().iter().map(label_overlay));
    }

    overlays
}
