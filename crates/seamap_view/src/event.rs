use seamap_client::types::{RouteResponse, TrafficMetricsResponse};
use seamap_core::{geopoint::GeoPoint, metric::TrafficMetric, ship::Ship, view_state::Mode};

/// A user intent coming from the map or the settings panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetMode(Mode),
    MapClick(GeoPoint),
    MarkerContextMenu(usize),
    ClearMarkers,
    ClearRoute,
    BuildRoute,
    ToggleMetric { metric: TrafficMetric, checked: bool },
    ToggleGrid,
    OpenPanel,
    ClosePanel,
}

/// Completion of an asynchronous fetch, applied to the state by the view.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    ShipsLoaded(Vec<Ship>),
    RouteComputed(RouteResponse),
    TrafficMetricsLoaded {
        generation: u64,
        metrics: Vec<TrafficMetric>,
        response: TrafficMetricsResponse,
    },
}
