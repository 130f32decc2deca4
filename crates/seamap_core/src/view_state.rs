use serde::{Deserialize, Serialize};

use crate::{
    geopoint::GeoPoint,
    metric::{TrafficMetric, TrafficSample},
    route::{MAX_ROUTE_POINTS, RouteResult},
    ship::Ship,
};

/// How a click on the map is interpreted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Marker,
    Route,
}

/// Everything the map panel shows. Each field is written by exactly one
/// handler, so plain last-write-wins setters are enough.
#[derive(Debug, Clone)]
pub struct MapViewState {
    mode: Mode,
    markers: Vec<GeoPoint>,
    route_points: Vec<GeoPoint>,
    route_result: Option<RouteResult>,
    selected_metrics: Vec<TrafficMetric>,
    ships: Vec<Ship>,
    traffic_samples: Vec<TrafficSample>,
    is_panel_open: bool,
    show_traffic_grid: bool,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            markers: Vec::new(),
            route_points: Vec::with_capacity(MAX_ROUTE_POINTS),
            route_result: None,
            selected_metrics: Vec::new(),
            ships: Vec::new(),
            traffic_samples: Vec::new(),
            is_panel_open: false,
            show_traffic_grid: true,
        }
    }
}

impl MapViewState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn markers(&self) -> &[GeoPoint] {
        &self.markers
    }

    pub fn route_points(&self) -> &[GeoPoint] {
        &self.route_points
    }

    pub fn route_result(&self) -> Option<&RouteResult> {
        self.route_result.as_ref()
    }

    pub fn route_path(&self) -> &[GeoPoint] {
        self.route_result
            .as_ref()
            .map(|result| result.path.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_metrics(&self) -> &[TrafficMetric] {
        &self.selected_metrics
    }

    pub fn is_metric_selected(&self, metric: TrafficMetric) -> bool {
        self.selected_metrics.contains(&metric)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn traffic_samples(&self) -> &[TrafficSample] {
        &self.traffic_samples
    }

    pub fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    pub fn show_traffic_grid(&self) -> bool {
        self.show_traffic_grid
    }

    pub fn can_build_route(&self) -> bool {
        self.route_points.len() == MAX_ROUTE_POINTS
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn open_panel(&mut self) {
        self.is_panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.is_panel_open = false;
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_traffic_grid = !self.show_traffic_grid;
        self.show_traffic_grid
    }

    /// Returns true when the selection actually changed. Newly checked
    /// metrics are appended so the selection keeps click order.
    pub fn toggle_metric(&mut self, metric: TrafficMetric, checked: bool) -> bool {
        let selected = self.is_metric_selected(metric);
        match (checked, selected) {
            (true, false) => {
                self.selected_metrics.push(metric);
                true
            }
            (false, true) => {
                self.selected_metrics.retain(|m| *m != metric);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn push_marker(&mut self, point: GeoPoint) -> usize {
        self.markers.push(point);
        self.markers.len() - 1
    }

    pub(crate) fn remove_marker(&mut self, index: usize) -> Option<GeoPoint> {
        if index < self.markers.len() {
            Some(self.markers.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn push_route_point(&mut self, point: GeoPoint) -> Option<usize> {
        if self.route_points.len() >= MAX_ROUTE_POINTS {
            return None;
        }
        self.route_points.push(point);
        Some(self.route_points.len() - 1)
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn clear_route(&mut self) {
        self.route_points.clear();
        self.route_result = None;
    }

    /// The start and end of the route, once both have been placed.
    pub fn route_endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        match self.route_points.as_slice() {
            [start, end] => Some((*start, *end)),
            _ => None,
        }
    }

    /// A response without a path keeps the previously drawn one.
    pub fn apply_route_result(
        &mut self,
        distance_km: f64,
        eta_hours: f64,
        path: Option<Vec<GeoPoint>>,
    ) {
        let path = match path {
            Some(path) => path,
            None => self
                .route_result
                .take()
                .map(|result| result.path)
                .unwrap_or_default(),
        };

        self.route_result = Some(RouteResult {
            distance_km,
            eta_hours,
            path,
        });
    }

    pub fn replace_ships(&mut self, ships: Vec<Ship>) {
        self.ships = ships;
    }

    pub fn replace_traffic_samples(&mut self, samples: Vec<TrafficSample>) {
        self.traffic_samples = samples;
    }

    pub fn clear_traffic_samples(&mut self) {
        self.traffic_samples.clear();
    }
}
