use serde::Serialize;

use crate::geopoint::GeoPoint;

/// Maximum number of route endpoints, start and end.
pub const MAX_ROUTE_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub distance_km: f64,
    pub eta_hours: f64,
    pub path: Vec<GeoPoint>,
}

impl RouteResult {
    pub fn summary(&self) -> String {
        format!(
            "Length: {:.2} km, Time: {:.2} h",
            self.distance_km, self.eta_hours
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum RouteEndpoint {
    Start,
    End,
}

impl RouteEndpoint {
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            RouteEndpoint::Start
        } else {
            RouteEndpoint::End
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteEndpoint::Start => "Start",
            RouteEndpoint::End => "End",
        }
    }
}
