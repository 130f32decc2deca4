use seamap_client::SeamapClient;
use seamap_core::{geopoint::GeoPoint, metric::TrafficMetric};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};

use crate::event::ViewEvent;

/// Monotonic id of the latest traffic-metrics request. Responses carrying an
/// older id are dropped.
#[derive(Debug, Default)]
pub(crate) struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }
}

pub(crate) fn spawn_route_build(
    client: SeamapClient,
    start: GeoPoint,
    end: GeoPoint,
    speed_knots: Option<f64>,
    events: UnboundedSender<ViewEvent>,
) {
    tokio::spawn(async move {
        match client.calculate_route(&start, &end, speed_knots).await {
            Ok(response) => {
                if events.send(ViewEvent::RouteComputed(response)).is_err() {
                    debug!("View is gone, dropping route");
                }
            }
            Err(err) => error!("Failed to build route: {}", err),
        }
    });
}

pub(crate) fn spawn_traffic_metrics_fetch(
    client: SeamapClient,
    generation: u64,
    metrics: Vec<TrafficMetric>,
    events: UnboundedSender<ViewEvent>,
) {
    tokio::spawn(async move {
        match client.fetch_traffic_metrics(&metrics).await {
            Ok(response) => {
                let event = ViewEvent::TrafficMetricsLoaded {
                    generation,
                    metrics,
                    response,
                };
                if events.send(event).is_err() {
                    debug!("View is gone, dropping traffic metrics");
                }
            }
            Err(err) => error!("Failed to load traffic metrics: {}", err),
        }
    });
}
