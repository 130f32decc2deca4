use std::time::Duration;

use seamap_client::{SeamapClient, SeamapClientParams};
use seamap_core::{grid::GridExtent, map_config::MapConfig};
use seamap_view::{MapView, ViewEvent};
use serde_json::{Value, json};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

pub const TEST_POLL_INTERVAL_MS: u64 = 50;
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestHelper {
    pub mock_server: MockServer,
    pub view: MapView,
}

impl TestHelper {
    /// Ships respond with an empty list unless the test mounts its own mock
    /// before calling this.
    pub async fn new(mock_server: MockServer) -> TestHelper {
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/api/ships/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .with_priority(u8::MAX)
            .mount(&mock_server)
            .await;

        let client = SeamapClient::new(SeamapClientParams {
            base_url: mock_server.uri(),
            ..Default::default()
        })
        .unwrap();

        let config = MapConfig {
            grid_extent: GridExtent {
                lat_start: 0.0,
                lat_end: 1.0,
                lon_start: 0.0,
                lon_end: 1.0,
            },
            grid_step: 0.5,
            ship_poll_interval_ms: TEST_POLL_INTERVAL_MS,
            ..Default::default()
        };

        let view = MapView::mount(client, config).unwrap();

        TestHelper { mock_server, view }
    }

    pub async fn next_event(&mut self) -> ViewEvent {
        tokio::time::timeout(EVENT_TIMEOUT, self.view.recv_event())
            .await
            .expect("timed out waiting for a view event")
            .expect("event channel closed")
    }

    /// Waits for the next event that is not a ship poll and applies it.
    pub async fn apply_next_non_ship_event(&mut self) {
        loop {
            let event = self.next_event().await;
            let is_ships = matches!(event, ViewEvent::ShipsLoaded(_));
            self.view.apply_event(event);
            if !is_ships {
                return;
            }
        }
    }

    pub async fn received_requests(&self, path: &str) -> usize {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == path)
            .count()
    }
}

pub fn ships_payload(mmsis: &[&str]) -> Value {
    Value::Array(
        mmsis
            .iter()
            .enumerate()
            .map(|(i, mmsi)| {
                json!({
                    "id": i,
                    "mmsi": mmsi,
                    "name": format!("SHIP {i}"),
                    "positions": [
                        {"latitude": 0.1 + i as f64 * 0.1, "longitude": 0.2, "heading": 45.0, "speed": 8.0}
                    ]
                })
            })
            .collect(),
    )
}
