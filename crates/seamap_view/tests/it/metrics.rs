use std::time::Duration;

use seamap_core::metric::TrafficMetric;
use seamap_view::Command;
use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

use crate::helper::TestHelper;

const TRAFFIC_METRICS_PATH: &str = "/api/traffic-metrics/";

fn toggle(metric: TrafficMetric, checked: bool) -> Command {
    Command::ToggleMetric { metric, checked }
}

#[tokio::test]
async fn test_selected_metrics_are_merged_by_cell() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path(TRAFFIC_METRICS_PATH))
        .and(matchers::query_param("metrics", "intensity"))
        .and(matchers::query_param("metrics", "saturation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "intensity": [
                {"cell_center": [0.25, 0.25], "value": 1},
                {"cell_center": [0.25, 0.75], "value": 2}
            ],
            "saturation": [
                {"cell_center": [0.25, 0.75], "value": 0.5},
                {"cell_center": [0.75, 0.25], "value": 0.25}
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path(TRAFFIC_METRICS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .with_priority(u8::MAX)
        .mount(&mock_server)
        .await;

    let mut helper = TestHelper::new(mock_server).await;

    helper.view.dispatch(toggle(TrafficMetric::Intensity, true));
    helper.view.dispatch(toggle(TrafficMetric::Saturation, true));

    // The single-metric request resolves to nothing, the second one is current
    helper.apply_next_non_ship_event().await;
    helper.apply_next_non_ship_event().await;

    let samples = helper.view.state().traffic_samples();
    assert_eq!(samples.len(), 3);
    assert!(samples[0].has("intensity") && !samples[0].has("saturation"));
    assert!(samples[1].has("intensity") && samples[1].has("saturation"));
    assert!(!samples[2].has("intensity") && samples[2].has("saturation"));
}

#[tokio::test]
async fn test_empty_selection_clears_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path(TRAFFIC_METRICS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "intensity": [{"cell_center": [0.25, 0.25], "value": 3}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut helper = TestHelper::new(mock_server).await;

    helper.view.dispatch(toggle(TrafficMetric::Intensity, true));
    helper.apply_next_non_ship_event().await;
    assert_eq!(helper.view.state().traffic_samples().len(), 1);

    helper.view.dispatch(toggle(TrafficMetric::Intensity, false));
    assert!(helper.view.state().traffic_samples().is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(helper.received_requests(TRAFFIC_METRICS_PATH).await, 1);
}

#[tokio::test]
async fn test_stale_metrics_response_is_discarded() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path(TRAFFIC_METRICS_PATH))
        .and(matchers::query_param("metrics", "saturation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "saturation": [{"cell_center": [0.75, 0.75], "value": 0.5}]
        })))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path(TRAFFIC_METRICS_PATH))
        .and(matchers::query_param("metrics", "intensity"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "intensity": [{"cell_center": [0.25, 0.25], "value": 9}]
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let mut helper = TestHelper::new(mock_server).await;

    helper.view.dispatch(toggle(TrafficMetric::Intensity, true));
    helper.view.dispatch(toggle(TrafficMetric::Saturation, true));

    helper.apply_next_non_ship_event().await;
    helper.apply_next_non_ship_event().await;

    let samples = helper.view.state().traffic_samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].cell_center, [0.75, 0.75]);
    assert_eq!(samples[0].get("saturation").unwrap().value, Some(0.5));
}
