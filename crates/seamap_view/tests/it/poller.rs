use std::time::Duration;

use seamap_client::{SeamapClient, SeamapClientParams};
use seamap_core::map_config::MapConfig;
use seamap_view::{MapView, ShipPoller, ViewError, ViewEvent};
use tokio::sync::mpsc;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

use crate::helper::{TEST_POLL_INTERVAL_MS, TestHelper, ships_payload};

async fn next_ships(helper: &mut TestHelper) -> usize {
    loop {
        let event = helper.next_event().await;
        if let ViewEvent::ShipsLoaded(ships) = &event {
            let count = ships.len();
            helper.view.apply_event(event);
            return count;
        }
        helper.view.apply_event(event);
    }
}

#[tokio::test]
async fn test_ships_are_fetched_on_mount_and_replaced_wholesale() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/ships/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ships_payload(&["111", "222"])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/ships/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ships_payload(&["333"])))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let mut helper = TestHelper::new(mock_server).await;

    assert_eq!(next_ships(&mut helper).await, 2);
    assert_eq!(helper.view.state().ships().len(), 2);

    assert_eq!(next_ships(&mut helper).await, 1);
    let ships = helper.view.state().ships();
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].mmsi, "333");
}

#[tokio::test]
async fn test_failed_poll_keeps_previous_ships() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/ships/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ships_payload(&["111", "222"])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/ships/"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let mut helper = TestHelper::new(mock_server).await;
    assert_eq!(next_ships(&mut helper).await, 2);

    tokio::time::sleep(Duration::from_millis(TEST_POLL_INTERVAL_MS * 4)).await;

    assert_eq!(helper.view.process_pending(), 0);
    assert_eq!(helper.view.state().ships().len(), 2);
    assert!(helper.received_requests("/api/ships/").await >= 2);
}

#[tokio::test]
async fn test_unmount_stops_polling() {
    let mock_server = MockServer::start().await;
    let mut helper = TestHelper::new(mock_server).await;

    next_ships(&mut helper).await;
    assert!(helper.view.is_mounted());

    helper.view.unmount();
    assert!(!helper.view.is_mounted());

    tokio::time::sleep(Duration::from_millis(TEST_POLL_INTERVAL_MS)).await;
    let requests_after_unmount = helper.received_requests("/api/ships/").await;

    tokio::time::sleep(Duration::from_millis(TEST_POLL_INTERVAL_MS * 6)).await;
    assert_eq!(
        helper.received_requests("/api/ships/").await,
        requests_after_unmount
    );
}

#[tokio::test]
async fn test_mount_rejects_zero_poll_interval() {
    let mock_server = MockServer::start().await;
    let client = SeamapClient::new(SeamapClientParams {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let config = MapConfig {
        ship_poll_interval_ms: 0,
        ..Default::default()
    };

    assert!(matches!(
        MapView::mount(client, config),
        Err(ViewError::ZeroPollInterval)
    ));
}

#[tokio::test]
async fn test_mount_uses_configured_grid_and_interval() {
    let mock_server = MockServer::start().await;
    let helper = TestHelper::new(mock_server).await;

    assert_eq!(helper.view.grid().len(), 4);
    assert_eq!(
        helper.view.config().ship_poll_interval(),
        Duration::from_millis(TEST_POLL_INTERVAL_MS)
    );
}

#[tokio::test]
async fn test_stopped_poller_finishes() {
    let mock_server = MockServer::start().await;
    let client = SeamapClient::new(SeamapClientParams {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    let (events_tx, _events_rx) = mpsc::unbounded_channel();

    let poller = ShipPoller::start(
        client,
        Duration::from_millis(TEST_POLL_INTERVAL_MS),
        events_tx,
    );
    assert!(!poller.is_finished());

    poller.stop();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !poller.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("poller did not stop");
}
