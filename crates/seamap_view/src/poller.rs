use std::time::Duration;

use seamap_client::SeamapClient;
use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, error};

use crate::event::ViewEvent;

/// Fetches the ship list right away and then on a fixed interval. The task
/// is aborted when the poller is stopped or dropped.
pub struct ShipPoller {
    handle: JoinHandle<()>,
}

impl ShipPoller {
    pub fn start(
        client: SeamapClient,
        period: Duration,
        events: UnboundedSender<ViewEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                match client.fetch_ships().await {
                    Ok(ships) => {
                        if events.send(ViewEvent::ShipsLoaded(ships)).is_err() {
                            debug!("View is gone, stopping ship poller");
                            break;
                        }
                    }
                    Err(err) => error!("Failed to load ships: {}", err),
                }
            }
        });

        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ShipPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
