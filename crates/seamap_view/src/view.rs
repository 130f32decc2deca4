use std::sync::Arc;

use seamap_client::SeamapClient;
use seamap_core::{
    grid::{GridCell, GridError, generate_grid_cells},
    input::{on_map_click, on_marker_context_menu},
    map_config::MapConfig,
    metric::{merge_traffic_metrics, order_metric_response},
    overlay::{Overlay, project_overlays},
    panel::{SettingsPanel, project_panel},
    view_state::MapViewState,
};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::{
    event::{Command, ViewEvent},
    fetchers::{RequestGeneration, spawn_route_build, spawn_traffic_metrics_fetch},
    poller::ShipPoller,
};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to generate the traffic grid: {0}")]
    Grid(#[from] GridError),

    #[error("Ship poll interval must be at least 1 ms")]
    ZeroPollInterval,
}

/// Owns the view state and applies commands and fetch completions to it one
/// at a time. Must be mounted inside a tokio runtime.
pub struct MapView {
    state: MapViewState,
    grid: Arc<[GridCell]>,
    config: MapConfig,
    client: SeamapClient,
    events_tx: UnboundedSender<ViewEvent>,
    events_rx: UnboundedReceiver<ViewEvent>,
    poller: Option<ShipPoller>,
    metrics_generation: RequestGeneration,
}

impl MapView {
    /// Generates the grid and starts polling ships.
    pub fn mount(client: SeamapClient, config: MapConfig) -> Result<Self, ViewError> {
        let poll_interval = config.ship_poll_interval();
        if poll_interval.is_zero() {
            return Err(ViewError::ZeroPollInterval);
        }

        let grid: Arc<[GridCell]> =
            generate_grid_cells(&config.grid_extent, config.grid_step)?.into();
        info!("Generated traffic grid with {} cells", grid.len());

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let poller = ShipPoller::start(client.clone(), poll_interval, events_tx.clone());

        Ok(Self {
            state: MapViewState::default(),
            grid,
            config,
            client,
            events_tx,
            events_rx,
            poller: Some(poller),
            metrics_generation: RequestGeneration::default(),
        })
    }

    pub fn unmount(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
            info!("Ship poller stopped");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.poller.is_some()
    }

    pub fn state(&self) -> &MapViewState {
        &self.state
    }

    pub fn grid(&self) -> Arc<[GridCell]> {
        Arc::clone(&self.grid)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn overlays(&self) -> Vec<Overlay> {
        project_overlays(&self.state, &self.grid, &self.config.tile_layer)
    }

    pub fn panel(&self) -> SettingsPanel {
        project_panel(&self.state)
    }

    pub fn dispatch(&mut self, command: Command) {
        debug!(?command, "Dispatching");

        match command {
            Command::SetMode(mode) => self.state.set_mode(mode),
            Command::MapClick(point) => {
                on_map_click(&mut self.state, point);
            }
            Command::MarkerContextMenu(index) => {
                on_marker_context_menu(&mut self.state, index);
            }
            Command::ClearMarkers => self.state.clear_markers(),
            Command::ClearRoute => self.state.clear_route(),
            Command::BuildRoute => self.build_route(),
            Command::ToggleMetric { metric, checked } => {
                if self.state.toggle_metric(metric, checked) {
                    self.refresh_traffic_metrics();
                }
            }
            Command::ToggleGrid => {
                self.state.toggle_grid();
            }
            Command::OpenPanel => self.state.open_panel(),
            Command::ClosePanel => self.state.close_panel(),
        }
    }

    fn build_route(&mut self) {
        let Some((start, end)) = self.state.route_endpoints() else {
            debug!(
                "Route needs two points, have {}",
                self.state.route_points().len()
            );
            return;
        };

        spawn_route_build(
            self.client.clone(),
            start,
            end,
            self.config.route_speed_knots,
            self.events_tx.clone(),
        );
    }

    fn refresh_traffic_metrics(&mut self) {
        let generation = self.metrics_generation.advance();
        let metrics = self.state.selected_metrics().to_vec();

        if metrics.is_empty() {
            self.state.clear_traffic_samples();
            return;
        }

        spawn_traffic_metrics_fetch(
            self.client.clone(),
            generation,
            metrics,
            self.events_tx.clone(),
        );
    }

    /// Waits for the next fetch completion without applying it.
    pub async fn recv_event(&mut self) -> Option<ViewEvent> {
        self.events_rx.recv().await
    }

    pub fn apply_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::ShipsLoaded(ships) => {
                debug!("Replacing {} ships", ships.len());
                self.state.replace_ships(ships);
            }
            ViewEvent::RouteComputed(response) => {
                info!(
                    "Route computed: {:.2} km, {:.2} h",
                    response.distance_km, response.estimated_time_hours
                );
                let path = response.path();
                self.state.apply_route_result(
                    response.distance_km,
                    response.estimated_time_hours,
                    path,
                );
            }
            ViewEvent::TrafficMetricsLoaded {
                generation,
                metrics,
                response,
            } => {
                if !self.metrics_generation.is_current(generation) {
                    debug!(generation, "Discarding stale traffic metrics");
                    return;
                }

                let samples = merge_traffic_metrics(&order_metric_response(&metrics, response));
                info!("Loaded traffic metrics for {} cells", samples.len());
                self.state.replace_traffic_samples(samples);
            }
        }
    }

    /// Applies every completion that has already arrived.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.unmount();
    }
}
