use serde::Serialize;

use crate::{
    metric::TrafficMetric,
    view_state::{MapViewState, Mode},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    ClearMarkers,
    ClearRoute,
    BuildRoute,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCheckbox {
    pub metric: TrafficMetric,
    pub label: &'static str,
    pub checked: bool,
}

/// The settings panel as the user sees it for a given state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsPanel {
    pub is_open: bool,
    /// The floating button that opens the panel, hidden while it is open.
    pub show_open_button: bool,
    pub active_mode: Mode,
    pub metrics: Vec<MetricCheckbox>,
    pub grid_toggle_caption: &'static str,
    pub actions: Vec<PanelAction>,
    pub route_summary: Option<String>,
}

fn available_actions(state: &MapViewState) -> Vec<PanelAction> {
    match state.mode() {
        Mode::Marker => vec![PanelAction::ClearMarkers],
        Mode::Route if state.can_build_route() => {
            vec![PanelAction::ClearRoute, PanelAction::BuildRoute]
        }
        Mode::Route => vec![PanelAction::ClearRoute],
    }
}

pub fn project_panel(state: &MapViewState) -> SettingsPanel {
    SettingsPanel {
        is_open: state.is_panel_open(),
        show_open_button: !state.is_panel_open(),
        active_mode: state.mode(),
        metrics: TrafficMetric::ALL
            .into_iter()
            .map(|metric| MetricCheckbox {
                metric,
                label: metric.label(),
                checked: state.is_metric_selected(metric),
            })
            .collect(),
        grid_toggle_caption: if state.show_traffic_grid() {
            "Hide traffic metrics"
        } else {
            "Show traffic metrics"
        },
        actions: available_actions(state),
        route_summary: state.route_result().map(|result| result.summary()),
    }
}
