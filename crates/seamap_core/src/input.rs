use tracing::debug;

use crate::{
    geopoint::GeoPoint,
    view_state::{MapViewState, Mode},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    MarkerAdded(usize),
    RoutePointAdded(usize),
    /// Both route endpoints are already placed.
    Ignored,
}

pub fn on_map_click(state: &mut MapViewState, point: GeoPoint) -> ClickOutcome {
    match state.mode() {
        Mode::Marker => ClickOutcome::MarkerAdded(state.push_marker(point)),
        Mode::Route => match state.push_route_point(point) {
            Some(index) => ClickOutcome::RoutePointAdded(index),
            None => {
                debug!(%point, "Route already has both endpoints, ignoring click");
                ClickOutcome::Ignored
            }
        },
    }
}

/// Right click on a user marker removes it.
pub fn on_marker_context_menu(state: &mut MapViewState, index: usize) -> Option<GeoPoint> {
    let removed = state.remove_marker(index);
    if removed.is_none() {
        debug!(index, "No marker at index");
    }
    removed
}
