use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absorbs floating-point noise such as `(43.4 - 42.8) / 0.025 = 24.000000000000057`.
const CELL_COUNT_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of cells a single grid may hold.
pub const MAX_GRID_CELLS: usize = 1_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Grid step must be a positive finite number, got {0}")]
    InvalidStep(f64),

    #[error("Grid extent is empty or inverted: {start}..{end}")]
    InvalidExtent { start: f64, end: f64 },

    #[error("Grid of {rows} x {cols} cells exceeds the limit of {max} cells", max = MAX_GRID_CELLS)]
    TooManyCells { rows: usize, cols: usize },
}

/// Geographic extent covered by the traffic grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridExtent {
    pub lat_start: f64,
    pub lat_end: f64,
    pub lon_start: f64,
    pub lon_end: f64,
}

impl Default for GridExtent {
    fn default() -> Self {
        Self {
            lat_start: 42.8,
            lat_end: 43.4,
            lon_start: 131.6,
            lon_end: 132.2,
        }
    }
}

pub const DEFAULT_GRID_STEP: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridCell {
    /// `[[lat_start, lon_start], [lat_end, lon_end]]`
    pub bounds: [[f64; 2]; 2],
    pub center: [f64; 2],
}

impl GridCell {
    fn new(lat: f64, lon: f64, step: f64) -> Self {
        Self {
            bounds: [[lat, lon], [lat + step, lon + step]],
            center: [lat + step / 2.0, lon + step / 2.0],
        }
    }

    /// Half-open: the upper edges belong to the next cell.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let [[lat_start, lon_start], [lat_end, lon_end]] = self.bounds;
        lat >= lat_start && lat < lat_end && lon >= lon_start && lon < lon_end
    }
}

fn axis_cell_count(start: f64, end: f64, step: f64) -> Result<usize, GridError> {
    if !start.is_finite() || !end.is_finite() || end <= start {
        return Err(GridError::InvalidExtent { start, end });
    }

    let count = ((end - start) / step - CELL_COUNT_TOLERANCE).ceil();
    Ok(count.max(1.0) as usize)
}

pub fn grid_dimensions(extent: &GridExtent, step: f64) -> Result<(usize, usize), GridError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(GridError::InvalidStep(step));
    }

    let rows = axis_cell_count(extent.lat_start, extent.lat_end, step)?;
    let cols = axis_cell_count(extent.lon_start, extent.lon_end, step)?;

    match rows.checked_mul(cols) {
        Some(total) if total <= MAX_GRID_CELLS => Ok((rows, cols)),
        _ => Err(GridError::TooManyCells { rows, cols }),
    }
}

/// Emits every cell covering `extent`, row-major by latitude then longitude.
/// Boundary cells are kept even when they stick out of the extent.
pub fn generate_grid_cells(extent: &GridExtent, step: f64) -> Result<Vec<GridCell>, GridError> {
    let (rows, cols) = grid_dimensions(extent, step)?;

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let lat = extent.lat_start + row as f64 * step;
        for col in 0..cols {
            let lon = extent.lon_start + col as f64 * step;
            cells.push(GridCell::new(lat, lon, step));
        }
    }

    Ok(cells)
}
