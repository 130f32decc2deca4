use clap::Args;
use seamap_core::{
    grid::{GridExtent, generate_grid_cells},
    map_config::MapConfig,
};

#[derive(Args)]
pub struct GridArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat_start: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lat_end: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lon_start: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lon_end: Option<f64>,

    /// Cell size in degrees
    #[arg(long)]
    step: Option<f64>,
}

/// Prints the traffic grid as JSON, defaults to the map's grid.
pub fn run(args: GridArgs) -> anyhow::Result<()> {
    let defaults = MapConfig::default();
    let extent = GridExtent {
        lat_start: args.lat_start.unwrap_or(defaults.grid_extent.lat_start),
        lat_end: args.lat_end.unwrap_or(defaults.grid_extent.lat_end),
        lon_start: args.lon_start.unwrap_or(defaults.grid_extent.lon_start),
        lon_end: args.lon_end.unwrap_or(defaults.grid_extent.lon_end),
    };

    let cells = generate_grid_cells(&extent, args.step.unwrap_or(defaults.grid_step))?;
    println!("{}", serde_json::to_string_pretty(&cells)?);

    Ok(())
}
