use std::{
    io::{Write, stdout},
    path::PathBuf,
    time::Duration,
};

use clap::Args;
use comfy_table::Table;
use seamap_client::{SeamapClient, SeamapClientParams, client::DEFAULT_API_URL};
use seamap_core::{
    geopoint::GeoPoint, map_config::MapConfig, metric::TrafficMetric, view_state::Mode,
};
use seamap_view::{Command, MapView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::parsers;

#[derive(Args)]
pub struct SessionArgs {
    /// Base URL of the ships API
    #[arg(long, env = "SEAMAP_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Ship polling interval (e.g. "5s", "500ms", "PT5S")
    #[arg(long, value_parser = parsers::parse_poll_interval)]
    pub poll_interval: Option<Duration>,

    /// JSON map config, missing fields use the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum SessionInput {
    View(Command),
    PrintOverlays,
    PrintPanel,
    PrintShips,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  mode marker|route        switch click mode
  click <lat> <lng>        click on the map
  remove <index>           right click on a marker
  clear markers|route      clear markers or the route
  build                    build the route between the two route points
  metric <id> on|off       toggle a traffic metric
  grid                     show or hide the traffic grid
  panel open|close         open or close the settings panel
  overlays | panel          print the overlays or the panel as JSON
  ships                    print the ships table
  help | quit";

fn parse_coordinate(value: Option<&str>, name: &str) -> Result<f64, String> {
    value
        .ok_or_else(|| format!("missing {name}"))?
        .parse::<f64>()
        .map_err(|err| format!("invalid {name}: {err}"))
}

fn parse_input(line: &str) -> Result<Option<SessionInput>, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let input = match (keyword, words.next()) {
        ("mode", Some("marker")) => SessionInput::View(Command::SetMode(Mode::Marker)),
        ("mode", Some("route")) => SessionInput::View(Command::SetMode(Mode::Route)),
        ("click", lat) => {
            let lat = parse_coordinate(lat, "latitude")?;
            let lng = parse_coordinate(words.next(), "longitude")?;
            SessionInput::View(Command::MapClick(GeoPoint::new(lat, lng)))
        }
        ("remove", Some(index)) => {
            let index = index
                .parse::<usize>()
                .map_err(|err| format!("invalid marker index: {err}"))?;
            SessionInput::View(Command::MarkerContextMenu(index))
        }
        ("clear", Some("markers")) => SessionInput::View(Command::ClearMarkers),
        ("clear", Some("route")) => SessionInput::View(Command::ClearRoute),
        ("build", None) => SessionInput::View(Command::BuildRoute),
        ("metric", Some(id)) => {
            let metric = id.parse::<TrafficMetric>().map_err(|err| err.to_string())?;
            let checked = match words.next() {
                Some("on") => true,
                Some("off") => false,
                _ => return Err(String::from("expected on or off")),
            };
            SessionInput::View(Command::ToggleMetric { metric, checked })
        }
        ("grid", None) => SessionInput::View(Command::ToggleGrid),
        ("panel", Some("open")) => SessionInput::View(Command::OpenPanel),
        ("panel", Some("close")) => SessionInput::View(Command::ClosePanel),
        ("overlays", None) => SessionInput::PrintOverlays,
        ("panel", None) => SessionInput::PrintPanel,
        ("ships", None) => SessionInput::PrintShips,
        ("help", None) => SessionInput::Help,
        ("quit" | "exit", None) => SessionInput::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };

    Ok(Some(input))
}

fn ships_table(view: &MapView) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["MMSI", "Name", "Lat", "Lon", "Heading", "Speed"]);

    for ship in view.state().ships() {
        let Some(position) = ship.last_position() else {
            continue;
        };
        let optional = |value: Option<f64>| {
            value
                .map(|value| format!("{value:.1}"))
                .unwrap_or_default()
        };

        table.add_row(vec![
            ship.mmsi.clone(),
            ship.display_name().to_owned(),
            format!("{:.5}", position.latitude),
            format!("{:.5}", position.longitude),
            optional(position.heading),
            optional(position.speed),
        ]);
    }

    table
}

fn load_config(args: &SessionArgs) -> anyhow::Result<MapConfig> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => MapConfig::default(),
    };

    if let Some(interval) = args.poll_interval {
        config.ship_poll_interval_ms = interval.as_millis().try_into()?;
    }

    if config.ship_poll_interval_ms == 0 {
        anyhow::bail!("Ship poll interval must be at least 1 ms");
    }

    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Returns false when the session should end.
fn handle_input(view: &mut MapView, input: SessionInput) -> anyhow::Result<bool> {
    match input {
        SessionInput::View(command) => view.dispatch(command),
        SessionInput::PrintOverlays => print_json(&view.overlays())?,
        SessionInput::PrintPanel => print_json(&view.panel())?,
        SessionInput::PrintShips => println!("{}", ships_table(view)),
        SessionInput::Help => println!("{HELP}"),
        SessionInput::Quit => return Ok(false),
    }

    Ok(true)
}

pub async fn run(args: SessionArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let client = SeamapClient::new(SeamapClientParams {
        base_url: args.api_url.clone(),
        ..Default::default()
    })?;

    info!("Mounting map view against {}", client.base_url());
    let mut view = MapView::mount(client, config)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_input(&line) {
                    Ok(Some(input)) => {
                        if !handle_input(&mut view, input)? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(message) => warn!("{}", message),
                }
            }
            Some(event) = view.recv_event() => view.apply_event(event),
        }
    }

    view.unmount();
    Ok(())
}
