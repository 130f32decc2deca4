use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Field name that is stored under the bare metric name when merging.
const VALUE_FIELD: &str = "value";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrafficMetric {
    Intensity,
    IntensitySpeed,
    Stability,
    Saturation,
}

impl TrafficMetric {
    pub const ALL: [TrafficMetric; 4] = [
        TrafficMetric::Intensity,
        TrafficMetric::IntensitySpeed,
        TrafficMetric::Stability,
        TrafficMetric::Saturation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TrafficMetric::Intensity => "intensity",
            TrafficMetric::IntensitySpeed => "intensity_speed",
            TrafficMetric::Stability => "stability",
            TrafficMetric::Saturation => "saturation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrafficMetric::Intensity => "Intensity",
            TrafficMetric::IntensitySpeed => "Intensity + speed",
            TrafficMetric::Stability => "Stability of motion parameters",
            TrafficMetric::Saturation => "Traffic saturation",
        }
    }
}

impl Display for TrafficMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown traffic metric: {0}")]
pub struct UnknownMetricError(pub String);

impl FromStr for TrafficMetric {
    type Err = UnknownMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrafficMetric::ALL
            .into_iter()
            .find(|metric| metric.id() == s)
            .ok_or_else(|| UnknownMetricError(s.to_owned()))
    }
}

/// One cell of one metric as returned by the traffic-metrics endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct MetricCell {
    pub cell_center: [f64; 2],

    /// `value` plus any metric specific extras (e.g. `sigma_v`, `sigma_c`)
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricField {
    pub name: String,
    pub value: Option<f64>,
}

/// Merged metric values of a single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSample {
    pub cell_center: [f64; 2],
    pub fields: Vec<MetricField>,
}

impl TrafficSample {
    fn new(cell_center: [f64; 2]) -> Self {
        Self {
            cell_center,
            fields: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Later writes to the same field replace the earlier value in place.
    fn set(&mut self, name: String, value: Option<f64>) {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(MetricField { name, value }),
        }
    }

    /// Text shown in the label drawn at the cell center, one line per field.
    pub fn label_lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| match field.value {
                Some(value) => format!("{}: {:.2}", field.name, value),
                None => format!("{}: n/a", field.name),
            })
            .collect()
    }
}

pub fn cell_key(cell_center: &[f64; 2]) -> String {
    format!("{},{}", cell_center[0], cell_center[1])
}

fn merged_field_name(metric: &str, field: &str) -> String {
    if field == VALUE_FIELD {
        metric.to_owned()
    } else {
        format!("{}_{}", metric, field)
    }
}

/// Orders the per-metric response by the user's selection. Metrics the
/// server returned without being asked for come last, by name.
pub fn order_metric_response(
    selected: &[TrafficMetric],
    mut response: BTreeMap<String, Vec<MetricCell>>,
) -> Vec<(String, Vec<MetricCell>)> {
    let mut ordered = Vec::with_capacity(response.len());

    for metric in selected {
        if let Some(cells) = response.remove(metric.id()) {
            ordered.push((metric.id().to_owned(), cells));
        }
    }

    ordered.extend(response);
    ordered
}

/// Combines per-metric cell lists into one record per distinct cell center,
/// in first-encounter order.
pub fn merge_traffic_metrics(metrics: &[(String, Vec<MetricCell>)]) -> Vec<TrafficSample> {
    let mut index_by_key: FxHashMap<String, usize> = FxHashMap::default();
    let mut samples: Vec<TrafficSample> = Vec::new();

    for (metric, cells) in metrics {
        for cell in cells {
            let key = cell_key(&cell.cell_center);
            let index = *index_by_key.entry(key).or_insert_with(|| {
                samples.push(TrafficSample::new(cell.cell_center));
                samples.len() - 1
            });

            let sample = &mut samples[index];
            for (field, value) in &cell.fields {
                let value = match value {
                    Value::Number(number) => number.as_f64(),
                    Value::Null => None,
                    other => {
                        debug!(
                            metric = %metric,
                            field = %field,
                            ?other,
                            "Skipping non numeric metric field"
                        );
                        continue;
                    }
                };

                sample.set(merged_field_name(metric, field), value);
            }
        }
    }

    samples
}
