use std::time::Duration;

use reqwest::Url;
use seamap_core::{metric::TrafficMetric, ship::Ship};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    types::{RouteRequestBody, RouteResponse, TrafficMetricsResponse},
};

pub const SHIPS_API_PATH: &str = "api/ships/";
pub const CALCULATE_ROUTE_API_PATH: &str = "api/calculate-route/";
pub const TRAFFIC_METRICS_API_PATH: &str = "api/traffic-metrics/";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct SeamapClientParams {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SeamapClientParams {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_URL),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Client for the ships, route and traffic-metrics endpoints. Cheap to
/// clone, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SeamapClient {
    base_url: Url,
    client: reqwest::Client,
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };

    // Without the trailing slash `join` would replace the last path segment
    let mut normalized = base_url.trim_end_matches('/').to_owned();
    normalized.push('/');

    let url = Url::parse(&normalized).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid(String::from("URL cannot be a base")));
    }

    Ok(url)
}

impl SeamapClient {
    pub fn new(params: SeamapClientParams) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&params.base_url)?;
        let client = reqwest::ClientBuilder::new()
            .timeout(params.timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    #[instrument(skip(self))]
    pub async fn fetch_ships(&self) -> Result<Vec<Ship>, ApiError> {
        let response = self.client.get(self.endpoint(SHIPS_API_PATH)?).send().await?;

        let ships: Vec<Ship> = self.handle_response(response).await?;
        debug!("SeamapApi: Fetched {} ships", ships.len());

        Ok(ships)
    }

    #[instrument(skip(self, start, end))]
    pub async fn calculate_route<P>(
        &self,
        start: &P,
        end: &P,
        speed_knots: Option<f64>,
    ) -> Result<RouteResponse, ApiError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let start: geo_types::Point = start.into();
        let end: geo_types::Point = end.into();

        let body = RouteRequestBody {
            start: [start.y(), start.x()],
            end: [end.y(), end.x()],
            speed_knots,
        };

        debug!(?body, "SeamapApi: Requesting route");

        let response = self
            .client
            .post(self.endpoint(CALCULATE_ROUTE_API_PATH)?)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_traffic_metrics(
        &self,
        metrics: &[TrafficMetric],
    ) -> Result<TrafficMetricsResponse, ApiError> {
        let query: Vec<(&str, &str)> = metrics
            .iter()
            .map(|metric| ("metrics", metric.id()))
            .collect();

        let response = self
            .client
            .get(self.endpoint(TRAFFIC_METRICS_API_PATH)?)
            .query(&query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
