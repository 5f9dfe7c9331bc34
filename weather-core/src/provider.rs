use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    Config,
    error::{Stage, UpstreamError},
    model::{ConditionsReading, LocationQuery, ResolvedPlace},
};

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoConditions;
pub use geocoding::OpenMeteoGeocoder;

const USER_AGENT: &str = concat!("weather-cli/", env!("CARGO_PKG_VERSION"));

/// Stage 1: free text to the provider's best match.
#[async_trait]
pub trait GeocodingClient: Send + Sync + Debug {
    /// `Ok(None)` when the provider has no candidate for the query.
    async fn resolve(&self, query: &LocationQuery)
    -> Result<Option<ResolvedPlace>, UpstreamError>;
}

/// Stage 2: coordinates to current conditions.
#[async_trait]
pub trait ConditionsClient: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ConditionsReading, UpstreamError>;
}

/// HTTP client shared by both Open-Meteo clients, with the configured timeout.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Construct both Open-Meteo clients from config.
pub fn open_meteo_from_config(
    config: &Config,
) -> anyhow::Result<(Box<dyn GeocodingClient>, Box<dyn ConditionsClient>)> {
    let http = http_client(config)?;

    let geocoder = OpenMeteoGeocoder::new(http.clone(), &config.geocoding_url);
    let conditions = OpenMeteoConditions::new(http, &config.forecast_url);

    Ok((Box::new(geocoder), Box::new(conditions)))
}

/// Send a request and decode a JSON body; any failure is attributed to `stage`.
async fn get_json<T: DeserializeOwned>(
    stage: Stage,
    request: RequestBuilder,
) -> Result<T, UpstreamError> {
    let res = request
        .send()
        .await
        .map_err(|source| UpstreamError::Transport { stage, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| UpstreamError::Transport { stage, source })?;

    debug!(%stage, %status, bytes = body.len(), "upstream response");

    if !status.is_success() {
        return Err(UpstreamError::Status {
            stage,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|source| UpstreamError::Payload { stage, source })
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
