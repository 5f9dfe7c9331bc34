use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::{Stage, UpstreamError},
    model::ConditionsReading,
};

use super::{ConditionsClient, get_json, trim_base};

/// Fixed bundle of current-condition fields; nothing forecast or historical.
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
wind_speed_10m,wind_gusts_10m,weather_code";

/// Open-Meteo forecast endpoint, `current` block only.
#[derive(Debug, Clone)]
pub struct OpenMeteoConditions {
    http: Client,
    forecast_url: String,
}

impl OpenMeteoConditions {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            forecast_url: format!("{}/forecast", trim_base(base_url)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

// Every measurement is required: a payload missing one is malformed.
#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_gusts_10m: f64,
    weather_code: i64,
}

impl From<CurrentBlock> for ConditionsReading {
    fn from(c: CurrentBlock) -> Self {
        Self {
            time: c.time,
            temperature: c.temperature_2m,
            apparent_temperature: c.apparent_temperature,
            relative_humidity: c.relative_humidity_2m,
            wind_speed: c.wind_speed_10m,
            wind_gusts: c.wind_gusts_10m,
            weather_code: c.weather_code,
        }
    }
}

#[async_trait]
impl ConditionsClient for OpenMeteoConditions {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ConditionsReading, UpstreamError> {
        let request = self
            .http
            .get(&self.forecast_url)
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .query(&[("current", CURRENT_FIELDS)]);

        let parsed: ForecastResponse = get_json(Stage::Conditions, request).await?;

        debug!(
            code = parsed.current.weather_code,
            time = ?parsed.current.time,
            "current conditions"
        );

        Ok(parsed.current.into())
    }
}
