//! The weather lookup: geocode, then fetch current conditions, then shape.

use tracing::{debug, info, instrument};

use crate::{
    Config,
    error::LookupError,
    model::{LocationQuery, WeatherResult},
    provider::{self, ConditionsClient, GeocodingClient},
};

/// Orchestrates the two providers. Holds no per-request state, so one
/// instance can serve concurrent lookups.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn GeocodingClient>,
    conditions: Box<dyn ConditionsClient>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn GeocodingClient>, conditions: Box<dyn ConditionsClient>) -> Self {
        Self {
            geocoder,
            conditions,
        }
    }

    /// Service backed by the Open-Meteo APIs configured in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (geocoder, conditions) = provider::open_meteo_from_config(config)?;
        Ok(Self::new(geocoder, conditions))
    }

    /// Resolve `location` and return its current weather.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Validation`] for blank input; no request is made.
    /// - [`LookupError::NotFound`] when geocoding has no match; the conditions
    ///   provider is not called.
    /// - [`LookupError::Upstream`] for transport, status or payload failures of
    ///   either provider.
    #[instrument(skip(self))]
    pub async fn lookup_weather(&self, location: &str) -> Result<WeatherResult, LookupError> {
        let query = LocationQuery::parse(location)?;

        let place = self
            .geocoder
            .resolve(&query)
            .await?
            .ok_or_else(|| LookupError::NotFound {
                query: query.to_string(),
            })?;

        debug!(name = %place.name, "location resolved");

        let reading = self
            .conditions
            .current_conditions(place.latitude, place.longitude)
            .await?;

        let result = WeatherResult::from_reading(&place, &reading);
        result.validate()?;

        info!(
            location = %result.location,
            conditions = %result.conditions,
            "weather lookup complete"
        );
        Ok(result)
    }
}
