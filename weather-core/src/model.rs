use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{conditions::condition_for_code, error::LookupError};

/// Free-text location as typed by the user. Guaranteed non-blank, otherwise untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        if input.trim().is_empty() {
            return Err(LookupError::Validation(
                "location must not be empty".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best geocoding match for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub latitude: f64,
    pub longitude: f64,
    /// Canonical name from the provider, not the query text.
    pub name: String,
}

/// Current conditions as reported by the provider, metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsReading {
    pub time: Option<String>,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub relative_humidity: f64,
    pub wind_speed: f64,
    pub wind_gusts: f64,
    pub weather_code: i64,
}

/// Output of the `get-weather` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub conditions: String,
    pub location: String,
}

impl WeatherResult {
    pub fn from_reading(place: &ResolvedPlace, reading: &ConditionsReading) -> Self {
        Self {
            temperature: reading.temperature,
            feels_like: reading.apparent_temperature,
            humidity: reading.relative_humidity,
            wind_speed: reading.wind_speed,
            wind_gust: reading.wind_gusts,
            conditions: condition_for_code(reading.weather_code).to_string(),
            location: place.name.clone(),
        }
    }

    /// Check the output contract before handing the result to a caller.
    pub fn validate(&self) -> Result<(), LookupError> {
        let numbers = [
            ("temperature", self.temperature),
            ("feelsLike", self.feels_like),
            ("humidity", self.humidity),
            ("windSpeed", self.wind_speed),
            ("windGust", self.wind_gust),
        ];

        if let Some((field, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LookupError::Contract(format!(
                "{field} is not a finite number ({value})"
            )));
        }
        if self.conditions.is_empty() {
            return Err(LookupError::Contract("conditions is empty".to_string()));
        }
        if self.location.is_empty() {
            return Err(LookupError::Contract("location is empty".to_string()));
        }

        Ok(())
    }
}
