//! The `get-weather` tool: the lookup exposed to an agent with declared
//! input and output schemas.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{instrument, warn};

use crate::{error::LookupError, model::WeatherResult, service::WeatherService};

/// Tool input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolInput {
    /// City name
    pub location: String,
}

#[derive(Debug)]
pub struct WeatherTool {
    service: WeatherService,
}

impl WeatherTool {
    pub const NAME: &'static str = "get-weather";
    pub const DESCRIPTION: &'static str = "Get current weather for a location";

    pub fn new(service: WeatherService) -> Self {
        Self { service }
    }

    pub fn input_schema() -> Value {
        schema_for!(ToolInput).to_value()
    }

    pub fn output_schema() -> Value {
        schema_for!(WeatherResult).to_value()
    }

    /// Declaration handed to the orchestration layer.
    pub fn definition() -> Value {
        json!({
            "name": Self::NAME,
            "description": Self::DESCRIPTION,
            "input_schema": Self::input_schema(),
            "output_schema": Self::output_schema(),
        })
    }

    /// Typed entry point; output is already contract-checked by the service.
    pub async fn execute(&self, input: ToolInput) -> Result<WeatherResult, LookupError> {
        self.service.lookup_weather(&input.location).await
    }

    /// Untyped entry point: validates `input` against [`ToolInput`] and
    /// returns the result as JSON.
    #[instrument(skip_all, fields(tool = WeatherTool::NAME))]
    pub async fn call(&self, input: Value) -> Result<Value, LookupError> {
        let input: ToolInput = serde_json::from_value(input).map_err(|e| {
            warn!(error = %e, "rejected tool input");
            LookupError::Validation(e.to_string())
        })?;

        let result = self.execute(input).await?;

        serde_json::to_value(&result)
            .map_err(|e| LookupError::Contract(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::{StubConditions, StubGeocoder, berlin_reading, place};
    use std::sync::atomic::Ordering;

    fn tool(geo: &StubGeocoder, cond: &StubConditions) -> WeatherTool {
        WeatherTool::new(WeatherService::new(
            Box::new(geo.clone()),
            Box::new(cond.clone()),
        ))
    }

    #[test]
    fn input_schema_requires_location_string() {
        let schema = WeatherTool::input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["location"]["type"], "string");
        assert_eq!(schema["properties"]["location"]["description"], "City name");
        assert_eq!(schema["required"], json!(["location"]));
    }

    #[test]
    fn output_schema_lists_all_fields_as_required() {
        let schema = WeatherTool::output_schema();
        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        required.sort_unstable();

        assert_eq!(
            required,
            [
                "conditions",
                "feelsLike",
                "humidity",
                "location",
                "temperature",
                "windGust",
                "windSpeed",
            ]
        );
        assert_eq!(schema["properties"]["feelsLike"]["type"], "number");
        assert_eq!(schema["properties"]["conditions"]["type"], "string");
    }

    #[test]
    fn definition_carries_name_and_description() {
        let def = WeatherTool::definition();

        assert_eq!(def["name"], "get-weather");
        assert_eq!(def["description"], "Get current weather for a location");
        assert!(def["input_schema"].is_object());
        assert!(def["output_schema"].is_object());
    }

    #[tokio::test]
    async fn call_returns_camel_case_json() {
        let geo = StubGeocoder::returning(Some(place("Berlin")));
        let cond = StubConditions::returning(Some(berlin_reading()));

        let out = tool(&geo, &cond)
            .call(json!({ "location": "berlin" }))
            .await
            .unwrap();

        assert_eq!(
            out,
            json!({
                "temperature": 18.3,
                "feelsLike": 17.9,
                "humidity": 60.0,
                "windSpeed": 12.1,
                "windGust": 20.4,
                "conditions": "Overcast",
                "location": "Berlin",
            })
        );
    }

    #[tokio::test]
    async fn malformed_input_is_rejected_before_lookup() {
        let geo = StubGeocoder::returning(Some(place("Berlin")));
        let cond = StubConditions::returning(Some(berlin_reading()));
        let tool = tool(&geo, &cond);

        for input in [
            json!({}),
            json!({ "location": 42 }),
            json!("Berlin"),
            json!({ "city": "Berlin" }),
        ] {
            let err = tool.call(input.clone()).await.unwrap_err();
            assert!(matches!(err, LookupError::Validation(_)), "input {input}");
        }
        assert_eq!(geo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn extra_input_keys_are_ignored() {
        let geo = StubGeocoder::returning(Some(place("Berlin")));
        let cond = StubConditions::returning(Some(berlin_reading()));
        let tool = tool(&geo, &cond);

        let out = tool
            .call(json!({ "location": "Berlin", "units": "metric" }))
            .await
            .unwrap();
        assert_eq!(out["location"], "Berlin");
        assert_eq!(geo.calls.load(Ordering::SeqCst), 1);

        for input in [
            json!({ "units": "metric" }),
            json!({ "location": null, "units": "metric" }),
            json!({ "location": 7, "units": "metric" }),
        ] {
            let err = tool.call(input.clone()).await.unwrap_err();
            assert!(matches!(err, LookupError::Validation(_)), "input {input}");
        }
        assert_eq!(geo.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn input_schema_allows_additional_properties() {
        let schema = WeatherTool::input_schema();
        assert!(schema.get("additionalProperties").is_none());
    }

    #[tokio::test]
    async fn empty_location_is_validation_error() {
        let geo = StubGeocoder::returning(Some(place("Berlin")));
        let cond = StubConditions::returning(Some(berlin_reading()));

        let err = tool(&geo, &cond)
            .call(json!({ "location": "" }))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Validation(_)));
        assert_eq!(geo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn not_found_propagates_through_tool() {
        let geo = StubGeocoder::returning(None);
        let cond = StubConditions::returning(Some(berlin_reading()));

        let err = tool(&geo, &cond)
            .call(json!({ "location": "Nowhereville" }))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
