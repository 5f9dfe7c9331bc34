use weather_core::{LookupError, WeatherResult};

/// Multi-line summary of a reading. Units are the Open-Meteo defaults.
pub fn summary(result: &WeatherResult) -> String {
    format!(
        "{location}: {conditions}\n\
         \x20 Temperature: {temp:.1}°C (feels like {feels:.1}°C)\n\
         \x20 Humidity:    {humidity:.0}%\n\
         \x20 Wind:        {wind:.1} km/h, gusts up to {gust:.1} km/h",
        location = result.location,
        conditions = result.conditions,
        temp = result.temperature,
        feels = result.feels_like,
        humidity = result.humidity,
        wind = result.wind_speed,
        gust = result.wind_gust,
    )
}

/// What the user sees when a lookup fails.
pub fn failure_message(err: &LookupError) -> String {
    match err {
        LookupError::Validation(_) => "Please enter a city name.".to_string(),
        LookupError::NotFound { query } => {
            format!("Could not find a place called '{query}'. Check the spelling and try again.")
        }
        LookupError::Upstream(e) if e.is_timeout() => {
            "The weather service took too long to answer. Please try again.".to_string()
        }
        LookupError::Upstream(_) | LookupError::Contract(_) => {
            "Failed to fetch weather. Please try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> WeatherResult {
        WeatherResult {
            temperature: 18.3,
            feels_like: 17.9,
            humidity: 60.0,
            wind_speed: 12.1,
            wind_gust: 20.4,
            conditions: "Overcast".into(),
            location: "Berlin".into(),
        }
    }

    #[test]
    fn summary_lists_every_field() {
        let text = summary(&berlin());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            [
                "Berlin: Overcast",
                "  Temperature: 18.3°C (feels like 17.9°C)",
                "  Humidity:    60%",
                "  Wind:        12.1 km/h, gusts up to 20.4 km/h",
            ]
        );
    }

    #[test]
    fn not_found_message_differs_from_generic_failure() {
        let not_found = failure_message(&LookupError::NotFound {
            query: "Nowhereville".into(),
        });
        let contract = failure_message(&LookupError::Contract("x".into()));

        assert!(not_found.contains("Nowhereville"));
        assert_eq!(contract, "Failed to fetch weather. Please try again.");
    }

    #[test]
    fn validation_message_asks_for_city() {
        let msg = failure_message(&LookupError::Validation(
            "location must not be empty".into(),
        ));
        assert_eq!(msg, "Please enter a city name.");
    }
}
