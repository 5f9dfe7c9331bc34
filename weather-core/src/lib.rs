//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The weather lookup service (geocode, then current conditions)
//! - Open-Meteo clients behind narrow, substitutable traits
//! - The WMO weather-code table
//! - The `get-weather` tool contract for agent frameworks
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod conditions;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod tool;

pub use conditions::{UNKNOWN_CONDITION, condition_for_code};
pub use config::Config;
pub use error::{LookupError, Stage, UpstreamError};
pub use model::{ConditionsReading, LocationQuery, ResolvedPlace, WeatherResult};
pub use provider::{ConditionsClient, GeocodingClient, OpenMeteoConditions, OpenMeteoGeocoder};
pub use service::WeatherService;
pub use tool::{ToolInput, WeatherTool};
