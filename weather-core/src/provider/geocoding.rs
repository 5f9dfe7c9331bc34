use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::{Stage, UpstreamError},
    model::{LocationQuery, ResolvedPlace},
};

use super::{GeocodingClient, get_json, trim_base};

/// Open-Meteo geocoding search, best match only.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    search_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            search_url: format!("{}/search", trim_base(base_url)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    // Omitted entirely by the API when nothing matches.
    results: Option<Vec<GeoMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    latitude: f64,
    longitude: f64,
    name: String,
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocoder {
    #[instrument(skip_all, fields(query = %query))]
    async fn resolve(
        &self,
        query: &LocationQuery,
    ) -> Result<Option<ResolvedPlace>, UpstreamError> {
        let request = self
            .http
            .get(&self.search_url)
            .query(&[("name", query.as_str()), ("count", "1")]);

        let parsed: GeoSearchResponse = get_json(Stage::Geocoding, request).await?;

        let place = parsed
            .results
            .and_then(|r| r.into_iter().next())
            .map(|m| ResolvedPlace {
                latitude: m.latitude,
                longitude: m.longitude,
                name: m.name,
            });

        match &place {
            Some(p) => {
                debug!(name = %p.name, lat = p.latitude, lon = p.longitude, "resolved")
            }
            None => debug!("no geocoding match"),
        }

        Ok(place)
    }
}
