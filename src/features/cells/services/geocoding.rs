//! Geocoding provider clients.
//!
//! Two providers sit behind traits so the resolver cascade can be tested
//! without the network: Geoapify (paid, free-form queries, GeoJSON) and
//! Nominatim (free, three query shapes, string-encoded coordinates).

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::cells::models::Coordinate;

/// Primary (paid) geocoding provider
#[async_trait]
pub trait PrimaryGeocoder: Send + Sync {
    /// Whether the provider can be used at all (API key present)
    fn is_configured(&self) -> bool;

    /// Geocode a free-form address string
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>>;
}

/// Fallback (free) geocoding provider with its three query shapes
#[async_trait]
pub trait FallbackGeocoder: Send + Sync {
    async fn geocode_structured(
        &self,
        street: &str,
        city: &str,
        state: &str,
    ) -> Result<Option<Coordinate>>;

    async fn geocode_freeform(&self, query: &str) -> Result<Option<Coordinate>>;

    async fn geocode_postal_code(&self, postal_code: &str) -> Result<Option<Coordinate>>;
}

#[derive(Debug, Deserialize)]
struct GeoapifyResponse {
    features: Vec<GeoapifyFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoapifyFeature {
    geometry: GeoapifyGeometry,
}

#[derive(Debug, Deserialize)]
struct GeoapifyGeometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: Vec<f64>,
}

/// Geoapify geocoding client
pub struct GeoapifyClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeoapifyClient {
    pub fn new(client: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl PrimaryGeocoder for GeoapifyClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(None),
        };

        let url = format!(
            "{}/v1/geocode/search?text={}&filter=countrycode:br&bias=countrycode:br&limit=1&apiKey={}",
            self.base_url,
            urlencoding::encode(query),
            api_key
        );

        tracing::debug!("Geocoding (Geoapify): {}", query);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Geoapify request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Geoapify request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geoapify returned status: {}", response.status());
            return Ok(None);
        }

        let body: GeoapifyResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Geoapify response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Geoapify response: {}", e))
        })?;

        // GeoJSON carries [lon, lat]; internal order is (lat, lon)
        Ok(body.features.into_iter().next().and_then(|f| {
            match f.geometry.coordinates.as_slice() {
                [lon, lat, ..] => Some(Coordinate {
                    latitude: *lat,
                    longitude: *lon,
                }),
                _ => None,
            }
        }))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimCandidate {
    lat: String,
    lon: String,
}

/// Nominatim geocoding client
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn execute_request(&self, url: &str) -> Result<Option<Coordinate>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let candidates: Vec<NominatimCandidate> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        // Nominatim encodes lat/lon as strings
        Ok(candidates.into_iter().next().and_then(|c| {
            let latitude = c.lat.parse().ok()?;
            let longitude = c.lon.parse().ok()?;
            Some(Coordinate {
                latitude,
                longitude,
            })
        }))
    }
}

#[async_trait]
impl FallbackGeocoder for NominatimClient {
    async fn geocode_structured(
        &self,
        street: &str,
        city: &str,
        state: &str,
    ) -> Result<Option<Coordinate>> {
        let url = format!(
            "{}/search?street={}&city={}&state={}&country=Brasil&format=json&limit=1",
            self.base_url,
            urlencoding::encode(street),
            urlencoding::encode(city),
            urlencoding::encode(state)
        );
        tracing::debug!("Geocoding (Nominatim structured): {}/{}/{}", street, city, state);
        self.execute_request(&url).await
    }

    async fn geocode_freeform(&self, query: &str) -> Result<Option<Coordinate>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        tracing::debug!("Geocoding (Nominatim free-form): {}", query);
        self.execute_request(&url).await
    }

    async fn geocode_postal_code(&self, postal_code: &str) -> Result<Option<Coordinate>> {
        let url = format!(
            "{}/search?postalcode={}&country=Brazil&format=json&limit=1",
            self.base_url,
            urlencoding::encode(postal_code)
        );
        tracing::debug!("Geocoding (Nominatim postal code): {}", postal_code);
        self.execute_request(&url).await
    }
}
