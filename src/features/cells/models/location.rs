use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Street address resolved from a postal code
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResolvedAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Which geocoding provider produced a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GeocodeSource {
    Geoapify,
    Nominatim,
}

impl GeocodeSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            GeocodeSource::Geoapify => "Geoapify",
            GeocodeSource::Nominatim => "Nominatim",
        }
    }
}

/// Full result of a postal-code resolution: always carries the address,
/// and a coordinate only when some provider in the cascade succeeded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedLocation {
    pub address: ResolvedAddress,
    pub coordinate: Option<Coordinate>,
    pub source: Option<GeocodeSource>,
}
