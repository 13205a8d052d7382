pub mod address_resolver;
pub mod cell_service;
pub mod geocoding;
pub mod postal_lookup;

pub use address_resolver::AddressResolver;
pub use cell_service::CellService;
pub use geocoding::{FallbackGeocoder, GeoapifyClient, NominatimClient, PrimaryGeocoder};
pub use postal_lookup::{PostalDirectory, ViaCepClient};
