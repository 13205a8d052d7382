//! Cascading postal-code resolver.
//!
//! Resolves a CEP to a street address, then tries providers in a fixed
//! priority order until one yields a coordinate:
//!
//! 1. Geoapify with the full free-form address (only when a key is set)
//! 2. Nominatim, structured street/city/state query
//! 3. Nominatim, free-form "city, state" query
//! 4. Nominatim, postal-code query (last resort, always tried)
//!
//! Each Nominatim attempt is preceded by a fixed politeness delay. A
//! failed attempt (network or parse error) is logged and the cascade
//! moves on; only the initial address lookup is fatal.

use std::sync::Arc;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::cells::models::{Coordinate, GeocodeSource, ResolvedLocation};
use crate::features::cells::services::geocoding::{FallbackGeocoder, PrimaryGeocoder};
use crate::features::cells::services::postal_lookup::PostalDirectory;
use crate::shared::validation::{normalize_cep, CEP_REGEX};

pub struct AddressResolver {
    directory: Arc<dyn PostalDirectory>,
    primary: Arc<dyn PrimaryGeocoder>,
    fallback: Arc<dyn FallbackGeocoder>,
    fallback_delay: Duration,
}

impl AddressResolver {
    pub fn new(
        directory: Arc<dyn PostalDirectory>,
        primary: Arc<dyn PrimaryGeocoder>,
        fallback: Arc<dyn FallbackGeocoder>,
        fallback_delay: Duration,
    ) -> Self {
        Self {
            directory,
            primary,
            fallback,
            fallback_delay,
        }
    }

    /// Resolve a postal code to an address and, best-effort, a coordinate.
    ///
    /// A malformed or unknown postal code aborts the whole resolution
    /// before any geocoding attempt. An exhausted cascade is not an
    /// error: the caller gets the address with `coordinate: None` and
    /// should offer manual placement instead.
    pub async fn resolve(&self, postal_code: &str) -> Result<ResolvedLocation> {
        if !CEP_REGEX.is_match(postal_code.trim()) {
            return Err(AppError::Validation(format!(
                "CEP inválido: {}",
                postal_code
            )));
        }

        let cep = normalize_cep(postal_code);

        let address = self
            .directory
            .lookup(&cep)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("CEP {} não encontrado", postal_code)))?;

        if self.primary.is_configured() {
            let query = format!(
                "{}, {}, {}, Brasil",
                address.street, address.city, address.state
            );
            if let Some(coordinate) = Self::attempt(self.primary.geocode(&query).await, "Geoapify")
            {
                return Ok(ResolvedLocation {
                    address,
                    coordinate: Some(coordinate),
                    source: Some(GeocodeSource::Geoapify),
                });
            }
        }

        if !address.street.is_empty() && !address.city.is_empty() && !address.state.is_empty() {
            tokio::time::sleep(self.fallback_delay).await;
            if let Some(coordinate) = Self::attempt(
                self.fallback
                    .geocode_structured(&address.street, &address.city, &address.state)
                    .await,
                "Nominatim (structured)",
            ) {
                return Ok(ResolvedLocation {
                    address,
                    coordinate: Some(coordinate),
                    source: Some(GeocodeSource::Nominatim),
                });
            }
        }

        if !address.city.is_empty() && !address.state.is_empty() {
            tokio::time::sleep(self.fallback_delay).await;
            let query = format!("{}, {}, Brasil", address.city, address.state);
            if let Some(coordinate) = Self::attempt(
                self.fallback.geocode_freeform(&query).await,
                "Nominatim (city)",
            ) {
                return Ok(ResolvedLocation {
                    address,
                    coordinate: Some(coordinate),
                    source: Some(GeocodeSource::Nominatim),
                });
            }
        }

        tokio::time::sleep(self.fallback_delay).await;
        if let Some(coordinate) = Self::attempt(
            self.fallback.geocode_postal_code(&cep).await,
            "Nominatim (postal code)",
        ) {
            return Ok(ResolvedLocation {
                address,
                coordinate: Some(coordinate),
                source: Some(GeocodeSource::Nominatim),
            });
        }

        tracing::info!("All geocoding attempts exhausted for CEP {}", cep);
        Ok(ResolvedLocation {
            address,
            coordinate: None,
            source: None,
        })
    }

    /// A failed attempt is no result, not a fatal error
    fn attempt(result: Result<Option<Coordinate>>, provider: &str) -> Option<Coordinate> {
        match result {
            Ok(coordinate) => coordinate,
            Err(e) => {
                tracing::warn!("{} attempt failed, continuing cascade: {}", provider, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::features::cells::models::ResolvedAddress;

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct FakeDirectory {
        address: Option<ResolvedAddress>,
    }

    #[async_trait]
    impl PostalDirectory for FakeDirectory {
        async fn lookup(&self, _postal_code: &str) -> Result<Option<ResolvedAddress>> {
            Ok(self.address.clone())
        }
    }

    struct FakePrimary {
        configured: bool,
        result: Result<Option<Coordinate>>,
        calls: CallLog,
    }

    #[async_trait]
    impl PrimaryGeocoder for FakePrimary {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn geocode(&self, _query: &str) -> Result<Option<Coordinate>> {
            self.calls.lock().unwrap().push("primary");
            clone_result(&self.result)
        }
    }

    struct FakeFallback {
        structured: Result<Option<Coordinate>>,
        freeform: Result<Option<Coordinate>>,
        postal: Result<Option<Coordinate>>,
        calls: CallLog,
    }

    #[async_trait]
    impl FallbackGeocoder for FakeFallback {
        async fn geocode_structured(
            &self,
            _street: &str,
            _city: &str,
            _state: &str,
        ) -> Result<Option<Coordinate>> {
            self.calls.lock().unwrap().push("structured");
            clone_result(&self.structured)
        }

        async fn geocode_freeform(&self, _query: &str) -> Result<Option<Coordinate>> {
            self.calls.lock().unwrap().push("freeform");
            clone_result(&self.freeform)
        }

        async fn geocode_postal_code(&self, _postal_code: &str) -> Result<Option<Coordinate>> {
            self.calls.lock().unwrap().push("postal");
            clone_result(&self.postal)
        }
    }

    fn clone_result(result: &Result<Option<Coordinate>>) -> Result<Option<Coordinate>> {
        match result {
            Ok(c) => Ok(*c),
            Err(_) => Err(AppError::ExternalServiceError("provider down".to_string())),
        }
    }

    fn full_address() -> ResolvedAddress {
        ResolvedAddress {
            street: "Avenida das Embaúbas".to_string(),
            neighborhood: "Setor Comercial".to_string(),
            city: "Sinop".to_string(),
            state: "MT".to_string(),
        }
    }

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    struct Setup {
        resolver: AddressResolver,
        calls: CallLog,
    }

    fn setup(
        address: Option<ResolvedAddress>,
        primary_configured: bool,
        primary: Result<Option<Coordinate>>,
        structured: Result<Option<Coordinate>>,
        freeform: Result<Option<Coordinate>>,
        postal: Result<Option<Coordinate>>,
    ) -> Setup {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let resolver = AddressResolver::new(
            Arc::new(FakeDirectory { address }),
            Arc::new(FakePrimary {
                configured: primary_configured,
                result: primary,
                calls: calls.clone(),
            }),
            Arc::new(FakeFallback {
                structured,
                freeform,
                postal,
                calls: calls.clone(),
            }),
            Duration::ZERO,
        );
        Setup { resolver, calls }
    }

    #[tokio::test]
    async fn malformed_postal_code_is_rejected_before_any_provider_call() {
        let s = setup(
            Some(full_address()),
            true,
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
        );

        for bad in ["7855-000", "78550 000", "abcde-fgh", ""] {
            let result = s.resolver.resolve(bad).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
        assert!(s.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_postal_code_aborts_without_geocoding() {
        let s = setup(
            None,
            true,
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
            Ok(Some(coord(1.0, 2.0))),
        );

        let result = s.resolver.resolve("00000-000").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(s.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn configured_primary_hit_skips_fallback() {
        let s = setup(
            Some(full_address()),
            true,
            Ok(Some(coord(-11.86, -55.51))),
            Ok(Some(coord(0.0, 0.0))),
            Ok(Some(coord(0.0, 0.0))),
            Ok(Some(coord(0.0, 0.0))),
        );

        let location = s.resolver.resolve("78550-000").await.unwrap();
        assert_eq!(location.coordinate, Some(coord(-11.86, -55.51)));
        assert_eq!(location.source, Some(GeocodeSource::Geoapify));
        assert_eq!(*s.calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn unconfigured_primary_is_never_called() {
        let s = setup(
            Some(full_address()),
            false,
            Ok(Some(coord(0.0, 0.0))),
            Ok(Some(coord(-11.86, -55.51))),
            Ok(None),
            Ok(None),
        );

        let location = s.resolver.resolve("78550-000").await.unwrap();
        assert_eq!(location.coordinate, Some(coord(-11.86, -55.51)));
        assert_eq!(location.source, Some(GeocodeSource::Nominatim));
        assert_eq!(*s.calls.lock().unwrap(), vec!["structured"]);
    }

    #[tokio::test]
    async fn failed_primary_falls_through_in_order() {
        let s = setup(
            Some(full_address()),
            true,
            Err(AppError::ExternalServiceError("down".to_string())),
            Ok(None),
            Ok(Some(coord(-11.9, -55.5))),
            Ok(Some(coord(0.0, 0.0))),
        );

        let location = s.resolver.resolve("78550-000").await.unwrap();
        assert_eq!(location.coordinate, Some(coord(-11.9, -55.5)));
        assert_eq!(location.source, Some(GeocodeSource::Nominatim));
        assert_eq!(
            *s.calls.lock().unwrap(),
            vec!["primary", "structured", "freeform"]
        );
    }

    #[tokio::test]
    async fn structured_skipped_when_street_missing() {
        let address = ResolvedAddress {
            street: String::new(),
            ..full_address()
        };
        let s = setup(
            Some(address),
            false,
            Ok(None),
            Ok(Some(coord(0.0, 0.0))),
            Ok(None),
            Ok(Some(coord(-11.9, -55.5))),
        );

        let location = s.resolver.resolve("78550-000").await.unwrap();
        assert_eq!(location.coordinate, Some(coord(-11.9, -55.5)));
        assert_eq!(*s.calls.lock().unwrap(), vec!["freeform", "postal"]);
    }

    #[tokio::test]
    async fn exhausted_cascade_returns_address_without_coordinate() {
        let s = setup(
            Some(full_address()),
            false,
            Ok(None),
            Ok(None),
            Err(AppError::ExternalServiceError("down".to_string())),
            Ok(None),
        );

        let location = s.resolver.resolve("78550-000").await.unwrap();
        assert!(location.coordinate.is_none());
        assert!(location.source.is_none());
        assert_eq!(location.address.city, "Sinop");
        assert_eq!(
            *s.calls.lock().unwrap(),
            vec!["structured", "freeform", "postal"]
        );
    }
}
