use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::cells::models::ResolvedAddress;
use crate::shared::validation::normalize_cep;

/// Postal-code-to-address directory (ViaCEP in production)
#[async_trait]
pub trait PostalDirectory: Send + Sync {
    /// Look up a postal code. `Ok(None)` means the directory explicitly
    /// reported the code as unknown.
    async fn lookup(&self, postal_code: &str) -> Result<Option<ResolvedAddress>>;
}

/// ViaCEP API response structure
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
}

/// ViaCEP client (free Brazilian postal-code directory)
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PostalDirectory for ViaCepClient {
    async fn lookup(&self, postal_code: &str) -> Result<Option<ResolvedAddress>> {
        let cep = normalize_cep(postal_code);
        let url = format!("{}/ws/{}/json/", self.base_url, cep);

        tracing::debug!("Postal lookup: {} -> {}", postal_code, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("ViaCEP request failed: {:?}", e);
            AppError::ExternalServiceError(format!("ViaCEP request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("ViaCEP returned status: {}", response.status());
            return Ok(None);
        }

        let body: ViaCepResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse ViaCEP response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse ViaCEP response: {}", e))
        })?;

        if body.erro {
            return Ok(None);
        }

        Ok(Some(ResolvedAddress {
            street: body.logradouro.unwrap_or_default(),
            neighborhood: body.bairro.unwrap_or_default(),
            city: body.localidade.unwrap_or_default(),
            state: body.uf.unwrap_or_default(),
        }))
    }
}
