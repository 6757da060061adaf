use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use citycast_core::error::{ConfigError, NetworkError, ReqwestErrorExt};

use crate::types::{CatalogCity, WeatherBundle};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Typed client for the weather backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Arc<Client>,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::Invalid(format!("api base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("http client: {}", e)))?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Fetch the full city catalog.
    pub async fn catalog(&self) -> Result<Vec<CatalogCity>, NetworkError> {
        tracing::debug!("Fetching city catalog");

        let url = self.endpoint("api/cities")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;
        let response = check_response(response).await?;

        let cities: Vec<CatalogCity> = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        tracing::info!("Fetched {} catalog entries", cities.len());
        Ok(cities)
    }

    /// Fetch weather for the given city ids.
    ///
    /// The ids are sent comma-joined in a single `cityIds` query parameter,
    /// order preserved.
    pub async fn weather(&self, city_ids: &[String]) -> Result<WeatherBundle, NetworkError> {
        let joined = city_ids.join(",");
        tracing::debug!("Fetching weather for [{}]", joined);

        let url = self.endpoint("api/weather")?;
        let response = self
            .client
            .get(url)
            .query(&[("cityIds", joined.as_str())])
            .send()
            .await
            .map_err(|e| e.into_network_error())?;
        let response = check_response(response).await?;

        let bundle: WeatherBundle = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            "Fetched weather for {} cities ({} unresolved)",
            bundle.cities.len(),
            bundle.errors.len()
        );
        Ok(bundle)
    }

    fn endpoint(&self, path: &str) -> Result<Url, NetworkError> {
        self.base_url
            .join(path)
            .map_err(|e| NetworkError::InvalidResponse(format!("bad request URL: {}", e)))
    }
}

/// Check response status and extract the error body on failure.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, NetworkError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(NetworkError::ServerError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_accepts_http_base_url() {
        assert!(ApiClient::new("http://localhost:3000").is_ok());
    }
}
