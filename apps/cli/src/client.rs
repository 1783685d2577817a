use std::time::Duration;

use async_trait::async_trait;
use t20_core::record::parse_records;
use t20_core::{ApiError, Endpoint, PlayerRecord, RecordSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<PlayerRecord>, ApiError> {
        let path = endpoint.path();
        let url = self.url(endpoint);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|error| ApiError::network(&path, error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|error| ApiError::network(&path, error.to_string()))?;
        let records = parse_records(&path, &body)?;
        tracing::debug!("{path} returned {} records", records.len());
        Ok(records)
    }
}

#[async_trait(?Send)]
impl RecordSource for ApiClient {
    async fn fetch_records(&self, endpoint: Endpoint) -> Result<Vec<PlayerRecord>, ApiError> {
        self.fetch(&endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use t20_core::Endpoint;

    #[test]
    fn joins_base_url_and_endpoint_path() -> Result<(), Box<dyn std::error::Error>> {
        let client = ApiClient::new("http://127.0.0.1:5000/")?;
        assert_eq!(
            client.url(&Endpoint::Team("Sri Lanka".into())),
            "http://127.0.0.1:5000/api/team/Sri%20Lanka"
        );
        assert_eq!(
            client.url(&Endpoint::Players),
            "http://127.0.0.1:5000/api/players"
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() -> Result<(), Box<dyn std::error::Error>> {
        // port 9 (discard) is closed on test machines
        let client = ApiClient::new("http://127.0.0.1:9")?;
        let error = client.fetch(&Endpoint::Players).await.unwrap_err();
        assert!(matches!(error, t20_core::ApiError::Network { ref path, .. } if path == "/api/players"));
        Ok(())
    }
}
