//! Central Server station directory client.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::domain::{GeoCoordinate, StationRecord};

use super::StationDirectory;
use super::error::DirectoryError;

/// Default base URL for the Central Server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Response envelope used by every Central Server endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Vec<StationDto>>,
    #[serde(default)]
    message: Option<String>,
}

/// Station as serialized by the Central Server.
///
/// Coordinates are kept as raw JSON: depending on the record they come back
/// as numbers, numeric strings, or null.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<serde_json::Value>,
    #[serde(default)]
    pub longitude: Option<serde_json::Value>,
    #[serde(default)]
    pub governorate: Option<String>,
    #[serde(default)]
    pub delegation: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_online: bool,
}

impl StationDto {
    /// Convert into a domain record.
    ///
    /// Missing, unparseable or out-of-range coordinates leave the record
    /// without a location rather than failing the whole snapshot.
    pub fn into_record(self) -> StationRecord {
        let coordinate = match (
            self.latitude.as_ref().and_then(number_from_json),
            self.longitude.as_ref().and_then(number_from_json),
        ) {
            (Some(lat), Some(lng)) => GeoCoordinate::new(lat, lng).ok(),
            _ => None,
        };

        StationRecord {
            id: self.id,
            display_name: self.name,
            coordinate,
            is_active: self.is_active,
            is_online: self.is_online,
            governorate: self.governorate,
            delegation: self.delegation,
            address: self.address,
        }
    }
}

/// Read a number that may have been encoded as a JSON string.
fn number_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Configuration for the Central Server client.
#[derive(Debug, Clone)]
pub struct CentralServerConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl CentralServerConfig {
    /// Create a new config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Authenticate with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CentralServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the Central Server station listing.
#[derive(Debug, Clone)]
pub struct CentralServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl CentralServerClient {
    /// Create a new Central Server client.
    pub fn new(config: CentralServerConfig) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                DirectoryError::Api {
                    status: 0,
                    message: "Invalid token format".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the full station listing.
    pub async fn fetch_stations(&self) -> Result<Vec<StationRecord>, DirectoryError> {
        let url = format!("{}/api/v1/stations", self.base_url);
        tracing::debug!(%url, "fetching station directory");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectoryError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: upstream_message(&body).unwrap_or(body),
            });
        }

        let body = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
        })?;

        if !envelope.success {
            return Err(DirectoryError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "station directory rejected the request".to_string()),
            });
        }

        let stations: Vec<StationRecord> = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(StationDto::into_record)
            .collect();

        tracing::debug!(count = stations.len(), "station directory fetched");
        Ok(stations)
    }
}

/// Pull `message` out of an error body, if it is a JSON envelope.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

impl StationDirectory for CentralServerClient {
    fn list_active(&self) -> BoxFuture<'_, Result<Vec<StationRecord>, DirectoryError>> {
        Box::pin(self.fetch_stations())
    }
}
