//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{GeoCoordinate, RankedStation};
use crate::nearest::NearestStations;

/// Query-string form of a nearest-station request.
///
/// Values are kept as strings so that missing and malformed coordinates
/// can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct NearestQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub limit: Option<String>,
}

/// JSON-body form of a nearest-station request.
#[derive(Debug, Default, Deserialize)]
pub struct NearestBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub limit: Option<usize>,
}

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
}

/// Payload of a nearest-station response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestData {
    pub user_location: GeoCoordinate,
    pub stations: Vec<RankedStationResult>,
    pub total_found: usize,
}

impl NearestData {
    pub fn from_nearest(nearest: &NearestStations) -> Self {
        Self {
            user_location: nearest.caller,
            stations: nearest
                .stations
                .iter()
                .map(RankedStationResult::from_ranked)
                .collect(),
            total_found: nearest.total_found,
        }
    }
}

/// A station in a nearest-station response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStationResult {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub governorate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub is_active: bool,
    pub is_online: bool,

    /// Distance from the caller in km, two decimal places
    pub distance_km: f64,

    /// Zero-based rank, closest first
    pub rank: usize,
}

impl RankedStationResult {
    pub fn from_ranked(ranked: &RankedStation) -> Self {
        let station = &ranked.station;
        // Ranked stations are always located; the fallback is unreachable.
        let (latitude, longitude) = station
            .coordinate
            .map(|c| (c.latitude(), c.longitude()))
            .unwrap_or_default();

        Self {
            id: station.id.clone(),
            name: station.display_name.clone(),
            latitude,
            longitude,
            governorate: station.governorate.clone(),
            delegation: station.delegation.clone(),
            address: station.address.clone(),
            is_active: station.is_active,
            is_online: station.is_online,
            distance_km: ranked.distance_km,
            rank: ranked.rank,
        }
    }
}
