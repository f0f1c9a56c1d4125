//! Nearest-station ranking.

use crate::directory::StationDirectory;
use crate::domain::{GeoCoordinate, RankedStation, StationRecord, round_km};

use super::error::NearestError;
use super::request::NearestRequest;

/// Outcome of a nearest-station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStations {
    /// The coordinate distances were measured from.
    pub caller: GeoCoordinate,
    /// Closest stations first, at most `limit` of them.
    pub stations: Vec<RankedStation>,
    /// Number of eligible stations before truncation.
    pub total_found: usize,
}

/// Rank `stations` by distance from `caller` and keep the closest `limit`.
///
/// Ineligible stations are dropped first. Ordering uses full-precision
/// distances and is stable, so equidistant stations keep directory order;
/// only the returned `distance_km` values are rounded.
pub fn rank_stations(
    caller: &GeoCoordinate,
    stations: Vec<StationRecord>,
    limit: usize,
) -> NearestStations {
    let mut measured: Vec<(f64, StationRecord)> = stations
        .into_iter()
        .filter_map(|station| {
            let distance = station.eligible_coordinate()?.distance_km(caller);
            Some((distance, station))
        })
        .collect();

    let total_found = measured.len();
    measured.sort_by(|a, b| a.0.total_cmp(&b.0));
    measured.truncate(limit);

    let stations = measured
        .into_iter()
        .enumerate()
        .map(|(rank, (distance, station))| RankedStation {
            station,
            distance_km: round_km(distance),
            rank,
        })
        .collect();

    NearestStations {
        caller: *caller,
        stations,
        total_found,
    }
}

/// Find the stations nearest to the caller.
///
/// Reads one snapshot from `directory`; a failed read is returned as is and
/// never retried. Having no eligible station at all is an error, while a
/// `limit` of zero yields an empty ranking.
pub async fn find_nearest(
    request: &NearestRequest,
    directory: &dyn StationDirectory,
) -> Result<NearestStations, NearestError> {
    let stations = directory.list_active().await?;
    let listed = stations.len();

    let nearest = rank_stations(&request.caller, stations, request.limit);

    tracing::debug!(
        caller = %request.caller,
        listed,
        eligible = nearest.total_found,
        returned = nearest.stations.len(),
        "ranked stations"
    );

    if nearest.total_found == 0 {
        return Err(NearestError::NotFound);
    }

    Ok(nearest)
}
