//! Station records as reported by the station directory.

use super::GeoCoordinate;

/// A station as seen in one directory snapshot.
///
/// The coordinate is optional: stations that have been registered but not
/// yet surveyed come back without one and can never be ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub display_name: String,
    pub coordinate: Option<GeoCoordinate>,
    pub is_active: bool,
    pub is_online: bool,

    /// Governorate (wilaya) the station belongs to, if known.
    pub governorate: Option<String>,
    /// Delegation (mutamadiya) within the governorate, if known.
    pub delegation: Option<String>,
    pub address: Option<String>,
}

impl StationRecord {
    /// Create an active, online record with no descriptive fields.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        coordinate: Option<GeoCoordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            coordinate,
            is_active: true,
            is_online: true,
            governorate: None,
            delegation: None,
            address: None,
        }
    }

    /// The station's coordinate, if it may take part in ranking.
    ///
    /// A station is eligible only when it is active, online and located.
    pub fn eligible_coordinate(&self) -> Option<&GeoCoordinate> {
        if self.is_active && self.is_online {
            self.coordinate.as_ref()
        } else {
            None
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible_coordinate().is_some()
    }
}

/// A station placed in a distance ranking for one caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: StationRecord,
    /// Distance from the caller, rounded to two decimal places.
    pub distance_km: f64,
    /// Zero-based position in the ranking.
    pub rank: usize,
}
