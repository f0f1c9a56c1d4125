//! Nearest-station lookup errors.

use crate::directory::DirectoryError;
use crate::domain::InvalidCoordinate;

/// Why a caller's input was rejected.
///
/// Validation always happens before the directory is contacted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Latitude or longitude was not supplied
    #[error("coordinates required")]
    MissingCoordinates,

    /// A coordinate was supplied but is not a usable number
    #[error("invalid {field}: {value:?}")]
    Unparseable { field: &'static str, value: String },

    /// Coordinates parsed but fall outside the globe
    #[error(transparent)]
    OutOfRange(#[from] InvalidCoordinate),

    /// Request body was not the expected JSON shape
    #[error("invalid request body: {0}")]
    Body(String),
}

/// Errors from a nearest-station lookup.
#[derive(Debug, thiserror::Error)]
pub enum NearestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The station directory could not be read
    #[error("failed to fetch stations: {0}")]
    Upstream(#[from] DirectoryError),

    /// The directory answered but no station is eligible
    #[error("no active stations with coordinates")]
    NotFound,
}
