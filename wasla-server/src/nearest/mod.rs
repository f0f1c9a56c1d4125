//! Nearest-station search.
//!
//! Given a caller's position, reads the station directory once, keeps the
//! active and online stations that have a location, and ranks them by
//! great-circle distance.

mod config;
mod error;
mod finder;
mod request;

pub use config::{DEFAULT_LIMIT, NearestConfig};
pub use error::{NearestError, ValidationError};
pub use finder::{NearestStations, find_nearest, rank_stations};
pub use request::NearestRequest;
