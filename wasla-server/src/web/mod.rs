//! Web layer for the nearest-station service.
//!
//! Exposes the nearest-station lookup over HTTP, both as a query-string
//! `GET` and as a JSON `POST`, using the platform's `success`/`data`/
//! `message` response envelope.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::{AppError, ErrorCode};
pub use routes::create_router;
pub use state::AppState;
