//! Wasla nearest-station server.
//!
//! A web service that answers: "which Wasla stations are closest to me?"
//! Station data is read from the Central Server on every request.

pub mod config;
pub mod directory;
pub mod domain;
pub mod nearest;
pub mod web;
