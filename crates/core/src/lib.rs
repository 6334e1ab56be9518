//! Otoku Core - Shared types and pure logic.
//!
//! This crate provides the domain types and algorithmic pieces used by the
//! webhook binary:
//! - `otoku-bot` - LINE webhook server that routes inbound events
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype keys, catalog records, and reservation entries
//! - [`geo`] - Haversine distance and nearest-shop ranking
//! - [`command`] - Free-text command classification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod command;
pub mod geo;
pub mod types;

pub use command::{Command, CommandParser, ReserveArgumentMode};
pub use geo::{GeoPoint, RankedCandidate, haversine_km, nearest};
pub use types::*;
