//! Core types for Otoku.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod key;
pub mod reservation;
pub mod shop;

pub use key::*;
pub use reservation::ReservationEntry;
pub use shop::{ItemRecord, ShopRecord};
