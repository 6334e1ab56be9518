//! Otoku bot library.
//!
//! This crate provides the webhook service as a library, allowing it to be
//! tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod line;
pub mod messages;
pub mod reservation;
pub mod routes;
pub mod state;
