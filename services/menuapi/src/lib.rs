//! Menu service library crate.
//!
//! # Purpose
//! Exposes the menu HTTP API, the favorites service, configuration, seed data
//! and the in-memory store for use by the binary and tests.
//!
//! # Notes
//! Favorites rules live in [`favorites`]; the HTTP layer only resolves request
//! shapes and maps errors to status codes.
pub mod api;
pub mod app;
pub mod config;
pub mod favorites;
pub mod model;
pub mod observability;
pub mod seed;
pub mod store;
