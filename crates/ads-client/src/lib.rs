//! Thin client for the external ads platform's HTTP API.
//!
//! Two backends behind one surface: a live Graph-style HTTP backend and an
//! in-process sandbox catalog for development and tests. Read operations
//! degrade to empty collections on upstream failure; write operations degrade
//! to `false`. Callers never see upstream errors as panics or raised results.

#![warn(clippy::unwrap_used)]

pub mod client;
pub mod sandbox;
pub mod wire;

pub use client::AdsClient;
pub use sandbox::SampleCatalog;
pub use wire::PlatformUser;
