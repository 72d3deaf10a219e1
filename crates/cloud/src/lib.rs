//! # TerraSun Cloud
//!
//! Elevation acquisition for a lattice of points.
//!
//! Elevations are looked up from an Open-Elevation compatible service in a
//! single batched request. Any failure (timeout, error status, malformed or
//! inconsistent response) is logged and answered with a synthetic surface
//! instead, and the result says which of the two it is.
//!
//! ## Features
//!
//! - `native` (default): blocking [`OpenElevationProvider`] via tokio `block_on`

pub mod elevation_client;
pub mod elevation_models;
pub mod error;
pub mod http;
pub mod provider;
pub mod synthetic;

pub mod sync_api;

pub use elevation_client::{
    fetch_or_synthesize, ElevationClient, ElevationClientOptions, DEFAULT_ENDPOINT,
};
pub use error::{CloudError, Result};
pub use provider::{ElevationData, ElevationLookup, FixedElevation, SyntheticElevation};
pub use synthetic::{synthetic_elevation, synthetic_surface, synthetic_surface_seeded};

#[cfg(feature = "native")]
pub use sync_api::OpenElevationProvider;

/// Blocking API re-exported as `blocking` module (native only).
#[cfg(feature = "native")]
pub mod blocking {
    pub use crate::sync_api::*;
}
