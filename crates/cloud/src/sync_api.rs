//! Blocking (synchronous) API for native platforms.
//!
//! Wraps the async [`ElevationClient`](crate::ElevationClient) with a Tokio
//! runtime so the pipeline can stay synchronous.

#[cfg(feature = "native")]
mod inner {
    use terrasun_core::{Lattice, Raster};

    use crate::elevation_client::{fetch_or_synthesize, ElevationClient, ElevationClientOptions};
    use crate::error::{CloudError, Result};
    use crate::provider::{ElevationData, ElevationLookup};

    /// Blocking Open-Elevation provider with synthetic fallback.
    ///
    /// Uses an internal single-threaded Tokio runtime. Must not be called
    /// from inside another Tokio runtime.
    pub struct OpenElevationProvider {
        rt: tokio::runtime::Runtime,
        inner: ElevationClient,
    }

    impl OpenElevationProvider {
        /// Create a provider for the configured endpoint.
        pub fn new(options: ElevationClientOptions) -> Result<Self> {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| CloudError::Network(e.to_string()))?;

            let inner = ElevationClient::new(options)?;
            Ok(Self { rt, inner })
        }

        /// The lookup URL requests go to.
        pub fn endpoint(&self) -> &str {
            self.inner.endpoint()
        }

        /// Live elevations only (blocking); errors instead of falling back.
        pub fn fetch(&self, lattice: &Lattice) -> Result<Raster<f64>> {
            self.rt.block_on(self.inner.fetch_lattice(lattice))
        }
    }

    impl ElevationLookup for OpenElevationProvider {
        fn elevations(&self, lattice: &Lattice) -> terrasun_core::Result<ElevationData> {
            Ok(self.rt.block_on(fetch_or_synthesize(&self.inner, lattice)))
        }
    }
}

#[cfg(feature = "native")]
pub use inner::*;
