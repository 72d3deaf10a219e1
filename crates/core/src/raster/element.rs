//! Raster element trait for generic cell values

use num_traits::Float;
use std::fmt::Debug;

/// Trait for types that can be stored in a raster cell.
///
/// Terrain and irradiance grids are always floating point, so only `f32`
/// and `f64` implement it. A non-finite value marks a missing cell.
pub trait RasterElement: Float + Debug + Send + Sync + 'static {
    /// Value used for missing cells
    fn missing() -> Self;

    /// Check if this value is missing
    fn is_missing(&self) -> bool;
}

macro_rules! impl_raster_element_float {
    ($t:ty) => {
        impl RasterElement for $t {
            fn missing() -> Self {
                <$t>::NAN
            }

            fn is_missing(&self) -> bool {
                !<$t>::is_finite(*self)
            }
        }
    };
}

impl_raster_element_float!(f32);
impl_raster_element_float!(f64);
