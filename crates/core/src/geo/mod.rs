//! Geographic sampling of a study area

mod bbox;
mod lattice;

pub use bbox::BoundingBox;
pub use lattice::{linspace, CellSpacing, Lattice};

/// Approximate length of one degree of latitude, in metres.
///
/// Also used for one degree of longitude at the equator; the lattice scales
/// it by the cosine of the mean latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Upper bound on the number of samples along either lattice axis.
pub const MAX_SAMPLES_PER_AXIS: usize = 100;
