//! Per-point result tables produced by the pipeline stages

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where the elevations behind a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevationProvenance {
    /// Looked up from the elevation service
    Live,
    /// Generated by the synthetic fallback surface
    Synthetic,
}

impl std::fmt::Display for ElevationProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElevationProvenance::Live => write!(f, "live"),
            ElevationProvenance::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// A measured irradiance value at a scattered location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrradianceSample {
    pub latitude: f64,
    pub longitude: f64,
    /// W/m²
    pub irradiance: f64,
}

impl IrradianceSample {
    pub fn new(latitude: f64, longitude: f64, irradiance: f64) -> Self {
        Self {
            latitude,
            longitude,
            irradiance,
        }
    }
}

/// Slope and aspect at one lattice point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees from horizontal, `[0, 90]`
    pub slope: f64,
    /// Degrees clockwise from north, `[0, 360)`
    pub aspect: f64,
}

/// One output row of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub latitude: f64,
    pub longitude: f64,
    pub slope: f64,
    pub aspect: f64,
    /// W/m²
    pub irradiance: f64,
    /// W
    pub energy: f64,
}

/// Terrain stage output: one cell per lattice point, in lattice order.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTable {
    pub cells: Vec<TerrainCell>,
    /// Lattice shape `(n_lon, n_lat)`
    pub shape: (usize, usize),
    pub provenance: ElevationProvenance,
}

impl TerrainTable {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.latitude).collect()
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.longitude).collect()
    }

    pub fn slopes(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.slope).collect()
    }

    pub fn aspects(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.aspect).collect()
    }

    /// Midpoint between the lowest and highest latitude in the table.
    ///
    /// Used as the site latitude of the energy model. `None` for an empty table.
    pub fn representative_latitude(&self) -> Option<f64> {
        let stats = ColumnStats::of(self.cells.iter().map(|c| c.latitude))?;
        Some((stats.min + stats.max) / 2.0)
    }

    /// Add the irradiance and energy columns, consuming the terrain table.
    ///
    /// Both columns must be aligned with `cells` by position.
    pub fn enrich(
        self,
        irradiance: &[f64],
        energy: &[f64],
        repaired_points: usize,
    ) -> Result<EnergyTable> {
        check_len("irradiance", self.len(), irradiance.len())?;
        check_len("energy", self.len(), energy.len())?;

        let representative_latitude = self.representative_latitude().unwrap_or(0.0);
        let rows = self
            .cells
            .iter()
            .zip(irradiance.iter().zip(energy))
            .map(|(cell, (&irr, &e))| EnergyEstimate {
                latitude: cell.latitude,
                longitude: cell.longitude,
                slope: cell.slope,
                aspect: cell.aspect,
                irradiance: irr,
                energy: e,
            })
            .collect();

        Ok(EnergyTable {
            rows,
            shape: self.shape,
            provenance: self.provenance,
            repaired_points,
            representative_latitude,
        })
    }
}

/// Final pipeline output plus the metadata a caller needs to trust it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    pub rows: Vec<EnergyEstimate>,
    /// Lattice shape `(n_lon, n_lat)`
    pub shape: (usize, usize),
    /// Whether the elevations were live or synthetic
    pub provenance: ElevationProvenance,
    /// Irradiance points filled by the nearest-neighbour fallback
    pub repaired_points: usize,
    /// Latitude the energy model used to pick the optimal orientation
    pub representative_latitude: f64,
}

impl EnergyTable {
    /// Column names, in CSV order
    pub const COLUMNS: [&'static str; 6] =
        ["latitude", "longitude", "slope", "aspect", "irradiance", "energy"];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.latitude).collect()
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.longitude).collect()
    }

    pub fn slopes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.slope).collect()
    }

    pub fn aspects(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.aspect).collect()
    }

    pub fn irradiances(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.irradiance).collect()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.energy).collect()
    }

    /// Look up a column by its name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        match name {
            "latitude" => Some(self.latitudes()),
            "longitude" => Some(self.longitudes()),
            "slope" => Some(self.slopes()),
            "aspect" => Some(self.aspects()),
            "irradiance" => Some(self.irradiances()),
            "energy" => Some(self.energies()),
            _ => None,
        }
    }

    /// Summary statistics of a named column
    pub fn column_stats(&self, name: &str) -> Option<ColumnStats> {
        ColumnStats::of(self.column(name)?.into_iter())
    }

    /// Sum of the energy column, W
    pub fn total_energy(&self) -> f64 {
        self.rows.iter().map(|r| r.energy).sum()
    }
}

/// Min/max/mean over the finite values of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl ColumnStats {
    /// Statistics of the finite values, or `None` when there are none
    pub fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in values.filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
            count,
        })
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::SizeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain() -> TerrainTable {
        TerrainTable {
            cells: vec![
                TerrainCell { latitude: -26.0, longitude: -71.0, slope: 0.0, aspect: 0.0 },
                TerrainCell { latitude: -25.0, longitude: -71.0, slope: 10.0, aspect: 90.0 },
                TerrainCell { latitude: -26.0, longitude: -70.0, slope: 20.0, aspect: 180.0 },
                TerrainCell { latitude: -25.0, longitude: -70.0, slope: 30.0, aspect: 270.0 },
            ],
            shape: (2, 2),
            provenance: ElevationProvenance::Synthetic,
        }
    }

    #[test]
    fn test_representative_latitude() {
        assert_eq!(terrain().representative_latitude(), Some(-25.5));
    }

    #[test]
    fn test_enrich_keeps_order_and_metadata() {
        let table = terrain()
            .enrich(&[1.0, 2.0, 3.0, 4.0], &[0.1, 0.2, 0.3, 0.4], 2)
            .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.slopes(), vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(table.irradiances(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(table.provenance, ElevationProvenance::Synthetic);
        assert_eq!(table.repaired_points, 2);
        assert_eq!(table.representative_latitude, -25.5);
        assert!((table.total_energy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_enrich_rejects_misaligned_columns() {
        let result = terrain().enrich(&[1.0, 2.0], &[0.1, 0.2, 0.3, 0.4], 0);
        assert!(matches!(result, Err(Error::SizeMismatch { what: "irradiance", .. })));
    }

    #[test]
    fn test_column_lookup_by_name() {
        let table = terrain()
            .enrich(&[1.0; 4], &[5.0, 6.0, 7.0, 8.0], 0)
            .unwrap();
        for name in EnergyTable::COLUMNS {
            assert_eq!(table.column(name).map(|c| c.len()), Some(4), "column {name}");
        }
        assert!(table.column("Energy Production (W)").is_none());

        let stats = table.column_stats("energy").unwrap();
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 8.0);
        assert_eq!(stats.mean, 6.5);
    }

    #[test]
    fn test_column_stats_skips_non_finite() {
        let stats = ColumnStats::of([1.0, f64::NAN, 3.0].into_iter()).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
        assert!(ColumnStats::of(std::iter::empty()).is_none());
    }
}
