//! Panel production from slope, aspect, latitude and irradiance
//!
//! A panel lying on the terrain receives the full irradiance when its tilt
//! equals the site latitude and it faces the equator. Deviations reduce the
//! output through two multiplicative factors:
//!
//! ```text
//! slope_factor  = cos(|slope - |lat|| * 0.8)
//! aspect_factor = (1 - w) + w * (0.8 * direct + 0.2)
//! energy        = irradiance * slope_factor * aspect_factor * efficiency * area
//! ```
//!
//! where `direct` falls off with the angle between the aspect and the
//! equator-facing bearing and `w` fades the aspect penalty in with slope
//! (orientation does not matter on flat ground).

use terrasun_core::{Error, Result};

/// How strongly aspect counts as a function of slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectWeighting {
    /// `tanh(slope / 15)`: smooth, near full weight above ~40°
    #[default]
    Tanh,
    /// `min(slope / 5, 1)`: full weight from 5° upward
    Linear,
}

impl AspectWeighting {
    /// Weight in `[0, 1]` for a slope in degrees
    pub fn weight(self, slope: f64) -> f64 {
        match self {
            AspectWeighting::Tanh => (slope / 15.0).tanh(),
            AspectWeighting::Linear => (slope / 5.0).min(1.0),
        }
    }
}

/// Panel parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyParams {
    /// Fraction of irradiance converted to electricity, in (0, 1] (default 0.2)
    pub panel_efficiency: f64,
    /// Panel area in m² (default 1.0)
    pub panel_area: f64,
    /// Aspect weighting formula (default: Tanh)
    pub weighting: AspectWeighting,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            panel_efficiency: 0.2,
            panel_area: 1.0,
            weighting: AspectWeighting::Tanh,
        }
    }
}

impl EnergyParams {
    /// Check efficiency is in (0, 1] and area is positive, both finite
    pub fn validate(&self) -> Result<()> {
        let e = self.panel_efficiency;
        if !(e.is_finite() && e > 0.0 && e <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "panel_efficiency",
                value: e.to_string(),
                reason: "must be in (0, 1]".into(),
            });
        }
        let a = self.panel_area;
        if !(a.is_finite() && a > 0.0) {
            return Err(Error::InvalidParameter {
                name: "panel_area",
                value: a.to_string(),
                reason: "must be a positive number of m²".into(),
            });
        }
        Ok(())
    }
}

/// Irradiance for a batch: one value for every point, or one per point
#[derive(Debug, Clone, Copy)]
pub enum IrradianceValues<'a> {
    Scalar(f64),
    PerPoint(&'a [f64]),
}

impl IrradianceValues<'_> {
    fn at(&self, i: usize) -> f64 {
        match self {
            IrradianceValues::Scalar(v) => *v,
            IrradianceValues::PerPoint(values) => values[i],
        }
    }
}

/// Optimal `(slope, aspect)` in degrees for a site latitude.
///
/// Tilt equals the absolute latitude. Northern sites face south (180),
/// southern sites and the equator face north (0).
pub fn optimal_orientation(latitude: f64) -> (f64, f64) {
    let aspect = if latitude > 0.0 { 180.0 } else { 0.0 };
    (latitude.abs(), aspect)
}

/// Shortest angular distance between two bearings, in `[0, 180]`
pub fn aspect_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Direct-beam factor for an aspect difference in degrees, never below 0.1
pub fn direct_factor(aspect_diff: f64) -> f64 {
    let f = if aspect_diff <= 90.0 {
        aspect_diff.to_radians().cos()
    } else {
        90f64.to_radians().cos() * (1.0 - (aspect_diff - 90.0) / 90.0) * 0.5
    };
    f.max(0.1)
}

/// Tilt penalty relative to the optimal slope
pub fn slope_factor(slope: f64, optimal_slope: f64) -> f64 {
    ((slope - optimal_slope).abs() * 0.8).to_radians().cos()
}

/// Orientation penalty, faded in by slope
pub fn aspect_factor(
    slope: f64,
    aspect: f64,
    optimal_aspect: f64,
    weighting: AspectWeighting,
) -> f64 {
    let base = 0.8 * direct_factor(aspect_difference(aspect, optimal_aspect)) + 0.2;
    let w = weighting.weight(slope);
    (1.0 - w) + w * base
}

/// Energy output in W of one panel on terrain with the given slope and aspect
pub fn energy_production(
    slope: f64,
    aspect: f64,
    irradiance: f64,
    latitude: f64,
    params: &EnergyParams,
) -> f64 {
    let (optimal_slope, optimal_aspect) = optimal_orientation(latitude);
    irradiance
        * slope_factor(slope, optimal_slope)
        * aspect_factor(slope, aspect, optimal_aspect, params.weighting)
        * params.panel_efficiency
        * params.panel_area
}

/// Energy output for aligned slope and aspect columns.
///
/// `latitude` is the single site latitude used for the optimal orientation.
///
/// # Errors
///
/// * [`Error::SizeMismatch`] when the columns differ in length
/// * [`Error::InvalidParameter`] when `params` fail validation
pub fn energy_production_grid(
    slopes: &[f64],
    aspects: &[f64],
    irradiance: IrradianceValues<'_>,
    latitude: f64,
    params: &EnergyParams,
) -> Result<Vec<f64>> {
    params.validate()?;
    if aspects.len() != slopes.len() {
        return Err(Error::SizeMismatch {
            what: "aspects",
            expected: slopes.len(),
            actual: aspects.len(),
        });
    }
    if let IrradianceValues::PerPoint(values) = irradiance {
        if values.len() != slopes.len() {
            return Err(Error::SizeMismatch {
                what: "irradiance",
                expected: slopes.len(),
                actual: values.len(),
            });
        }
    }

    Ok(slopes
        .iter()
        .zip(aspects)
        .enumerate()
        .map(|(i, (&s, &a))| energy_production(s, a, irradiance.at(i), latitude, params))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_optimal_orientation_by_hemisphere() {
        assert_eq!(optimal_orientation(-45.0), (45.0, 0.0));
        assert_eq!(optimal_orientation(45.0), (45.0, 180.0));
        assert_eq!(optimal_orientation(0.0), (0.0, 0.0));
    }

    #[test]
    fn test_optimal_orientation_gives_unit_factors() {
        for lat in [-60.0, -25.5, 10.0, 45.0] {
            let (s, a) = optimal_orientation(lat);
            assert_relative_eq!(slope_factor(s, s), 1.0);
            for weighting in [AspectWeighting::Tanh, AspectWeighting::Linear] {
                assert_relative_eq!(aspect_factor(s, a, a, weighting), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_aspect_difference_circular() {
        assert_eq!(aspect_difference(0.0, 350.0), 10.0);
        assert_eq!(aspect_difference(350.0, 0.0), 10.0);
        assert_eq!(aspect_difference(90.0, 270.0), 180.0);
        assert_eq!(aspect_difference(180.0, 180.0), 0.0);
        assert_eq!(aspect_difference(10.0, 720.0 + 20.0), 10.0);
        for a in (0..360).step_by(7) {
            for b in (0..360).step_by(11) {
                let d = aspect_difference(a as f64, b as f64);
                assert_eq!(d, aspect_difference(b as f64, a as f64));
                assert!((0.0..=180.0).contains(&d));
            }
        }
    }

    #[test]
    fn test_direct_factor_floor() {
        let mut d = 0.0;
        while d <= 180.0 {
            assert!(direct_factor(d) >= 0.1, "direct_factor({d})");
            d += 0.5;
        }
        assert_relative_eq!(direct_factor(0.0), 1.0);
        assert_relative_eq!(direct_factor(60.0), 0.5, epsilon = 1e-12);
        assert_eq!(direct_factor(135.0), 0.1);
    }

    #[test]
    fn test_flat_terrain_ignores_aspect() {
        for weighting in [AspectWeighting::Tanh, AspectWeighting::Linear] {
            for aspect in [0.0, 90.0, 180.0, 270.0] {
                assert_relative_eq!(aspect_factor(0.0, aspect, 0.0, weighting), 1.0);
            }
        }
    }

    #[test]
    fn test_weighting_formulas() {
        assert_relative_eq!(AspectWeighting::Tanh.weight(15.0), 1f64.tanh());
        assert_relative_eq!(AspectWeighting::Linear.weight(2.5), 0.5);
        assert_eq!(AspectWeighting::Linear.weight(30.0), 1.0);
        assert_eq!(AspectWeighting::default(), AspectWeighting::Tanh);
    }

    #[test]
    fn test_energy_known_value() {
        // Southern site, panel tilted 30° facing due east
        let params = EnergyParams::default();
        let e = energy_production(30.0, 90.0, 1000.0, -30.0, &params);

        let w = 2f64.tanh();
        let base = 0.8 * 90f64.to_radians().cos().max(0.1) + 0.2;
        let expected = 1000.0 * ((1.0 - w) + w * base) * 0.2;
        assert_relative_eq!(e, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_energy_non_negative() {
        let params = EnergyParams::default();
        for lat in [-70.0, -25.0, 0.0, 40.0] {
            for s in (0..=90).step_by(5) {
                for a in (0..360).step_by(15) {
                    let e = energy_production(s as f64, a as f64, 800.0, lat, &params);
                    assert!(e >= 0.0, "lat {lat} slope {s} aspect {a}: {e}");
                }
            }
        }
    }

    #[test]
    fn test_grid_scalar_and_per_point_agree() {
        let slopes = [0.0, 10.0, 25.0, 40.0];
        let aspects = [0.0, 90.0, 180.0, 300.0];
        let params = EnergyParams::default();

        let scalar =
            energy_production_grid(&slopes, &aspects, IrradianceValues::Scalar(900.0), -25.0, &params)
                .unwrap();
        let per_point = energy_production_grid(
            &slopes,
            &aspects,
            IrradianceValues::PerPoint(&[900.0; 4]),
            -25.0,
            &params,
        )
        .unwrap();
        assert_eq!(scalar, per_point);
        assert_relative_eq!(
            scalar[2],
            energy_production(25.0, 180.0, 900.0, -25.0, &params)
        );
    }

    #[test]
    fn test_grid_size_mismatch() {
        let params = EnergyParams::default();
        let r = energy_production_grid(&[1.0, 2.0], &[0.0], IrradianceValues::Scalar(1.0), 0.0, &params);
        assert!(matches!(r, Err(Error::SizeMismatch { what: "aspects", .. })));

        let r = energy_production_grid(
            &[1.0, 2.0],
            &[0.0, 0.0],
            IrradianceValues::PerPoint(&[1.0]),
            0.0,
            &params,
        );
        assert!(matches!(r, Err(Error::SizeMismatch { what: "irradiance", .. })));
    }

    #[test]
    fn test_params_validation() {
        let bad = [
            EnergyParams { panel_efficiency: 0.0, ..Default::default() },
            EnergyParams { panel_efficiency: 1.5, ..Default::default() },
            EnergyParams { panel_area: -1.0, ..Default::default() },
            EnergyParams { panel_area: f64::NAN, ..Default::default() },
        ];
        for params in bad {
            assert!(matches!(params.validate(), Err(Error::InvalidParameter { .. })));
        }
        assert!(EnergyParams::default().validate().is_ok());
        assert!(EnergyParams { panel_efficiency: 1.0, ..Default::default() }.validate().is_ok());
    }
}
