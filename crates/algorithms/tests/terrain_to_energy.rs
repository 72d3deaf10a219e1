//! Integration tests chaining the algorithm stages over a real lattice:
//! lattice DEM -> slope/aspect -> interpolated irradiance -> energy.

use approx::assert_relative_eq;
use terrasun_algorithms::energy::{
    energy_production_grid, optimal_orientation, EnergyParams, IrradianceValues,
};
use terrasun_algorithms::interpolation::interpolate_irradiance;
use terrasun_algorithms::terrain::{analyze_terrain, TerrainParams};
use terrasun_core::{BoundingBox, IrradianceSample, Lattice, Raster};

/// Atacama test area used throughout: 1° x 1°, 30 m resolution (100 x 100)
fn atacama() -> Lattice {
    let bbox = BoundingBox::new(-26.0, -25.0, -71.0, -70.0, 30.0).unwrap();
    Lattice::from_bbox(&bbox)
}

/// DEM computed from a function of (latitude, longitude)
fn dem_from<F: Fn(f64, f64) -> f64>(lattice: &Lattice, f: F) -> Raster<f64> {
    let values: Vec<f64> = lattice.points().map(|(lat, lon)| f(lat, lon)).collect();
    lattice.raster_from_flat(values).unwrap()
}

#[test]
fn lattice_is_capped() {
    let lattice = atacama();
    assert_eq!(lattice.shape(), (100, 100));
    assert_eq!(lattice.len(), 10_000);
}

#[test]
fn north_facing_plane_southern_hemisphere() {
    let lattice = atacama();
    // Ground falls 2000 m towards the north across the box
    let dem = dem_from(&lattice, |lat, _| 3000.0 - 2000.0 * (lat + 26.0));
    let params = TerrainParams::new(lattice.spacing());

    let surface = analyze_terrain(&dem, &params).unwrap();

    let expected_slope = (2000.0 / 111_000.0_f64).atan().to_degrees();
    for (s, a) in surface.slope.to_flat().iter().zip(surface.aspect.to_flat()) {
        assert_relative_eq!(*s, expected_slope, epsilon = 1e-9);
        assert_relative_eq!(a, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn east_facing_plane() {
    let lattice = atacama();
    let dem = dem_from(&lattice, |_, lon| 1000.0 - 500.0 * (lon + 71.0));
    let params = TerrainParams::new(lattice.spacing());

    let surface = analyze_terrain(&dem, &params).unwrap();
    for a in surface.aspect.to_flat() {
        assert_relative_eq!(a, 90.0, epsilon = 1e-9);
    }
}

#[test]
fn equator_facing_slopes_produce_more() {
    let lattice = atacama();
    let params = TerrainParams::new(lattice.spacing());
    let latitude = (lattice.bbox().min_lat() + lattice.bbox().max_lat()) / 2.0;
    assert_eq!(optimal_orientation(latitude).1, 0.0);

    let energy_of = |dem: Raster<f64>| {
        let surface = analyze_terrain(&dem, &params).unwrap();
        let e = energy_production_grid(
            &surface.slope.to_flat(),
            &surface.aspect.to_flat(),
            IrradianceValues::Scalar(1000.0),
            latitude,
            &EnergyParams::default(),
        )
        .unwrap();
        e.iter().sum::<f64>() / e.len() as f64
    };

    // Steep enough for the aspect weight to matter
    let facing_north = energy_of(dem_from(&lattice, |lat, _| -40_000.0 * lat));
    let facing_south = energy_of(dem_from(&lattice, |lat, _| 40_000.0 * lat));
    assert!(facing_north > facing_south, "{facing_north} <= {facing_south}");
}

#[test]
fn interpolated_irradiance_covers_every_point() {
    let lattice = atacama();

    // Sparse stations, some outside the box, most of the box outside their hull
    let samples = vec![
        IrradianceSample::new(-25.8, -70.8, 950.0),
        IrradianceSample::new(-25.2, -70.7, 980.0),
        IrradianceSample::new(-25.5, -70.2, 1010.0),
        IrradianceSample::new(-26.3, -70.1, 990.0),
        IrradianceSample::new(-25.4, -70.5, 1000.0),
    ];
    let targets: Vec<(f64, f64)> = lattice.points().collect();
    let result = interpolate_irradiance(&samples, &targets).unwrap();

    assert_eq!(result.values.len(), lattice.len());
    assert!(result.values.iter().all(|v| v.is_finite()));
    assert!(result.repaired > 0 && result.repaired < lattice.len());
    // No interpolated value leaves the sample range by much
    assert!(result.values.iter().all(|&v| v > 850.0 && v < 1110.0));
}
