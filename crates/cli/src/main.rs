//! TerraSun CLI - Solar energy potential from terrain

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use terrasun_algorithms::energy::{sensitivity_matrix, AspectWeighting, SensitivityParams};
use terrasun_cloud::{ElevationClientOptions, OpenElevationProvider, SyntheticElevation};
use terrasun_core::io::{read_irradiance_csv, write_energy_csv, write_terrain_csv};
use terrasun_core::{BoundingBox, EnergyTable, IrradianceSample, Lattice};
use terrasun_pipeline::stages::terrain_stage;
use terrasun_pipeline::{run_pipeline, ElevationLookup, IrradianceInput, PipelineParams};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "terrasun")]
#[command(author, version, about = "Solar energy potential from terrain", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate panel energy production over an area
    Estimate {
        #[command(flatten)]
        area: AreaArgs,
        #[command(flatten)]
        elevation: ElevationArgs,
        /// CSV of measured irradiance (latitude, longitude, irradiance)
        #[arg(short, long, conflicts_with = "uniform_irradiance")]
        irradiance: Option<PathBuf>,
        /// Same irradiance everywhere, W/m² [default: 1000]
        #[arg(long)]
        uniform_irradiance: Option<f64>,
        #[command(flatten)]
        panel: PanelArgs,
        /// Output CSV file
        output: PathBuf,
    },
    /// Slope and aspect per lattice point
    Terrain {
        #[command(flatten)]
        area: AreaArgs,
        #[command(flatten)]
        elevation: ElevationArgs,
        /// Output CSV file
        output: PathBuf,
    },
    /// Energy over a slope × aspect grid at one latitude
    Sensitivity {
        /// Site latitude in degrees
        #[arg(long, default_value = "-45", allow_hyphen_values = true)]
        latitude: f64,
        /// Irradiance in W/m²
        #[arg(long, default_value = "1000")]
        irradiance: f64,
        /// Number of slope steps from 0 to 45°
        #[arg(long, default_value = "10")]
        slope_steps: usize,
        /// Number of aspect steps from 0 to 359°
        #[arg(long, default_value = "36")]
        aspect_steps: usize,
        #[command(flatten)]
        panel: PanelArgs,
        /// Output CSV file (prints a summary only when omitted)
        output: Option<PathBuf>,
    },
}

/// Study area: a bounding box or a point with a radius
#[derive(Args)]
struct AreaArgs {
    /// Bounding box as min_lat,max_lat,min_lon,max_lon
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        required_unless_present = "center",
        conflicts_with = "center"
    )]
    bbox: Option<Vec<f64>>,
    /// Area center as lat,lon
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        requires = "radius_km"
    )]
    center: Option<Vec<f64>>,
    /// Half-width of the area around --center, km
    #[arg(long)]
    radius_km: Option<f64>,
    /// Lattice resolution in meters
    #[arg(short, long, default_value = "30")]
    resolution: f64,
}

#[derive(Args)]
struct ElevationArgs {
    /// Elevation lookup endpoint
    #[arg(long, default_value = terrasun_cloud::DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Lookup timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    /// Skip the lookup and use synthetic elevations
    #[arg(long)]
    offline: bool,
    /// Seed for the synthetic surface (with --offline)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct PanelArgs {
    /// Panel efficiency in (0, 1]
    #[arg(short, long, default_value = "0.2")]
    efficiency: f64,
    /// Panel area in m²
    #[arg(short, long, default_value = "1.0")]
    area: f64,
    /// How aspect is weighted against slope
    #[arg(short, long, value_enum, default_value = "tanh")]
    weighting: Weighting,
}

#[derive(Clone, Copy, ValueEnum)]
enum Weighting {
    Tanh,
    Linear,
}

impl From<Weighting> for AspectWeighting {
    fn from(w: Weighting) -> Self {
        match w {
            Weighting::Tanh => AspectWeighting::Tanh,
            Weighting::Linear => AspectWeighting::Linear,
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn done(name: &str, path: &Path, elapsed: Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_area(area: &AreaArgs) -> Result<BoundingBox> {
    let bbox = match (area.bbox.as_deref(), area.center.as_deref(), area.radius_km) {
        (Some(&[min_lat, max_lat, min_lon, max_lon]), _, _) => {
            BoundingBox::new(min_lat, max_lat, min_lon, max_lon, area.resolution)
        }
        (Some(b), _, _) => anyhow::bail!("--bbox takes 4 values, got {}", b.len()),
        (None, Some(&[lat, lon]), Some(radius)) => {
            BoundingBox::around(lat, lon, radius, area.resolution)
        }
        _ => anyhow::bail!("Give either --bbox or --center lat,lon with --radius-km"),
    };
    bbox.context("Invalid study area")
}

fn elevation_source(args: &ElevationArgs) -> Result<Box<dyn ElevationLookup>> {
    if args.offline {
        info!("Offline: using synthetic elevations");
        return Ok(match args.seed {
            Some(seed) => Box::new(SyntheticElevation::seeded(seed)),
            None => Box::new(SyntheticElevation::new()),
        });
    }
    let provider = OpenElevationProvider::new(ElevationClientOptions {
        endpoint: args.endpoint.clone(),
        request_timeout: Duration::from_secs(args.timeout),
    })
    .context("Failed to create elevation client")?;
    Ok(Box::new(provider))
}

fn pipeline_params(panel: &PanelArgs) -> PipelineParams {
    let mut params = PipelineParams::with_panel(Some(panel.efficiency), Some(panel.area));
    params.energy.weighting = panel.weighting.into();
    params
}

fn read_samples(path: &Path) -> Result<Vec<IrradianceSample>> {
    let pb = spinner("Reading irradiance samples...");
    let samples = read_irradiance_csv(path)
        .with_context(|| format!("Failed to read irradiance from {}", path.display()))?;
    pb.finish_and_clear();
    info!("Irradiance: {} samples", samples.len());
    Ok(samples)
}

fn print_summary(table: &EnergyTable) {
    println!("Points: {} ({} x {})", table.len(), table.shape.0, table.shape.1);
    println!("Elevations: {}", table.provenance);
    println!("Representative latitude: {:.4}", table.representative_latitude);
    if table.repaired_points > 0 {
        println!("Irradiance filled by nearest neighbour: {}", table.repaired_points);
    }
    for name in ["slope", "aspect", "irradiance", "energy"] {
        if let Some(stats) = table.column_stats(name) {
            println!(
                "  {:<10} min {:>10.3}  max {:>10.3}  mean {:>10.3}",
                name, stats.min, stats.max, stats.mean
            );
        }
    }
    println!("Total energy: {:.2} W", table.total_energy());
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Estimate ─────────────────────────────────────────────────
        Commands::Estimate {
            area,
            elevation,
            irradiance,
            uniform_irradiance,
            panel,
            output,
        } => {
            let bbox = parse_area(&area)?;
            let params = pipeline_params(&panel);
            params.energy.validate().context("Invalid panel parameters")?;
            let samples = irradiance.as_deref().map(read_samples).transpose()?;
            let input = match (&samples, uniform_irradiance) {
                (Some(samples), _) => IrradianceInput::Samples(samples),
                (None, Some(value)) => IrradianceInput::Uniform(value),
                (None, None) => IrradianceInput::peak(),
            };
            let source = elevation_source(&elevation)?;

            let start = Instant::now();
            let pb = spinner("Estimating energy...");
            let table = run_pipeline(&bbox, &input, source.as_ref(), &params)
                .context("Failed to estimate energy")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            write_energy_csv(&table, &output).context("Failed to write output")?;
            print_summary(&table);
            done("Energy", &output, elapsed);
        }

        // ── Terrain ──────────────────────────────────────────────────
        Commands::Terrain {
            area,
            elevation,
            output,
        } => {
            let bbox = parse_area(&area)?;
            let lattice = Lattice::from_bbox(&bbox);
            let source = elevation_source(&elevation)?;

            let start = Instant::now();
            let pb = spinner("Analyzing terrain...");
            let table = terrain_stage(&lattice, source.as_ref())
                .context("Failed to analyze terrain")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            write_terrain_csv(&table, &output).context("Failed to write output")?;
            println!("Points: {} ({} x {})", table.len(), table.shape.0, table.shape.1);
            println!("Elevations: {}", table.provenance);
            done("Terrain", &output, elapsed);
        }

        // ── Sensitivity ──────────────────────────────────────────────
        Commands::Sensitivity {
            latitude,
            irradiance,
            slope_steps,
            aspect_steps,
            panel,
            output,
        } => {
            let params = SensitivityParams {
                latitude,
                irradiance,
                slope_steps,
                aspect_steps,
                energy: pipeline_params(&panel).energy,
                ..Default::default()
            };
            let start = Instant::now();
            let matrix = sensitivity_matrix(&params).context("Failed to compute sensitivity")?;
            let elapsed = start.elapsed();

            if let Some((slope, aspect, energy)) = matrix.optimum() {
                println!(
                    "Best orientation at latitude {}: slope {:.1}°, aspect {:.1}° ({:.2} W)",
                    latitude, slope, aspect, energy
                );
            }
            for slope in [0.0, 15.0, 30.0, 45.0] {
                if let Some((s, curve)) = matrix.curve(slope) {
                    let worst = curve.iter().copied().fold(f64::INFINITY, f64::min);
                    println!("  slope {:>4.1}°: worst aspect keeps {:.1}%", s, worst);
                }
            }

            if let Some(output) = output {
                let file = std::fs::File::create(&output)
                    .with_context(|| format!("Failed to create {}", output.display()))?;
                let mut writer = std::io::BufWriter::new(file);
                writeln!(writer, "slope,aspect,energy,relative")?;
                for (ai, &a) in matrix.aspects.iter().enumerate() {
                    for (si, &s) in matrix.slopes.iter().enumerate() {
                        writeln!(
                            writer,
                            "{},{},{},{}",
                            s,
                            a,
                            matrix.energy[[ai, si]],
                            matrix.relative[[ai, si]]
                        )?;
                    }
                }
                writer.flush().context("Failed to write output")?;
                done("Sensitivity", &output, elapsed);
            }
        }
    }

    Ok(())
}
