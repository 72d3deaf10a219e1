//! Plain comma-separated tables.
//!
//! Irradiance datasets are read by header name (`latitude`, `longitude`,
//! `irradiance`; any order, extra columns ignored). Result tables are written
//! with a fixed header and one row per lattice point, in lattice order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::{EnergyTable, IrradianceSample, TerrainTable};

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const IRRADIANCE: &str = "irradiance";

/// Read an irradiance dataset from a CSV file
pub fn read_irradiance_csv<P: AsRef<Path>>(path: P) -> Result<Vec<IrradianceSample>> {
    let file = File::open(path.as_ref())?;
    let samples = parse_irradiance_csv(BufReader::new(file))?;
    tracing::debug!(
        "read {} irradiance samples from {}",
        samples.len(),
        path.as_ref().display()
    );
    Ok(samples)
}

/// Parse an irradiance dataset from any buffered reader.
///
/// Blank lines are skipped. Line numbers in errors are 1-based and count the
/// header.
pub fn parse_irradiance_csv<R: BufRead>(reader: R) -> Result<Vec<IrradianceSample>> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => {
                return Err(Error::Parse {
                    line: 1,
                    reason: "missing header".into(),
                })
            }
        }
    };

    let names: Vec<String> = split_fields(&header)
        .map(|s| s.trim_matches('"').to_ascii_lowercase())
        .collect();
    let column = |wanted: &str| {
        names
            .iter()
            .position(|n| n == wanted)
            .ok_or_else(|| Error::Parse {
                line: 1,
                reason: format!("header has no '{wanted}' column"),
            })
    };
    let lat_col = column(LATITUDE)?;
    let lon_col = column(LONGITUDE)?;
    let irr_col = column(IRRADIANCE)?;

    let mut samples = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = split_fields(&line).collect();
        let field = |col: usize, name: &str| -> Result<f64> {
            let raw = fields.get(col).ok_or_else(|| Error::Parse {
                line: line_no,
                reason: format!("missing '{name}' field"),
            })?;
            raw.trim_matches('"').parse::<f64>().map_err(|e| Error::Parse {
                line: line_no,
                reason: format!("'{name}' value {raw:?}: {e}"),
            })
        };

        samples.push(IrradianceSample::new(
            field(lat_col, LATITUDE)?,
            field(lon_col, LONGITUDE)?,
            field(irr_col, IRRADIANCE)?,
        ));
    }

    Ok(samples)
}

/// Write an energy table to a CSV file
pub fn write_energy_csv<P: AsRef<Path>>(table: &EnergyTable, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_energy_csv_to(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write an energy table as CSV to any writer
pub fn write_energy_csv_to<W: Write>(table: &EnergyTable, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", EnergyTable::COLUMNS.join(","))?;
    for row in &table.rows {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            row.latitude, row.longitude, row.slope, row.aspect, row.irradiance, row.energy
        )?;
    }
    Ok(())
}

/// Write a terrain table to a CSV file
pub fn write_terrain_csv<P: AsRef<Path>>(table: &TerrainTable, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_terrain_csv_to(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a terrain table as CSV to any writer
pub fn write_terrain_csv_to<W: Write>(table: &TerrainTable, writer: &mut W) -> Result<()> {
    writeln!(writer, "latitude,longitude,slope,aspect")?;
    for cell in &table.cells {
        writeln!(
            writer,
            "{},{},{},{}",
            cell.latitude, cell.longitude, cell.slope, cell.aspect
        )?;
    }
    Ok(())
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}
