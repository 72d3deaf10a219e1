//! CSV input and output for irradiance samples and result tables

mod csv;

pub use csv::{
    parse_irradiance_csv, read_irradiance_csv, write_energy_csv, write_energy_csv_to,
    write_terrain_csv, write_terrain_csv_to,
};
