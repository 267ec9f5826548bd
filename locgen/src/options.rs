use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser};
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Generate .radarloc radar scenes from real-world locations.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub enum Cli {
    /// Build a .radarloc scene file for a location.
    Generate(Generate),

    /// Find a water body's coordinates by name.
    Lookup(Lookup),
}

#[derive(Debug, Clone, Args)]
pub struct Generate {
    /// Location name (e.g. "Lake Murray, SC") or literal "lat,lon"
    /// coordinates.
    pub location: String,

    /// Radar range in nautical miles.
    #[arg(long, default_value_t = 6.0)]
    pub range: f64,

    /// Include an elevation grid (slower, many network calls).
    #[arg(long)]
    pub terrain: bool,

    /// Elevation grid size, cells per side.
    #[arg(long, default_value_t = 128)]
    pub terrain_grid: usize,

    /// Output path (default: derived from the location name).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct Lookup {
    /// Water body name, e.g. "Lake Murray".
    #[arg(required = true)]
    pub name: Vec<String>,
}

/// A literal "lat,lon" pair.
#[derive(Clone, Debug, Copy)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}
