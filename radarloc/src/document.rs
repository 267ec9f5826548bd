//! The `.radarloc` scene document.
//!
//! Field order below is part of the on-disk format; serialization
//! writes struct fields in declaration order.

use crate::error::RadarlocError;
use chrono::Utc;
use geo::geometry::Coord;
use serde::{Deserialize, Serialize};
use std::{fs, io::Read, path::Path};

pub const FORMAT_VERSION: &str = "1.0";

/// A complete radar scene, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: String,
    pub metadata: Metadata,
    pub coordinate_system: CoordinateSystem,
    pub coastlines: Vec<Feature>,
    pub terrain: Terrain,

    /// Reserved for downstream consumers, always written empty.
    pub vessels: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub location_name: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub range_nm: f64,
    pub generated_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    #[serde(rename = "type")]
    pub kind: String,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub units: String,
}

/// A named shoreline or water-body outline in plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub points: Vec<PlanePoint>,
    pub closed: bool,
}

/// Meters east (`x`) and north (`y`) of the scene origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl From<PlanePoint> for Coord {
    fn from(point: PlanePoint) -> Self {
        Coord {
            x: point.x,
            y: point.y,
        }
    }
}

/// Terrain section. The optional fields are present together exactly
/// when `enabled` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridDims>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevations: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDims {
    pub origin_x: f64,
    pub origin_y: f64,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f64,
}

/// Elevation grid as handed over by an elevation source: row-major,
/// `origin_x`/`origin_y` at the grid's southwest corner relative to
/// the scene origin, non-negative heights in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    pub origin_x: f64,
    pub origin_y: f64,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f64,
    pub elevations: Vec<Vec<f64>>,
    pub data_source: String,
}

impl Document {
    /// Assembles a scene document. Pure packaging, no geometry.
    pub fn new(
        location_name: &str,
        center: Coord,
        range_nm: f64,
        coastlines: Vec<Feature>,
        terrain: Option<TerrainGrid>,
    ) -> Self {
        let center_lat = round_dp(center.y, 6);
        let center_lon = round_dp(center.x, 6);
        Self {
            version: FORMAT_VERSION.to_string(),
            metadata: Metadata {
                location_name: location_name.to_string(),
                center_lat,
                center_lon,
                range_nm,
                generated_timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            },
            coordinate_system: CoordinateSystem {
                kind: "local_tangent_plane".to_string(),
                origin_lat: center_lat,
                origin_lon: center_lon,
                units: "meters".to_string(),
            },
            coastlines,
            terrain: terrain.map_or(
                Terrain {
                    enabled: false,
                    grid: None,
                    elevations: None,
                    data_source: None,
                },
                |grid| Terrain {
                    enabled: true,
                    grid: Some(GridDims {
                        origin_x: grid.origin_x,
                        origin_y: grid.origin_y,
                        rows: grid.rows,
                        cols: grid.cols,
                        cell_size: grid.cell_size,
                    }),
                    elevations: Some(grid.elevations),
                    data_source: Some(grid.data_source),
                },
            ),
            vessels: Vec::new(),
        }
    }

    /// Writes the document as 2-space-indented JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RadarlocError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a previously saved document.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, RadarlocError> {
        Ok(serde_json::from_reader(rdr)?)
    }
}

/// Rounds to `places` decimal digits, half away from zero. The
/// format stores lat/lon at 6 places and plane values at 1.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
