//! Terrain elevation via the Open-Elevation batch API.

use crate::progress;
use anyhow::Result;
use geo::geometry::Coord;
use radarloc::{round_dp, TerrainGrid};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tangent::Projection;

const OPEN_ELEVATION_URL: &str = "https://api.open-elevation.com/api/v1/lookup";
const BATCH_SIZE: usize = 100;

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    locations: &'a [GridLocation],
}

#[derive(Debug, Serialize)]
struct GridLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    #[serde(default)]
    elevation: f64,
}

/// Queries a `grid_size` x `grid_size` elevation lattice spanning
/// `2 * range_m` on each side of `center`.
///
/// Cells in failed batches are left at sea level rather than failing
/// the whole scene; negative (sub-sea) readings clamp to zero.
///
/// A zero `grid_size` has no finite cell size and is rejected before
/// any lookup so the caller can fall back to a terrain-free scene.
pub fn elevation_grid(center: Coord, range_m: f64, grid_size: usize) -> Result<TerrainGrid> {
    anyhow::ensure!(grid_size > 0, "terrain grid size must be positive");
    let projection = Projection::new(center);
    let locations = grid_lattice(&projection, range_m, grid_size);

    let client = reqwest::blocking::Client::new();
    let batches = locations.chunks(BATCH_SIZE);
    let bar = progress::batch_bar(format!("elevation {grid_size}x{grid_size}"), batches.len());

    let mut flat = vec![0.0; locations.len()];
    for (batch, chunk) in batches.enumerate() {
        match fetch_batch(&client, chunk) {
            Ok(elevations) => {
                let offset = batch * BATCH_SIZE;
                for (index, elevation) in elevations.into_iter().enumerate() {
                    if let Some(cell) = flat.get_mut(offset + index) {
                        *cell = elevation;
                    }
                }
            }
            Err(err) => bar.println(format!("warning: elevation batch {batch} failed: {err}")),
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(build_grid(&flat, range_m, grid_size))
}

fn fetch_batch(client: &reqwest::blocking::Client, chunk: &[Coord]) -> Result<Vec<f64>> {
    let locations: Vec<GridLocation> = chunk
        .iter()
        .map(|point| GridLocation {
            latitude: point.y,
            longitude: point.x,
        })
        .collect();
    let response: LookupResponse = client
        .post(OPEN_ELEVATION_URL)
        .timeout(Duration::from_secs(30))
        .json(&LookupRequest {
            locations: &locations,
        })
        .send()?
        .error_for_status()?
        .json()?;
    Ok(response.results.into_iter().map(|r| r.elevation).collect())
}

/// Geographic sample points in row-major order, south to north. The
/// lattice origin is the grid's southwest corner, `range_m` south and
/// west of the scene center.
fn grid_lattice(projection: &Projection, range_m: f64, grid_size: usize) -> Vec<Coord> {
    let cell_size = 2.0 * range_m / grid_size as f64;
    let mut locations = Vec::with_capacity(grid_size * grid_size);
    for row in 0..grid_size {
        for col in 0..grid_size {
            let plane = Coord {
                x: -range_m + col as f64 * cell_size,
                y: -range_m + row as f64 * cell_size,
            };
            locations.push(projection.to_geo(plane));
        }
    }
    locations
}

/// Shapes flat row-major readings into the output grid, clamping to
/// sea level and rounding to a decimeter.
fn build_grid(flat: &[f64], range_m: f64, grid_size: usize) -> TerrainGrid {
    let cell_size = 2.0 * range_m / grid_size as f64;
    let elevations = (0..grid_size)
        .map(|row| {
            (0..grid_size)
                .map(|col| round_dp(flat[row * grid_size + col].max(0.0), 1))
                .collect()
        })
        .collect();
    TerrainGrid {
        origin_x: round_dp(-range_m, 1),
        origin_y: round_dp(-range_m, 1),
        rows: grid_size,
        cols: grid_size,
        cell_size: round_dp(cell_size, 1),
        elevations,
        data_source: "open-elevation".to_string(),
    }
}
