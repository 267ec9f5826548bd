use crate::{
    elevation,
    geocode::Geocoder,
    options::{Generate, LatLon},
    overpass,
};
use anyhow::Result;
use geo::geometry::Coord;
use radarloc::{extract_features, validate, Document, DEFAULT_SIMPLIFY_EPSILON_M};
use std::path::PathBuf;
use tangent::nm_to_meters;

impl Generate {
    pub fn run(&self) -> Result<()> {
        let (center, location_name) = self.resolve_location()?;
        let range_m = nm_to_meters(self.range);

        println!("Querying water features (radius {range_m:.0}m)...");
        let coastlines = match overpass::water_features(center, range_m) {
            Ok(result) => extract_features(&result, center, range_m, DEFAULT_SIMPLIFY_EPSILON_M),
            Err(err) => {
                eprintln!("warning: OSM query failed: {err}");
                Vec::new()
            }
        };
        println!("Found {} coastline/water features", coastlines.len());

        let terrain = if self.terrain {
            let size = self.terrain_grid;
            println!("Querying elevation data ({size}x{size} grid)...");
            match elevation::elevation_grid(center, range_m, size) {
                Ok(grid) => Some(grid),
                Err(err) => {
                    eprintln!("warning: elevation query failed: {err}");
                    None
                }
            }
        } else {
            None
        };

        let doc = Document::new(&location_name, center, self.range, coastlines, terrain);
        let report = validate(&doc);
        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.location));
        doc.save(&output)?;
        println!("Saved: {}", output.display());
        println!(
            "  Coastlines: {} features, {} points",
            report.stats.features, report.stats.total_vertices
        );
        if report.stats.largest_polygon_km2 > 0.0 {
            println!(
                "  Largest polygon: {:.1} km²",
                report.stats.largest_polygon_km2
            );
        }
        if let Some(grid) = &doc.terrain.grid {
            println!(
                "  Terrain: {}x{} grid, cell size {:.1}m",
                grid.rows, grid.cols, grid.cell_size
            );
        }
        Ok(())
    }

    /// A literal "lat,lon" argument skips geocoding entirely.
    fn resolve_location(&self) -> Result<(Coord, String)> {
        if let Ok(LatLon(center)) = self.location.parse::<LatLon>() {
            println!("Using coordinates: {}, {}", center.y, center.x);
            return Ok((center, format!("{:.4}, {:.4}", center.y, center.x)));
        }
        println!("Geocoding '{}'...", self.location);
        let place = Geocoder::new()?.geocode(&self.location)?;
        println!(
            "Found: {} ({:.4}, {:.4})",
            place.display_name, place.point.y, place.point.x
        );
        Ok((place.point, place.display_name))
    }
}

/// Output name derived from the location up to its first comma,
/// lowercased, everything outside word characters replaced.
fn default_output(location: &str) -> PathBuf {
    let stem: String = location
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    PathBuf::from(format!("{stem}.radarloc"))
}
