//! Post-hoc quality checks over a built document.

use crate::document::{Document, Feature};
use geo::geometry::Coord;
use tangent::polygon_area;

/// Scene quality counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneStats {
    pub features: usize,
    pub closed: usize,
    pub open: usize,
    pub total_vertices: usize,
    pub largest_polygon_km2: f64,
}

/// Validation outcome. Warnings are advisory unless `valid` is
/// false; callers decide whether to proceed either way.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub stats: SceneStats,
}

/// Checks a built document and computes quality statistics. Pure:
/// the same document always yields the same report.
///
/// A document with no coastlines at all is invalid and reported
/// without further statistics. An out-of-range center also makes the
/// document invalid. Everything else (no closed polygons, sparse
/// vertices, unusual radar range) only warns.
pub fn validate(doc: &Document) -> ValidationReport {
    if doc.coastlines.is_empty() {
        return ValidationReport {
            valid: false,
            warnings: vec!["No coastlines found".to_string()],
            stats: SceneStats::default(),
        };
    }

    let closed = doc.coastlines.iter().filter(|f| f.closed).count();
    let stats = SceneStats {
        features: doc.coastlines.len(),
        closed,
        open: doc.coastlines.len() - closed,
        total_vertices: doc.coastlines.iter().map(|f| f.points.len()).sum(),
        largest_polygon_km2: largest_polygon_km2(&doc.coastlines),
    };

    let mut valid = true;
    let mut warnings = Vec::new();
    if stats.closed == 0 {
        warnings.push("no closed polygons - terrain may not generate correctly".to_string());
    }
    if stats.total_vertices < 100 {
        warnings.push(format!(
            "only {} coastline vertices total",
            stats.total_vertices
        ));
    }

    let metadata = &doc.metadata;
    if !(-90.0..=90.0).contains(&metadata.center_lat) {
        valid = false;
        warnings.push(format!(
            "center latitude {} outside [-90, 90]",
            metadata.center_lat
        ));
    }
    if !(-180.0..=180.0).contains(&metadata.center_lon) {
        valid = false;
        warnings.push(format!(
            "center longitude {} outside [-180, 180]",
            metadata.center_lon
        ));
    }
    if metadata.range_nm <= 0.0 || metadata.range_nm > 50.0 {
        warnings.push(format!("unusual radar range: {} nm", metadata.range_nm));
    }

    ValidationReport {
        valid,
        warnings,
        stats,
    }
}

fn largest_polygon_km2(features: &[Feature]) -> f64 {
    features
        .iter()
        .filter(|feature| feature.closed && feature.points.len() >= 3)
        .map(|feature| {
            let points: Vec<Coord> = feature.points.iter().copied().map(Coord::from).collect();
            polygon_area(&points) / 1e6
        })
        .fold(0.0, f64::max)
}
