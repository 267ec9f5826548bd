//! Overpass API queries for water geometry.

use anyhow::Result;
use geo::geometry::Coord;
use radarloc::QueryResult;
use std::time::Duration;

const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Well under the server-side `timeout:60`, with headroom for the
/// response body of a dense coastline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Fetches coastlines, lakes, reservoirs, and riverbanks within
/// `radius_m` of `center`. Multipolygon members and their nodes come
/// back through the recursion step of the query.
pub fn water_features(center: Coord, radius_m: f64) -> Result<QueryResult> {
    run_query(&features_query(center, radius_m))
}

/// Fetches named water bodies matching `name`, case-insensitively,
/// anywhere in the world.
pub fn named_water_bodies(name: &str) -> Result<QueryResult> {
    run_query(&name_query(name))
}

fn run_query(query: &str) -> Result<QueryResult> {
    log::debug!("overpass query: {query}");
    let client = reqwest::blocking::Client::new();
    let result = client
        .post(OVERPASS_URL)
        .timeout(REQUEST_TIMEOUT)
        .form(&[("data", query)])
        .send()?
        .error_for_status()?
        .json()?;
    Ok(result)
}

fn features_query(center: Coord, radius_m: f64) -> String {
    let Coord { x: lon, y: lat } = center;
    format!(
        "[out:json][timeout:60];\n\
         (\n\
           way[\"natural\"=\"coastline\"](around:{radius_m},{lat},{lon});\n\
           way[\"natural\"=\"water\"](around:{radius_m},{lat},{lon});\n\
           relation[\"natural\"=\"water\"](around:{radius_m},{lat},{lon});\n\
           way[\"waterway\"=\"riverbank\"](around:{radius_m},{lat},{lon});\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;"
    )
}

fn name_query(name: &str) -> String {
    // The name lands inside a quoted Overpass regex; strip characters
    // that would terminate or escape it.
    let needle: String = name
        .chars()
        .filter(|c| *c != '"' && *c != '\\')
        .collect();
    format!(
        "[out:json][timeout:60];\n\
         (\n\
           way[\"natural\"=\"water\"][\"name\"~\"{needle}\",i];\n\
           relation[\"natural\"=\"water\"][\"name\"~\"{needle}\",i];\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;"
    )
}
