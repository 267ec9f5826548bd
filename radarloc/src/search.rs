//! Water-body lookup: summarizes named features in a query result so
//! a caller can pick the right lake before generating a scene.

use crate::{
    elements::{Element, MemberKind, QueryResult},
    extract::{way_segment, DEFAULT_SIMPLIFY_EPSILON_M},
};
use geo::geometry::Coord;
use std::collections::{HashMap, HashSet};
use tangent::{assemble_rings, polygon_area, Projection, Segment};

/// A named water body found by a name search.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub area_km2: f64,
}

/// Summarizes the named water bodies in a query result: the centroid
/// of each body's outline and the area of its largest closed ring
/// (zero for open shorelines).
///
/// Relations consume their member ways like feature extraction does,
/// so a lake split across many ways yields one match, not dozens.
/// Ways and relations without a `name` tag are skipped; unnamed
/// member ways pulled in by recursion never surface as matches.
pub fn match_water_bodies(result: &QueryResult) -> Vec<WaterMatch> {
    let mut nodes = HashMap::new();
    let mut ways = HashMap::new();
    for element in &result.elements {
        match element {
            Element::Node(node) => {
                nodes.insert(
                    node.id,
                    Coord {
                        x: node.lon,
                        y: node.lat,
                    },
                );
            }
            Element::Way(way) => {
                ways.insert(way.id, way);
            }
            Element::Relation(_) => {}
        }
    }

    let mut matches = Vec::new();
    let mut consumed = HashSet::new();

    for element in &result.elements {
        let Element::Relation(relation) = element else {
            continue;
        };
        let mut member_ways = Vec::new();
        let mut outline = Vec::new();
        for member in &relation.members {
            if member.kind != MemberKind::Way
                || !(member.role == "outer" || member.role.is_empty())
            {
                continue;
            }
            consumed.insert(member.ref_id);
            if let Some(way) = ways.get(&member.ref_id) {
                member_ways.push(*way);
                outline.extend(way.nodes.iter().filter_map(|id| nodes.get(id).copied()));
            }
        }

        let Some(name) = named(&relation.tags) else {
            continue;
        };
        let Some(center) = centroid(&outline) else {
            continue;
        };
        let projection = Projection::new(center);
        let segments: Vec<_> = member_ways
            .iter()
            .filter_map(|way| way_segment(way, &nodes, &projection))
            .collect();
        let area_km2 = largest_ring_km2(&segments);
        matches.push(WaterMatch {
            name,
            lat: center.y,
            lon: center.x,
            area_km2,
        });
    }

    let mut seen = HashSet::new();
    for element in &result.elements {
        let Element::Way(way) = element else {
            continue;
        };
        if consumed.contains(&way.id) || !seen.insert(way.id) {
            continue;
        }
        let Some(name) = named(&way.tags) else {
            continue;
        };
        let outline: Vec<Coord> = way
            .nodes
            .iter()
            .filter_map(|id| nodes.get(id).copied())
            .collect();
        let Some(center) = centroid(&outline) else {
            continue;
        };
        let projection = Projection::new(center);
        let area_km2 = way_segment(way, &nodes, &projection)
            .map(|segment| largest_ring_km2(&[segment]))
            .unwrap_or(0.0);
        matches.push(WaterMatch {
            name,
            lat: center.y,
            lon: center.x,
            area_km2,
        });
    }

    matches
}

/// Area of the largest closed ring assembled from `segments` at the
/// default simplification tolerance, square kilometers. Both the
/// relation and standalone-way paths report areas through this.
fn largest_ring_km2(segments: &[Segment]) -> f64 {
    assemble_rings(segments, DEFAULT_SIMPLIFY_EPSILON_M)
        .iter()
        .filter(|ring| ring.closed)
        .map(|ring| polygon_area(&ring.points) / 1e6)
        .fold(0.0, f64::max)
}

fn named(tags: &HashMap<String, String>) -> Option<String> {
    tags.get("name").filter(|name| !name.is_empty()).cloned()
}

fn centroid(points: &[Coord]) -> Option<Coord> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Coord { x: 0.0, y: 0.0 }, |acc, point| acc + *point);
    Some(Coord {
        x: sum.x / n,
        y: sum.y / n,
    })
}
