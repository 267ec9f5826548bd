//! Water-feature extraction from raw Overpass elements.

use crate::{
    document::{round_dp, Feature, PlanePoint},
    elements::{Element, MemberKind, QueryResult, Way},
};
use geo::geometry::Coord;
use std::collections::{HashMap, HashSet};
use tangent::{assemble_rings, simplify, Projection, Segment};

/// Default Douglas-Peucker tolerance, meters.
pub const DEFAULT_SIMPLIFY_EPSILON_M: f64 = 50.0;

/// Features keep any point within this multiple of the search
/// radius. A generous bound, not a clip: rings reaching past the
/// radar range stay intact as long as some part is in range.
const RANGE_SLACK: f64 = 1.2;

/// Turns a raw Overpass result into named, projected, simplified
/// features around `origin`.
///
/// Relations come first: outer-role member ways (empty role counts
/// as outer) are assembled into rings, one feature per ring, and are
/// not emitted again as standalone features. Each remaining way then
/// becomes one feature of its own. Features entirely outside
/// `radius_m` times the slack factor are dropped, as are degenerate
/// ones with fewer than three points after simplification.
pub fn extract_features(
    result: &QueryResult,
    origin: Coord,
    radius_m: f64,
    epsilon_m: f64,
) -> Vec<Feature> {
    let projection = Projection::new(origin);
    let max_range = radius_m * RANGE_SLACK;

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

    let mut features = Vec::new();
    let mut consumed = HashSet::new();

    for element in &result.elements {
        let Element::Relation(relation) = element else {
            continue;
        };
        let mut segments = Vec::new();
        for member in &relation.members {
            if member.kind != MemberKind::Way
                || !(member.role == "outer" || member.role.is_empty())
            {
                continue;
            }
            consumed.insert(member.ref_id);
            if let Some(segment) = ways
                .get(&member.ref_id)
                .and_then(|way| way_segment(way, &nodes, &projection))
            {
                segments.push(segment);
            }
        }

        let rings = assemble_rings(&segments, epsilon_m);
        log::debug!(
            "relation {}: {} segments assembled into {} rings",
            relation.id,
            segments.len(),
            rings.len()
        );
        for (index, ring) in rings.into_iter().enumerate() {
            if !within_range(&ring.points, max_range) {
                continue;
            }
            features.push(Feature {
                id: format!("relation_{}_{}", relation.id, index),
                name: display_name(&relation.tags, "water", relation.id),
                points: rounded(&ring.points),
                closed: ring.closed,
            });
        }
    }

    // A way can appear twice when it is both matched directly and
    // pulled in as a relation member by recursion; emit it once.
    let mut seen = HashSet::new();
    for element in &result.elements {
        let Element::Way(way) = element else {
            continue;
        };
        if consumed.contains(&way.id) || !seen.insert(way.id) {
            continue;
        }
        let points = plane_points(&way.nodes, &nodes, &projection);
        if points.len() < 3 {
            continue;
        }
        let closed = way.nodes.first() == way.nodes.last() && way.nodes.len() > 3;
        let points = simplify(&points, epsilon_m);
        if points.len() < 3 || !within_range(&points, max_range) {
            continue;
        }
        features.push(Feature {
            id: format!("way_{}", way.id),
            name: display_name(&way.tags, "shoreline", way.id),
            points: rounded(&points),
            closed,
        });
    }

    features
}

/// Builds an assembly segment from a way, dropping node ids with no
/// resolved coordinates. Ways with fewer than two resolved points
/// cannot join anything and yield `None`.
pub(crate) fn way_segment(
    way: &Way,
    nodes: &HashMap<i64, Coord>,
    projection: &Projection,
) -> Option<Segment> {
    let (&start_node, &end_node) = (way.nodes.first()?, way.nodes.last()?);
    if way.nodes.len() < 2 {
        return None;
    }
    let points = plane_points(&way.nodes, nodes, projection);
    (points.len() >= 2).then(|| Segment {
        start_node,
        end_node,
        points,
    })
}

fn plane_points(
    node_ids: &[i64],
    nodes: &HashMap<i64, Coord>,
    projection: &Projection,
) -> Vec<Coord> {
    node_ids
        .iter()
        .filter_map(|id| nodes.get(id))
        .map(|geo| projection.to_plane(*geo))
        .collect()
}

fn within_range(points: &[Coord], max_range: f64) -> bool {
    points.iter().any(|point| point.x.hypot(point.y) <= max_range)
}

fn rounded(points: &[Coord]) -> Vec<PlanePoint> {
    points
        .iter()
        .map(|point| PlanePoint {
            x: round_dp(point.x, 1),
            y: round_dp(point.y, 1),
        })
        .collect()
}

/// Display-name fallback chain: `name` tag, then `water` tag, then
/// `natural` tag, then the caller's default, the last three suffixed
/// with the element id.
fn display_name(tags: &HashMap<String, String>, fallback: &str, id: i64) -> String {
    if let Some(name) = tags.get("name").filter(|name| !name.is_empty()) {
        return name.clone();
    }
    let kind = tags
        .get("water")
        .or_else(|| tags.get("natural"))
        .map(String::as_str)
        .unwrap_or(fallback);
    format!("{kind}_{id}")
}

#[cfg(test)]
mod tests {
    use super::{extract_features, DEFAULT_SIMPLIFY_EPSILON_M};
    use crate::elements::{Element, Member, MemberKind, Node, QueryResult, Relation, Way};
    use geo::geometry::Coord;
    use std::collections::HashMap;

    const ORIGIN: Coord = Coord { y: 34.0, x: -81.0 };
    const RADIUS_M: f64 = 2000.0;

    // About 500 m of latitude at the test origin.
    const DLAT: f64 = 0.0045;
    const DLON: f64 = 0.0054;

    fn node(id: i64, lat: f64, lon: f64) -> Element {
        Element::Node(Node { id, lat, lon })
    }

    fn tag_map(tags: &[(&str, &str)]) -> HashMap<String, String> {
        tags.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn way(id: i64, nodes: Vec<i64>, tags: &[(&str, &str)]) -> Element {
        Element::Way(Way {
            id,
            nodes,
            tags: tag_map(tags),
        })
    }

    fn relation(id: i64, members: Vec<Member>, tags: &[(&str, &str)]) -> Element {
        Element::Relation(Relation {
            id,
            tags: tag_map(tags),
            members,
        })
    }

    fn member(ref_id: i64, role: &str) -> Member {
        Member {
            kind: MemberKind::Way,
            ref_id,
            role: role.to_string(),
        }
    }

    /// Four nodes boxing the origin at roughly 500 m.
    fn square_nodes() -> Vec<Element> {
        vec![
            node(1, ORIGIN.y - DLAT, ORIGIN.x - DLON),
            node(2, ORIGIN.y - DLAT, ORIGIN.x + DLON),
            node(3, ORIGIN.y + DLAT, ORIGIN.x + DLON),
            node(4, ORIGIN.y + DLAT, ORIGIN.x - DLON),
        ]
    }

    #[test]
    fn test_relation_plus_standalone_way() {
        let mut elements = square_nodes();
        elements.push(node(5, ORIGIN.y + 0.002, ORIGIN.x + 0.008));
        elements.push(node(6, ORIGIN.y + 0.004, ORIGIN.x + 0.009));
        elements.push(node(7, ORIGIN.y + 0.006, ORIGIN.x + 0.008));
        elements.push(way(10, vec![1, 2, 3], &[]));
        elements.push(way(11, vec![3, 4, 1], &[]));
        elements.push(way(30, vec![5, 6, 7], &[("natural", "coastline")]));
        elements.push(relation(
            200,
            vec![member(10, "outer"), member(11, "outer")],
            &[("name", "Test Lake"), ("natural", "water")],
        ));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        assert_eq!(features.len(), 2);

        assert_eq!(features[0].id, "relation_200_0");
        assert_eq!(features[0].name, "Test Lake");
        assert!(features[0].closed);
        assert_eq!(features[0].points.len(), 5);
        assert_eq!(features[0].points.first(), features[0].points.last());

        assert_eq!(features[1].id, "way_30");
        assert_eq!(features[1].name, "coastline_30");
        assert!(!features[1].closed);
    }

    #[test]
    fn test_empty_role_counts_as_outer() {
        let mut elements = square_nodes();
        elements.push(way(10, vec![1, 2, 3], &[]));
        elements.push(way(11, vec![3, 4, 1], &[]));
        elements.push(relation(
            200,
            vec![member(10, ""), member(11, "")],
            &[("natural", "water")],
        ));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id, "relation_200_0");
        assert!(features[0].closed);
    }

    #[test]
    fn test_inner_members_become_standalone_features() {
        // Inner rings are not consumed by the relation pass, so an
        // island boundary pulled in by recursion still surfaces as
        // its own shoreline.
        let mut elements = square_nodes();
        elements.push(node(8, ORIGIN.y - 0.001, ORIGIN.x - 0.001));
        elements.push(node(9, ORIGIN.y - 0.001, ORIGIN.x + 0.001));
        elements.push(node(12, ORIGIN.y + 0.001, ORIGIN.x));
        elements.push(way(10, vec![1, 2, 3, 4, 1], &[]));
        elements.push(way(20, vec![8, 9, 12, 8], &[]));
        elements.push(relation(
            200,
            vec![member(10, "outer"), member(20, "inner")],
            &[("name", "Ringed Lake"), ("natural", "water")],
        ));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, "relation_200_0");
        assert_eq!(features[1].id, "way_20");
        assert_eq!(features[1].name, "shoreline_20");
        assert!(features[1].closed);
    }

    #[test]
    fn test_duplicate_way_listing_emits_once() {
        let mut elements = square_nodes();
        elements.push(way(10, vec![1, 2, 3, 4, 1], &[("name", "Mill Pond")]));
        elements.push(way(10, vec![1, 2, 3, 4, 1], &[]));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "Mill Pond");
    }

    #[test]
    fn test_out_of_range_dropped() {
        // A triangle 0.1 degrees east, ~9 km from the origin, far
        // outside 1.2x the 2 km radius.
        let elements = vec![
            node(1, ORIGIN.y, ORIGIN.x + 0.1),
            node(2, ORIGIN.y + 0.001, ORIGIN.x + 0.101),
            node(3, ORIGIN.y - 0.001, ORIGIN.x + 0.101),
            way(10, vec![1, 2, 3], &[("natural", "water")]),
        ];
        let result = QueryResult { elements };

        assert!(extract_features(&result, ORIGIN, RADIUS_M, 1.0).is_empty());
    }

    #[test]
    fn test_name_fallback_chain() {
        let mut elements = square_nodes();
        elements.push(way(21, vec![1, 2, 3], &[("water", "reservoir")]));
        elements.push(way(22, vec![2, 3, 4], &[("natural", "water")]));
        elements.push(way(23, vec![3, 4, 1], &[]));
        elements.push(relation(300, vec![], &[]));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["reservoir_21", "water_22", "shoreline_23"]);
    }

    #[test]
    fn test_short_and_unresolved_ways_skipped() {
        let mut elements = square_nodes();
        // Two resolved points.
        elements.push(way(40, vec![1, 2], &[]));
        // Three node ids but only one resolves.
        elements.push(way(41, vec![1, 998, 999], &[]));
        let result = QueryResult { elements };

        assert!(extract_features(&result, ORIGIN, RADIUS_M, 1.0).is_empty());
    }

    #[test]
    fn test_way_closure_needs_more_than_three_nodes() {
        let mut elements = square_nodes();
        elements.push(way(50, vec![1, 2, 3, 1], &[]));
        // Same first and last node, but only three ids: stays open.
        elements.push(way(51, vec![2, 4, 2], &[]));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        assert_eq!(features.len(), 2);
        assert!(features[0].closed);
        assert!(!features[1].closed);
    }

    #[test]
    fn test_points_rounded_to_one_decimal() {
        let mut elements = square_nodes();
        elements.push(way(50, vec![1, 2, 3, 4, 1], &[]));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, 1.0);
        for point in &features[0].points {
            assert_eq!(point.x, (point.x * 10.0).round() / 10.0);
            assert_eq!(point.y, (point.y * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_simplification_thins_collinear_points() {
        // A straight east-west run of 21 nodes collapses to its
        // endpoints at the default tolerance.
        let mut elements: Vec<Element> = (0..21)
            .map(|i| node(100 + i, ORIGIN.y, ORIGIN.x + 0.0005 * i as f64))
            .collect();
        elements.push(way(60, (100..121).collect(), &[]));
        let result = QueryResult { elements };

        let features = extract_features(&result, ORIGIN, RADIUS_M, DEFAULT_SIMPLIFY_EPSILON_M);
        assert!(features.is_empty());
    }
}
