use crate::simplify::simplify;
use geo::{geometry::Coord, CoordFloat};

/// A polyline with the node ids of its endpoints.
///
/// Node ids come from the source data; two segments share an endpoint
/// exactly when their node ids match, regardless of coordinate
/// rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<C: CoordFloat = f64> {
    pub start_node: i64,
    pub end_node: i64,
    pub points: Vec<Coord<C>>,
}

/// An assembled, simplified ring.
///
/// Closed rings carry a trailing point equal to their first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<C: CoordFloat = f64> {
    pub points: Vec<Coord<C>>,
    pub closed: bool,
}

/// Chains segments into rings by matching endpoint node ids, then
/// simplifies each ring with tolerance `epsilon`.
///
/// Greedy: each unused segment seeds a ring, which grows by appending
/// whichever unused segment touches its trailing node (reversed when
/// joined end-to-end). A ring is closed when it returns to its seed's
/// start node. Rings with fewer than three points after
/// simplification are dropped. Terminates on any input, including
/// node chains that never close.
pub fn assemble_rings<C: CoordFloat>(segments: &[Segment<C>], epsilon: C) -> Vec<Ring<C>> {
    let mut used = vec![false; segments.len()];
    let mut rings = Vec::new();

    while let Some(seed) = used.iter().position(|flag| !*flag) {
        used[seed] = true;
        let start_node = segments[seed].start_node;
        let mut trailing = segments[seed].end_node;
        let mut points = segments[seed].points.clone();

        // Each pass appends at most one segment; the bound guards
        // against inputs with duplicated node ids.
        for _ in 0..segments.len() * 2 {
            if trailing == start_node {
                break;
            }
            let next = segments.iter().enumerate().find(|(idx, segment)| {
                !used[*idx] && (segment.start_node == trailing || segment.end_node == trailing)
            });
            let Some((idx, segment)) = next else {
                break;
            };
            used[idx] = true;
            if segment.start_node == trailing {
                points.extend(segment.points.iter().skip(1));
                trailing = segment.end_node;
            } else {
                points.extend(segment.points.iter().rev().skip(1));
                trailing = segment.start_node;
            }
        }

        let closed = trailing == start_node && points.len() >= 3;
        let points = simplify(&points, epsilon);
        if points.len() >= 3 {
            rings.push(Ring { points, closed });
        }
    }

    rings
}
