use geo::{geometry::Coord, CoordFloat};

/// Simplifies a polyline with the Douglas-Peucker algorithm.
///
/// Interior points closer than `epsilon` (same units as the input
/// coordinates) to the chord between kept neighbors are dropped. The
/// first and last points always survive. Uses an explicit work stack
/// rather than recursion, so pathological inputs cannot overflow the
/// call stack.
pub fn simplify<C: CoordFloat>(points: &[Coord<C>], epsilon: C) -> Vec<Coord<C>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Half-open index pairs still awaiting a split decision.
    let mut spans = vec![(0, points.len() - 1)];
    while let Some((first, last)) = spans.pop() {
        if last - first < 2 {
            continue;
        }
        let (offset, distance) = farthest_from_chord(&points[first..=last]);
        if distance > epsilon {
            let split = first + offset;
            keep[split] = true;
            spans.push((first, split));
            spans.push((split, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, keep)| keep.then_some(*point))
        .collect()
}

/// Finds the interior point of `span` farthest from the chord between
/// its endpoints. Returns the index within `span` and the distance.
///
/// Distance is measured to the chord as a segment: points beyond
/// either endpoint measure to that endpoint rather than the infinite
/// line. A zero-length chord (closed ring handed in whole) degrades
/// to plain point-to-point distance.
fn farthest_from_chord<C: CoordFloat>(span: &[Coord<C>]) -> (usize, C) {
    let start = span[0];
    let end = span[span.len() - 1];
    let chord = Coord {
        x: end.x - start.x,
        y: end.y - start.y,
    };
    let chord_len_sq = chord.x * chord.x + chord.y * chord.y;

    let mut max_offset = 0;
    let mut max_distance = C::zero();
    for (offset, point) in span.iter().enumerate().take(span.len() - 1).skip(1) {
        let rel = Coord {
            x: point.x - start.x,
            y: point.y - start.y,
        };
        let t = if chord_len_sq > C::zero() {
            clamp01((rel.x * chord.x + rel.y * chord.y) / chord_len_sq)
        } else {
            C::zero()
        };
        let distance = (rel.x - t * chord.x).hypot(rel.y - t * chord.y);
        if distance > max_distance {
            max_offset = offset;
            max_distance = distance;
        }
    }
    (max_offset, max_distance)
}

fn clamp01<C: CoordFloat>(t: C) -> C {
    t.max(C::zero()).min(C::one())
}
