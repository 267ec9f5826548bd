use geo::{geometry::Coord, CoordFloat};

/// Unsigned polygon area via the shoelace formula.
///
/// The wraparound term closes the polygon implicitly, and an explicit
/// duplicate closing point contributes zero, so open and closed point
/// conventions yield the same area. Fewer than three points is zero.
pub fn polygon_area<C: CoordFloat>(points: &[Coord<C>]) -> C {
    if points.len() < 3 {
        return C::zero();
    }
    let mut twice_area = C::zero();
    for (idx, point) in points.iter().enumerate() {
        let next = points[(idx + 1) % points.len()];
        twice_area = twice_area + point.x * next.y - next.x * point.y;
    }
    let two = C::one() + C::one();
    (twice_area / two).abs()
}
