use geo::{geometry::Coord, CoordFloat};

/// Meters per degree of latitude.
///
/// Not geodetically exact, but the same constant drives both
/// directions of the transform, so round trips are lossless.
pub const METERS_PER_DEGREE: f64 = 111_132.954;

/// Meters per nautical mile.
const METERS_PER_NM: f64 = 1852.0;

/// Origin-centered equirectangular projection.
///
/// Maps geographic coordinates (degrees) onto a local tangent plane
/// (meters, `x` east-positive, `y` north-positive) anchored at an
/// origin. Adequate within roughly 50 km of the origin, which covers
/// radar scenes with plenty of margin; no iterative geodesic solving
/// involved. Always succeeds for finite inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection<C: CoordFloat = f64> {
    origin: Coord<C>,

    /// Cosine of the origin latitude, applied to longitude deltas.
    cos_lat: C,
}

impl<C: CoordFloat> Projection<C> {
    pub fn new(origin: Coord<C>) -> Self {
        let cos_lat = origin.y.to_radians().cos();
        Self { origin, cos_lat }
    }

    pub fn origin(&self) -> Coord<C> {
        self.origin
    }

    /// Projects a geographic coordinate into the local plane.
    pub fn to_plane(&self, geo: Coord<C>) -> Coord<C> {
        let k = C::from(METERS_PER_DEGREE).unwrap();
        Coord {
            x: (geo.x - self.origin.x) * k * self.cos_lat,
            y: (geo.y - self.origin.y) * k,
        }
    }

    /// Exact inverse of [`Projection::to_plane`].
    pub fn to_geo(&self, plane: Coord<C>) -> Coord<C> {
        let k = C::from(METERS_PER_DEGREE).unwrap();
        Coord {
            x: self.origin.x + plane.x / (k * self.cos_lat),
            y: self.origin.y + plane.y / k,
        }
    }
}

/// Converts nautical miles to meters.
pub fn nm_to_meters<C: CoordFloat>(nm: C) -> C {
    nm * C::from(METERS_PER_NM).unwrap()
}
