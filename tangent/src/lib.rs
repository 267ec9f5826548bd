//! Local tangent-plane geometry for radar scene extraction.
//!
//! Converts geographic coordinates into a flat, origin-centered
//! Cartesian frame and cleans up the polylines that land there: an
//! equirectangular [`Projection`], Douglas-Peucker [`simplify`], and
//! greedy endpoint-matching [`assemble_rings`] for the way segments
//! of multipolygon relations.
//!
//! All coordinates are [`geo::Coord`] with `x` = longitude (or east
//! meters) and `y` = latitude (or north meters).

mod area;
mod projection;
mod ring;
mod simplify;

pub use crate::{
    area::polygon_area,
    projection::{nm_to_meters, Projection, METERS_PER_DEGREE},
    ring::{assemble_rings, Ring, Segment},
    simplify::simplify,
};
