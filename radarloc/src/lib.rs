//! Radar-scene extraction from OpenStreetMap data and the
//! `.radarloc` file format.
//!
//! The pipeline is synchronous and pure once the network is out of
//! the way: a decoded Overpass [`QueryResult`] goes through
//! [`extract_features`] into a list of [`Feature`]s, which
//! [`Document::new`] packages with metadata and an optional
//! [`TerrainGrid`]; [`validate`] then reports scene quality as data
//! rather than errors.

mod document;
mod elements;
mod error;
mod extract;
mod search;
mod validate;

pub use crate::{
    document::{
        round_dp, CoordinateSystem, Document, Feature, GridDims, Metadata, PlanePoint, Terrain,
        TerrainGrid, FORMAT_VERSION,
    },
    elements::{Element, Member, MemberKind, Node, QueryResult, Relation, Way},
    error::RadarlocError,
    extract::{extract_features, DEFAULT_SIMPLIFY_EPSILON_M},
    search::{match_water_bodies, WaterMatch},
    validate::{validate, SceneStats, ValidationReport},
};
