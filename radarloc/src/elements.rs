//! Overpass API element model.
//!
//! Responses interleave nodes, ways, and relations in one `elements`
//! array, discriminated by a `type` field. Skeleton output (`out
//! skel`) omits tags, so tag maps default to empty.

use serde::Deserialize;
use std::collections::HashMap;

/// A decoded Overpass response body. Fields other than `elements`
/// (generator, osm3s) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relation {
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: MemberKind,
    #[serde(rename = "ref")]
    pub ref_id: i64,

    /// Empty when the source data leaves the role unspecified.
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

#[cfg(test)]
mod tests {
    use super::{Element, MemberKind, QueryResult};

    #[test]
    fn test_parses_overpass_response() {
        let raw = r#"{
            "version": 0.6,
            "generator": "Overpass API 0.7.62",
            "elements": [
                {"type": "node", "id": 7, "lat": 34.1, "lon": -81.3},
                {"type": "way", "id": 11, "nodes": [7, 7], "tags": {"natural": "water"}},
                {"type": "way", "id": 12, "nodes": [7]},
                {"type": "relation", "id": 3, "tags": {"name": "Lake"},
                 "members": [{"type": "way", "ref": 11, "role": "outer"},
                             {"type": "way", "ref": 12}]}
            ]
        }"#;
        let result: QueryResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.elements.len(), 4);

        let Element::Node(node) = &result.elements[0] else {
            panic!("expected a node");
        };
        assert_eq!((node.id, node.lat, node.lon), (7, 34.1, -81.3));

        let Element::Way(way) = &result.elements[2] else {
            panic!("expected a way");
        };
        assert!(way.tags.is_empty());

        let Element::Relation(relation) = &result.elements[3] else {
            panic!("expected a relation");
        };
        assert_eq!(relation.members[0].kind, MemberKind::Way);
        assert_eq!(relation.members[0].ref_id, 11);
        assert_eq!(relation.members[0].role, "outer");
        assert!(relation.members[1].role.is_empty());
    }

    #[test]
    fn test_empty_response() {
        let result: QueryResult = serde_json::from_str("{}").unwrap();
        assert!(result.elements.is_empty());
    }
}
