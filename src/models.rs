use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Longitude/latitude pair in degrees, GeoJSON axis order.
pub type LonLat = [f64; 2];

/// OSM tag mapping. Ordered so serialized artifacts stay stable.
pub type Tags = BTreeMap<String, String>;

/// One Overpass API response: provenance metadata plus a mixed list of
/// node and way elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm3s: Option<serde_json::Value>,
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Node(NodeElement),
    Way(WayElement),
}

/// A single geographic location, candidate for becoming a graph vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeElement {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl NodeElement {
    pub fn coordinates(&self) -> LonLat {
        [self.lon, self.lat]
    }
}

/// An ordered path through node ids, the unit decomposed into links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WayElement {
    pub id: i64,
    pub nodes: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}
