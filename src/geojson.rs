//! Output data model: a GeoJSON-style feature collection holding the graph.

use serde::{Deserialize, Serialize};

use crate::models::{LonLat, Tags};

/// Root output object. Features hold all point features first, then all
/// line features, in production order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    #[serde(rename = "metaData")]
    pub meta_data: MetaData,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn points(&self) -> impl Iterator<Item = &PointFeature> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Point(point) => Some(point),
            Feature::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineFeature> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Line(line) => Some(line),
            Feature::Point(_) => None,
        })
    }
}

/// Provenance copied from the source batch, plus the endpoint the batch
/// came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm3s: Option<serde_json::Value>,
}

// Line first: an untagged point would otherwise absorb line JSON, whose
// extra `src`/`tgt` fields serde ignores. A point lacks them, so the line
// variant cannot absorb point JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feature {
    Line(LineFeature),
    Point(PointFeature),
}

/// A graph vertex: an intersection or a way endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Geometry,
    pub properties: PointProperties,
}

/// A graph edge. `src` and `tgt` reference point feature output ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub src: u64,
    pub tgt: u64,
    pub geometry: Geometry,
    pub properties: LineProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: LonLat },
    LineString { coordinates: Vec<LonLat> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointProperties {
    pub id: u64,
    #[serde(rename = "osmId")]
    pub osm_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineProperties {
    pub id: u64,
    #[serde(rename = "osmId")]
    pub osm_id: i64,
    /// Great-circle length of the geometry in meters.
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}
