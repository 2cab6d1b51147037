//! Graph construction: classify raw elements, decompose ways into
//! intersection-bounded links, and assemble the output feature collection.
//!
//! A way is split at every interior node shared with another way:
//!
//! ```text
//! initial way        *------*----------*-------*
//! decomposed         *------* + *----------* + *-------*
//! ```

use std::collections::HashMap;

use crate::distance::length_of;
use crate::geojson::{
    Feature, FeatureCollection, Geometry, LineFeature, LineProperties, MetaData, PointFeature,
    PointProperties,
};
use crate::models::{LonLat, OsmBatch, RawElement, Tags, WayElement};
use crate::overpass::DEFAULT_ENDPOINT;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("way {way_id} references node {node_id} which is not in the batch")]
    MissingNode { way_id: i64, node_id: i64 },
    #[error("way {way_id} has {len} nodes, at least 2 are required")]
    ShortWay { way_id: i64, len: usize },
    #[error("link endpoint {node_id} was never registered as a graph vertex")]
    UnregisteredVertex { node_id: i64 },
}

/// A node element enriched with graph-membership bookkeeping.
///
/// The index holding these is owned by [`osm_to_graph`] for the duration of
/// one run; `incidence_count` is written only by the counting pass and
/// `is_vertex` only by the decomposer, both strictly sequentially.
#[derive(Debug, Clone)]
pub struct ClassifiedNode {
    pub id: i64,
    pub coordinates: LonLat,
    pub tags: Option<Tags>,
    /// Number of way-node occurrences touching this node, across all ways.
    /// A way visiting the same node twice counts it twice.
    pub incidence_count: u32,
    pub is_vertex: bool,
}

/// One maximal sub-path of a way between two consecutive vertices.
#[derive(Debug, Clone)]
pub struct Link {
    pub way_id: i64,
    pub tags: Option<Tags>,
    pub node_sequence: Vec<i64>,
    pub source_node: i64,
    pub target_node: i64,
}

impl Link {
    /// Carries over only the way fields a link inherits: source id and tags.
    fn from_way(way: &WayElement, node_sequence: Vec<i64>, source_node: i64, target_node: i64) -> Self {
        Self {
            way_id: way.id,
            tags: way.tags.clone(),
            node_sequence,
            source_node,
            target_node,
        }
    }
}

/// Converts a raw Overpass batch into a routable GeoJSON graph, recording
/// [`DEFAULT_ENDPOINT`] as the data source.
pub fn osm_to_graph(batch: &OsmBatch) -> Result<FeatureCollection, GraphError> {
    osm_to_graph_from(batch, DEFAULT_ENDPOINT)
}

/// Same as [`osm_to_graph`] with an explicit source recorded in the output
/// metadata.
pub fn osm_to_graph_from(batch: &OsmBatch, source: &str) -> Result<FeatureCollection, GraphError> {
    let Classified {
        mut index,
        node_order,
        ways,
    } = classify(batch)?;
    count_incidence(&ways, &mut index)?;
    let links = decompose_ways(&ways, &mut index)?;
    let features = number_features(&index, &node_order, &links)?;

    tracing::debug!(
        nodes = node_order.len(),
        ways = ways.len(),
        links = links.len(),
        features = features.len(),
        "assembled graph"
    );

    Ok(FeatureCollection {
        collection_type: "FeatureCollection".into(),
        meta_data: MetaData {
            source: source.to_string(),
            version: batch.version.clone(),
            generator: batch.generator.clone(),
            osm3s: batch.osm3s.clone(),
        },
        features,
    })
}

struct Classified<'a> {
    index: HashMap<i64, ClassifiedNode>,
    /// Node ids in batch presentation order; the index alone loses it.
    node_order: Vec<i64>,
    ways: Vec<&'a WayElement>,
}

fn classify(batch: &OsmBatch) -> Result<Classified<'_>, GraphError> {
    let mut index = HashMap::new();
    let mut node_order = Vec::new();
    let mut ways = Vec::new();

    for element in &batch.elements {
        match element {
            RawElement::Node(node) => {
                node_order.push(node.id);
                index.insert(
                    node.id,
                    ClassifiedNode {
                        id: node.id,
                        coordinates: node.coordinates(),
                        tags: node.tags.clone(),
                        incidence_count: 0,
                        is_vertex: false,
                    },
                );
            }
            RawElement::Way(way) => {
                if way.nodes.len() < 2 {
                    return Err(GraphError::ShortWay {
                        way_id: way.id,
                        len: way.nodes.len(),
                    });
                }
                ways.push(way);
            }
        }
    }

    Ok(Classified {
        index,
        node_order,
        ways,
    })
}

fn count_incidence(
    ways: &[&WayElement],
    index: &mut HashMap<i64, ClassifiedNode>,
) -> Result<(), GraphError> {
    for way in ways {
        for &node_id in &way.nodes {
            let node = index.get_mut(&node_id).ok_or(GraphError::MissingNode {
                way_id: way.id,
                node_id,
            })?;
            node.incidence_count += 1;
        }
    }
    Ok(())
}

fn decompose_ways(
    ways: &[&WayElement],
    index: &mut HashMap<i64, ClassifiedNode>,
) -> Result<Vec<Link>, GraphError> {
    let mut links = Vec::new();
    for way in ways {
        decompose_way(way, index, &mut links)?;
    }
    Ok(links)
}

/// Walks one way, closing a link at every interior intersection and always
/// at the final node. Way endpoints become vertices unconditionally.
fn decompose_way(
    way: &WayElement,
    index: &mut HashMap<i64, ClassifiedNode>,
    links: &mut Vec<Link>,
) -> Result<(), GraphError> {
    let first = way.nodes[0];
    mark_vertex(index, way.id, first)?;

    let mut segment = vec![first];
    let mut segment_start = first;

    for &node_id in &way.nodes[1..way.nodes.len() - 1] {
        segment.push(node_id);
        let node = index.get_mut(&node_id).ok_or(GraphError::MissingNode {
            way_id: way.id,
            node_id,
        })?;
        if node.incidence_count > 1 {
            // Interior intersection: close the pending segment here and
            // start the next one at the same node.
            node.is_vertex = true;
            let closed = std::mem::replace(&mut segment, vec![node_id]);
            links.push(Link::from_way(way, closed, segment_start, node_id));
            segment_start = node_id;
        }
    }

    let last = way.nodes[way.nodes.len() - 1];
    mark_vertex(index, way.id, last)?;
    segment.push(last);
    links.push(Link::from_way(way, segment, segment_start, last));

    Ok(())
}

fn mark_vertex(
    index: &mut HashMap<i64, ClassifiedNode>,
    way_id: i64,
    node_id: i64,
) -> Result<(), GraphError> {
    let node = index.get_mut(&node_id).ok_or(GraphError::MissingNode { way_id, node_id })?;
    node.is_vertex = true;
    Ok(())
}

/// Turns vertices and links into output features with sequential ids.
///
/// Point features are numbered first, starting at 1; line features continue
/// after the last point id, so the two id spaces never collide. Line
/// `src`/`tgt` references are rewritten from source node ids to point
/// output ids through a side map. Pure with respect to its inputs.
fn number_features(
    index: &HashMap<i64, ClassifiedNode>,
    node_order: &[i64],
    links: &[Link],
) -> Result<Vec<Feature>, GraphError> {
    let mut features = Vec::new();
    let mut output_ids = HashMap::new();
    let mut next_id: u64 = 1;

    for node_id in node_order {
        let Some(node) = index.get(node_id) else {
            continue;
        };
        if !node.is_vertex {
            continue;
        }
        output_ids.insert(node.id, next_id);
        features.push(Feature::Point(PointFeature {
            feature_type: "Feature".into(),
            geometry: Geometry::Point {
                coordinates: node.coordinates,
            },
            properties: PointProperties {
                id: next_id,
                osm_id: node.id,
                tags: node.tags.clone(),
            },
        }));
        next_id += 1;
    }

    for link in links {
        let coordinates = link
            .node_sequence
            .iter()
            .map(|node_id| {
                index
                    .get(node_id)
                    .map(|node| node.coordinates)
                    .ok_or(GraphError::MissingNode {
                        way_id: link.way_id,
                        node_id: *node_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let src = resolve_vertex(&output_ids, link.source_node)?;
        let tgt = resolve_vertex(&output_ids, link.target_node)?;
        let length = length_of(&coordinates);

        features.push(Feature::Line(LineFeature {
            feature_type: "Feature".into(),
            src,
            tgt,
            geometry: Geometry::LineString { coordinates },
            properties: LineProperties {
                id: next_id,
                osm_id: link.way_id,
                length,
                tags: link.tags.clone(),
            },
        }));
        next_id += 1;
    }

    Ok(features)
}

fn resolve_vertex(output_ids: &HashMap<i64, u64>, node_id: i64) -> Result<u64, GraphError> {
    output_ids
        .get(&node_id)
        .copied()
        .ok_or(GraphError::UnregisteredVertex { node_id })
}
