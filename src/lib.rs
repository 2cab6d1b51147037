//! waygraph turns an Overpass API query into a routable GeoJSON graph:
//! intersection and endpoint nodes become point features, the way segments
//! between them become line-string links.
//!
//! The pipeline has three steps, each usable on its own:
//! 1. [`generate_osm_script`] renders validated [`Settings`] into Overpass QL,
//! 2. [`OverpassClient`] runs the query and returns the raw element batch,
//! 3. [`osm_to_graph`] converts the batch into a feature collection.

pub mod distance;
pub mod error;
pub mod geojson;
pub mod graph;
pub mod io;
pub mod models;
pub mod overpass;
pub mod script;
pub mod settings;

pub use error::PipelineError;
pub use graph::{osm_to_graph, osm_to_graph_from};
pub use overpass::{OverpassClient, DEFAULT_ENDPOINT};
pub use script::generate_osm_script;
pub use settings::Settings;
