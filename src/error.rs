use std::io;

use thiserror::Error;

use crate::graph::GraphError;
use crate::overpass::FetchError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("overpass fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
