//! Query settings: bounding box, highway filter and request limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_TIMEOUT_MS: u64 = 600_000;
const DEFAULT_MAX_CONTENT_LENGTH: u64 = 900_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("bbox longitude {0} is outside [-180, 180)")]
    LongitudeOutOfRange(f64),
    #[error("bbox latitude {0} is outside [-90, 90)")]
    LatitudeOutOfRange(f64),
    #[error("highway filter list is empty")]
    EmptyHighwayList,
    #[error("unknown highway filter keyword {0:?}, only \"ALL\" is accepted")]
    UnknownKeyword(String),
    #[error("timeout must be strictly positive")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// `[lon1, lat1, lon2, lat2]`: bottom-left then top-right corner of the
    /// query region, in degrees.
    pub bbox: [f64; 4],
    pub highways: HighwayFilter,
    /// Client-side request timeout in milliseconds.
    #[serde(default = "default_timeout_ms", alias = "timeout")]
    pub timeout_ms: u64,
    /// Upper bound on the raw response body, in bytes.
    #[serde(default = "default_max_content_length", alias = "maxContentLength")]
    pub max_content_length: u64,
}

/// Either every highway kind (`"ALL"`) or an explicit list of
/// `highway=<value>` tag values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HighwayFilter {
    Keyword(String),
    Selection(Vec<String>),
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let [lon1, lat1, lon2, lat2] = self.bbox;
        for lon in [lon1, lon2] {
            if !(-180.0..180.0).contains(&lon) {
                return Err(SettingsError::LongitudeOutOfRange(lon));
            }
        }
        for lat in [lat1, lat2] {
            if !(-90.0..90.0).contains(&lat) {
                return Err(SettingsError::LatitudeOutOfRange(lat));
            }
        }

        match &self.highways {
            HighwayFilter::Keyword(keyword) if keyword == "ALL" => {}
            HighwayFilter::Keyword(keyword) => {
                return Err(SettingsError::UnknownKeyword(keyword.clone()))
            }
            HighwayFilter::Selection(values) if values.is_empty() => {
                return Err(SettingsError::EmptyHighwayList)
            }
            HighwayFilter::Selection(_) => {}
        }

        if self.timeout_ms == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_content_length() -> u64 {
    DEFAULT_MAX_CONTENT_LENGTH
}
