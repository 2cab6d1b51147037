//! Overpass QL script generation from validated settings.

use crate::settings::{HighwayFilter, Settings, SettingsError};

/// Renders the Overpass QL query for `settings`.
///
/// The query selects ways carrying a `highway` tag matching the filter
/// (excluding areas) inside the bounding box, recurses down to their child
/// nodes and exports the union as JSON.
pub fn generate_osm_script(settings: &Settings) -> Result<String, SettingsError> {
    settings.validate()?;

    let [lon1, lat1, lon2, lat2] = settings.bbox;
    let way_clauses = match &settings.highways {
        HighwayFilter::Keyword(_) => "  way[highway][!area];".to_string(),
        HighwayFilter::Selection(values) => values
            .iter()
            .map(|value| format!("  way[highway={value}][!area];"))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    // Overpass expects seconds and latitude-first bbox order.
    let timeout_s = settings.timeout_ms.div_ceil(1000);

    Ok(format!(
        "[out:json][timeout:{timeout_s}][bbox:{lat1}, {lon1}, {lat2}, {lon2}];\n\
         \n\
         // Ways matching the highway filter\n\
         (\n\
         {way_clauses}\n\
         )->.ways;\n\
         \n\
         // Their child nodes\n\
         .ways; node(w)->.nodes;\n\
         \n\
         (\n\
         \x20 .ways;\n\
         \x20 .nodes;\n\
         )->.all;\n\
         \n\
         .all out;"
    ))
}
