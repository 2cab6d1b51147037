use std::{path::PathBuf, time::Instant};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waygraph::{
    generate_osm_script,
    graph::osm_to_graph_from,
    io::{read_settings, write_json, write_text},
    overpass::OverpassClient,
    PipelineError, DEFAULT_ENDPOINT,
};

/// Generate a routable GeoJSON graph from an Overpass API query.
#[derive(Debug, Parser)]
#[command(name = "waygraph", version)]
struct Cli {
    /// Query settings file (bbox, highway filter, limits)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Directory receiving the script, raw-data and graph artifacts
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Overpass API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waygraph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PipelineError> {
    let started = Instant::now();
    let settings = read_settings(&cli.settings)?;
    settings.validate()?;

    let script_path = cli.data_dir.join("osm-script.txt");
    let raw_path = cli.data_dir.join("raw-osm-data.json");
    let graph_path = cli.data_dir.join("graph.json");

    let script = generate_osm_script(&settings)?;
    write_text(&script_path, &script)?;
    tracing::info!(path = %script_path.display(), "wrote overpass script");

    let fetch_started = Instant::now();
    let client = OverpassClient::new(&cli.endpoint);
    let batch = client.run_query(&script, &settings).await?;
    write_json(&raw_path, &batch)?;
    tracing::info!(
        elements = batch.elements.len(),
        elapsed_s = fetch_started.elapsed().as_secs_f64(),
        path = %raw_path.display(),
        "received raw osm data"
    );

    let convert_started = Instant::now();
    let graph = osm_to_graph_from(&batch, &cli.endpoint)?;
    write_json(&graph_path, &graph)?;
    tracing::info!(
        features = graph.features.len(),
        elapsed_s = convert_started.elapsed().as_secs_f64(),
        path = %graph_path.display(),
        "wrote geojson graph"
    );

    tracing::info!(
        elapsed_s = started.elapsed().as_secs_f64(),
        "done; data from www.openstreetmap.org, available under ODbL"
    );
    Ok(())
}
