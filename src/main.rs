pub mod types;
pub mod config;
pub mod palette;
pub mod data;
pub mod centroids;
pub mod processing;
pub mod state;
pub mod render;
pub mod server;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Precompute one map view JSON per year of the configured range
    Export {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Serve the interactive map
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Export { config } => {
            println!("Exporting views with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let records = data::load_records(&app_config.input)?;
            let centroid_table = centroids::CentroidTable::load(
                &app_config.input.centroids_geojson,
                &app_config.input.properties,
            )?;

            export_views(&app_config, &records, &centroid_table)?;
            println!("Export complete!");
        }
        Commands::Serve { config } => {
            println!("Serving map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let records = data::load_records(&app_config.input)?;

            // Without the reference the map still serves, just with no
            // clusters or lines.
            let centroid_table = match centroids::CentroidTable::load(
                &app_config.input.centroids_geojson,
                &app_config.input.properties,
            ) {
                Ok(table) => table,
                Err(e) => {
                    tracing::error!("Failed to load centroid reference: {:#}", e);
                    centroids::CentroidTable::empty()
                }
            };

            server::start_server(app_config, records, centroid_table).await?;
        }
    }

    Ok(())
}

/// Writes `{year}.json` for every year of the slider range, plus a
/// `meta.json` with the palette and bounds, so the map can be hosted as
/// static files with no API behind it.
fn export_views(
    config: &config::AppConfig,
    records: &[types::ExhibitionRecord],
    centroid_table: &centroids::CentroidTable,
) -> anyhow::Result<()> {
    let view_dir = &config.output.view_dir;
    fs::create_dir_all(view_dir)
        .with_context(|| format!("Failed to create view directory: {:?}", view_dir))?;

    println!(
        "Exporting years {}..={} to {:?}...",
        config.map.min_year, config.map.max_year, view_dir
    );

    (config.map.min_year..=config.map.max_year)
        .into_par_iter()
        .for_each(|year| {
            // All nationalities, lines on; a static client filters further
            // on its own.
            let selection = state::SelectionState::new(year);
            let view = render::build_view(records, centroid_table, &selection, &config.map.style);

            let path = view_dir.join(format!("{}.json", year));
            if let Err(e) = write_json(&path, &view) {
                eprintln!("Failed to write view {:?}: {:?}", path, e);
            }
        });

    let nationalities: Vec<serde_json::Value> = palette::restricted_colors()
        .iter()
        .map(|(name, color)| serde_json::json!({ "name": name, "color": color }))
        .collect();
    let meta = serde_json::json!({
        "min_year": config.map.min_year,
        "max_year": config.map.max_year,
        "nationalities": nationalities,
    });
    write_json(&view_dir.join("meta.json"), &meta)?;

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &std::path::Path, value: &T) -> anyhow::Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    writer.flush()?;
    Ok(())
}
