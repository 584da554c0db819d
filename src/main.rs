//! Mineral Atlas: mining locations in India, filtered by mineral.

use clap::Parser;
use color_eyre::Result;
use mineral_map::prelude::*;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mining locations in India on an interactive map", long_about = None)]
struct Cli {
    /// Mineral selected at startup; overrides MINERAL_MAP_DEFAULT.
    #[arg(long)]
    mineral: Option<String>,
    /// Print the visible markers and the resulting view as JSON, then exit.
    #[arg(long)]
    export_json: bool,
    /// Center on the first marker instead of fitting all of them.
    #[arg(long)]
    no_fit: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut builder = MineralMapBuilder::new().from_env();
    if let Some(mineral) = &cli.mineral {
        builder = builder.default_mineral(mineral.clone());
    }
    if cli.no_fit {
        builder = builder.disable_fit();
    }

    if cli.export_json {
        return export_json(&builder);
    }

    builder.build().run();
    Ok(())
}

fn export_json(builder: &MineralMapBuilder) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    catalog().validate()?;
    let report = builder.export_report();
    info!(markers = report.markers.len(), "export ready");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
