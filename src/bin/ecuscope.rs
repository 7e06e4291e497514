use anyhow::{Context, Result};
use clap::Parser;
use ecuscope::definitions::DefinitionSchema;
use ecuscope::logging::{init_tracing, init_tracing_json};
use ecuscope::report::{analyze, render_text, RenderOptions};
use ecuscope::{AnalysisConfig, RomImage};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecuscope")]
#[command(
    about = "Inspect an ECU ROM image: tune usage, tables and catalog values",
    long_about = None
)]
struct Cli {
    /// Path to a 32KB or 64KB .bin/.rom image
    rom: PathBuf,

    /// Definition catalog (JSON)
    #[arg(short, long, env = "ECUSCOPE_DEFINITIONS")]
    definitions: Option<PathBuf>,

    /// Analysis configuration (JSON); defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Include a grid dump of every detected table
    #[arg(short, long)]
    tables: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        init_tracing_json();
    } else {
        init_tracing();
    }

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let image = RomImage::open(&cli.rom, config.io.clone())
        .with_context(|| format!("Failed to load ROM image {}", cli.rom.display()))?;

    let schema = match &cli.definitions {
        Some(path) => DefinitionSchema::from_json_file(path, config.io.clone())
            .with_context(|| format!("Failed to load definitions {}", path.display()))?,
        None => DefinitionSchema::default(),
    };

    let report = analyze(&image, &schema, &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let options = RenderOptions {
            show_tables: cli.tables,
            row_size: config.tables.row_size,
        };
        print!("{}", render_text(&report, &image, &options));
    }

    Ok(())
}
