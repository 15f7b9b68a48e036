//! motif-gen - Game data generator
//!
//! Rebuilds `game_songs.json` (one song per day) and `game_motifs.json`
//! (valid guesses ranked by rarity) from the wiki's album catalog, keeping
//! every already-published day of the previous schedule.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use motif_common::config::{load_config_with_source, write_toml_config, LoggingConfig, TomlConfig};
use motif_gen::rollover::load_snapshot;
use motif_gen::{CommittedSchedule, OutputPaths, Pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for motif-gen
#[derive(Parser, Debug)]
#[command(name = "motif-gen")]
#[command(about = "Generate daily leitmotif game data from the wiki catalog")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = "MOTIF_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of per-album YAML files (overrides config)
    #[arg(short, long, env = "MOTIF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory receiving the JSON artifacts (overrides config)
    #[arg(short, long, env = "MOTIF_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Run the pipeline and report without rotating or writing outputs
    #[arg(long)]
    preview: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<PathBuf>,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source): (TomlConfig, _) =
        load_config_with_source(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    init_tracing(&config.logging)?;
    info!("motif-gen {}", env!("CARGO_PKG_VERSION"));
    source.log();

    if let Some(path) = args.write_default_config {
        write_toml_config(&config, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let pipeline = Pipeline::new(&config.game).context("Invalid game configuration")?;
    let paths = OutputPaths::new(&config.output_dir);

    if args.preview {
        info!("Preview run: outputs will not be rotated or written");
    } else {
        paths.rotate_backup().context("Failed to back up previous schedule")?;
    }

    let committed = match load_snapshot(&paths.backup).context("Failed to read snapshot")? {
        Some(snapshot) => {
            CommittedSchedule::carry_forward(snapshot, config.game.carried_day_count())?
        }
        None => {
            info!("No previous schedule at {}", paths.backup.display());
            CommittedSchedule::default()
        }
    };

    info!("Catalog: {}", config.data_dir.display());
    let game = pipeline
        .run_dir(&config.data_dir, &committed)
        .context("Failed to generate game data")?;
    game.report.log();

    if !args.preview {
        game.store(&paths).context("Failed to write game data")?;
    }

    info!("Done");
    Ok(())
}
