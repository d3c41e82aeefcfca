use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tile_snake::game::GameConfig;
use tile_snake::logging;
use tile_snake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Classic Snake on a tile board")]
struct Cli {
    /// JSON file with board, timing and color settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snake updates per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for snake and apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.frames_per_second = fps;
    }
    config.validate()?;

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let mut play_mode = PlayMode::new(config, cli.seed);
    play_mode.run().await?;

    Ok(())
}
