use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::HumanMode;
use log::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake game in the terminal")]
struct Cli {
    /// JSON game configuration; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between ticks in milliseconds
    #[arg(long)]
    difficulty: Option<u64>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Log output; the terminal itself is taken by the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.world_width = width;
        }
        if let Some(height) = self.height {
            config.world_height = height;
        }
        if let Some(ms) = self.difficulty {
            config.difficulty_ms = ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;
    let config = cli.game_config()?;
    info!(
        "board {}x{}, tick delay {}ms",
        config.world_width, config.world_height, config.difficulty_ms
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::with_engine(engine);
    human_mode.run().await?;

    Ok(())
}
