use anyhow::Result;
use clap::{Parser, ValueEnum};
use shore_snake::game::GameConfig;
use shore_snake::modes::{HumanMode, TrainConfig, TrainMode, WatchMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shore_snake")]
#[command(version, about = "Screen-wrapping snake arcade game with a trainable agent")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Board width in board units
    #[arg(long, default_value = "400")]
    width: i32,

    /// Board height in board units
    #[arg(long, default_value = "400")]
    height: i32,

    /// Cell size; board dimensions must be multiples of this
    #[arg(long, default_value = "20")]
    cell: i32,

    /// Trained agent file (read by watch, written by train)
    #[arg(long, default_value = "models/agent.json")]
    model: PathBuf,

    /// Number of episodes to train (train mode only)
    #[arg(long, default_value = "5000")]
    episodes: usize,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Human,
    /// Watch a trained agent play
    Watch,
    /// Train an agent
    Train,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        board_width: cli.width,
        board_height: cli.height,
        cell_size: cli.cell,
        ..Default::default()
    };

    match cli.mode {
        Mode::Human => {
            let mut mode = HumanMode::new(config)?;
            mode.run().await?;
        }
        Mode::Watch => {
            let mut mode = WatchMode::new(&cli.model, config)?;
            mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.episodes, cli.model);
            train_config.game_config = config;
            let mut mode = TrainMode::new(train_config)?;
            mode.run()?;
        }
    }

    Ok(())
}
