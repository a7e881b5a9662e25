use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider, GameConfig, Validate, YamlConfigSerializer};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "puzzle2048_config.yaml";

#[derive(Parser, Debug)]
#[command(name = "puzzle2048", about = "Sliding tile puzzle in the terminal")]
pub struct Args {
    /// YAML config file; defaults to one next to the executable
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the saved game and leaderboard
    #[arg(long)]
    pub state_dir: Option<String>,

    /// Delay per cell travelled when animating a move
    #[arg(long, default_value_t = 15)]
    pub step_delay_ms: u64,

    #[arg(long)]
    pub use_log_prefix: bool,

    #[arg(long)]
    pub verbose: bool,
}

pub struct ClientSettings {
    pub game: GameConfig,
    pub step_delay: Duration,
}

fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    let path = path.map(str::to_string).unwrap_or_else(default_config_path);
    ConfigManager::from_yaml_file(path)
}

impl ClientSettings {
    /// File values first, then command line overrides.
    pub fn resolve(args: &Args, file_config: GameConfig) -> Result<Self, String> {
        let mut game = file_config;
        if let Some(seed) = args.seed {
            game.seed = Some(seed);
        }
        if let Some(ref state_dir) = args.state_dir {
            game.state_dir = state_dir.clone();
        }
        game.validate()?;

        Ok(Self {
            game,
            step_delay: Duration::from_millis(args.step_delay_ms),
        })
    }
}
