use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Validate;

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 10;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
    pub animation_timeout_ms: u64,
    pub state_dir: String,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn animation_timeout(&self) -> Duration {
        Duration::from_millis(self.animation_timeout_ms)
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "Grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(format!(
                "Four probability must be between 0.0 and 1.0, got {}",
                self.four_probability
            ));
        }
        if self.animation_timeout_ms == 0 || self.animation_timeout_ms > 60_000 {
            return Err(format!(
                "Animation timeout must be between 1ms and 60000ms, got {}",
                self.animation_timeout_ms
            ));
        }
        if self.state_dir.is_empty() {
            return Err("State directory must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            four_probability: 0.1,
            animation_timeout_ms: 2000,
            state_dir: "puzzle2048_data".to_string(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigManager, ConfigSerializer, FileContentConfigProvider,
        YamlConfigSerializer,
    };

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_puzzle2048_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = GameConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: GameConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: GameConfig = serializer.deserialize("grid_size: 5\nseed: 9\n").unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.animation_timeout_ms, 2000);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.grid_size = 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.four_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.animation_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.state_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_gives_default_config() {
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::from_yaml_file(get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_first_run_writes_default_config() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(manager.get_or_create_config().unwrap(), GameConfig::default());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("grid_size: 4"));
        let fresh: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(fresh.get_config().unwrap(), GameConfig::default());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_existing_config_is_not_overwritten() {
        let path = get_temp_file_path();
        std::fs::write(&path, "grid_size: 5
").unwrap();
        let manager: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(manager.get_or_create_config().unwrap().grid_size, 5);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "grid_size: 5\n");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unwritable_config_location_falls_back_to_defaults() {
        let path = get_temp_file_path().join("missing_dir").join("config.yaml");
        let manager: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(manager.get_or_create_config().unwrap(), GameConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_manager_round_trip_through_file() {
        let path = get_temp_file_path();
        let config = GameConfig {
            grid_size: 6,
            seed: Some(123),
            ..GameConfig::default()
        };

        let manager: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        manager.set_config(&config).unwrap();

        let fresh: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(fresh.get_config().unwrap(), config);

        let provider = FileContentConfigProvider::new(&path);
        assert!(provider.get_config_content().unwrap().unwrap().contains("grid_size: 6"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "grid_size: 42\n").unwrap();
        let manager: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(&path);
        assert!(manager.get_config().is_err());
        let _ = std::fs::remove_file(path);
    }
}
