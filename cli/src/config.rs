use morpion_engine::SearchSettings;
use morpion_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use morpion_engine::tictactoe::GameMode;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "morpion_config.yaml";

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
) -> ConfigManager<FileContentConfigProvider, CliConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&default_config_path()),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Skips the menu and plays this mode once.
    #[serde(default)]
    pub mode: Option<GameMode>,
    #[serde(default)]
    pub search: SearchSettings,
    /// Fixed seed for the bots; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        self.search.validate()
    }
}
