use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_release")]
    pub release: String,
    #[serde(default = "default_rows_endpoint")]
    pub rows_endpoint: String,
    #[serde(default = "default_held_back_file")]
    pub held_back_file: String,
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
    #[serde(default)]
    pub verbose: bool,
}

fn default_dataset() -> String {
    "LIUM/tedlium".to_string()
}

fn default_release() -> String {
    "release3".to_string()
}

fn default_rows_endpoint() -> String {
    "https://datasets-server.huggingface.co/rows".to_string()
}

fn default_held_back_file() -> String {
    "held_back_setup/hb_segments.txt".to_string()
}

fn default_cache_path() -> String {
    "held_back_segments.json".to_string()
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
