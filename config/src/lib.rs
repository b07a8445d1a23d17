#[macro_use]
extern crate tracing;

mod args;
mod browser_config;
mod dirs;
mod participant_config;
mod timeouts;

pub use args::{
    version,
    Args,
};
pub use browser_config::{
    BrowserConfig,
    UserDataDir,
};
pub use dirs::{
    get_config_dir,
    get_data_dir,
};
pub use participant_config::{
    generate_random_name,
    ParticipantConfig,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::Path;
pub use timeouts::Timeouts;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<url::Url>,
    #[serde(default)]
    pub headless: bool,
    #[serde(default)]
    pub fake_media: bool,
    #[serde(default)]
    pub timeouts: Timeouts,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");
const CONFIG_FILE: &str = "config.yaml";

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Layers the embedded defaults, `config.yaml` from the config directory
    /// and finally the command line.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        Self::load(args, &get_config_dir())
    }

    #[instrument(level = "debug", skip(args))]
    fn load(args: Args, config_dir: &Path) -> Result<Self, config::ConfigError> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(
                config::File::from(config_dir.join(CONFIG_FILE))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(args)
            .build()?
            .try_deserialize()?;
        cfg.timeouts.validate().map_err(config::ConfigError::Message)?;

        debug!(url = ?cfg.url, headless = cfg.headless, "Loaded configuration");
        Ok(cfg)
    }
}
