/// Options shared by every scenario. They override `config.yaml`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Args {
    /// Conference room URL to join.
    #[clap(long, value_name = "URL", env = "MEET_UI_URL")]
    pub url: Option<String>,

    /// Run Chromium without a window.
    #[clap(long, value_name = "BOOL")]
    pub headless: Option<bool>,

    /// Enable or disable fake WebRTC devices/UI.
    ///   - adds `--use-fake-device-for-media-stream`
    ///   - adds `--use-fake-ui-for-media-stream`
    #[clap(long = "fake-media", value_name = "BOOL")]
    pub fake_media: Option<bool>,

    /// Interval between two evaluations of a pending UI condition.
    #[clap(long = "poll-interval-ms", value_name = "MS")]
    pub poll_interval_ms: Option<u64>,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(url) = &self.url {
                cache.insert("url".to_string(), url.clone().into());
            }
            if let Some(headless) = self.headless {
                cache.insert("headless".to_string(), headless.into());
            }
            if let Some(fake_media) = self.fake_media {
                cache.insert("fake_media".to_string(), fake_media.into());
            }
            if let Some(poll_interval_ms) = self.poll_interval_ms {
                cache.insert("timeouts.poll_interval_ms".to_string(), poll_interval_ms.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let config_dir_path = crate::get_config_dir().display().to_string();
    let data_dir_path = crate::get_data_dir().display().to_string();

    format!(
        "{}

Config directory: {config_dir_path}
Data directory: {data_dir_path}",
        env!("CARGO_PKG_VERSION")
    )
}
