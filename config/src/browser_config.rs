use std::path::{
    Path,
    PathBuf,
};
use temp_dir::TempDir;

#[derive(Clone, Debug)]
pub enum UserDataDir {
    /// Use a temporary directory for user data. Will be deleted on drop.
    Temp { temp_dir: TempDir, user_data_dir: PathBuf },
    /// Use a custom directory for user data.
    Custom(PathBuf),
}

impl AsRef<Path> for UserDataDir {
    fn as_ref(&self) -> &Path {
        match self {
            UserDataDir::Temp { user_data_dir, .. } => user_data_dir,
            UserDataDir::Custom(user_data_dir) => user_data_dir,
        }
    }
}

impl UserDataDir {
    pub fn temp() -> std::io::Result<Self> {
        let temp_dir = TempDir::with_prefix("meet-ui-browser")?;
        let user_data_dir = temp_dir.path().to_path_buf();
        Ok(Self::Temp {
            temp_dir,
            user_data_dir,
        })
    }
}

/// Everything needed to launch one Chromium instance.
#[derive(Clone, Debug)]
pub struct BrowserConfig {
    pub user_data_dir: UserDataDir,
    pub headless: bool,
    pub fake_media: bool,
}

impl BrowserConfig {
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = vec!["--no-startup-window".to_string()];
        if self.fake_media {
            args.extend([
                "--no-sandbox".to_string(),
                "--use-fake-ui-for-media-stream".to_string(),
                "--use-fake-device-for-media-stream".to_string(),
            ]);
        }
        args
    }
}

impl TryFrom<&super::ParticipantConfig> for BrowserConfig {
    type Error = std::io::Error;

    fn try_from(config: &super::ParticipantConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            user_data_dir: UserDataDir::temp()?,
            headless: config.app_config.headless,
            fake_media: config.app_config.fake_media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fake_media_adds_device_flags() {
        let config = BrowserConfig {
            user_data_dir: UserDataDir::Custom(PathBuf::from("/tmp/profile")),
            headless: true,
            fake_media: true,
        };
        assert_eq!(
            config.chrome_args(),
            vec![
                "--no-startup-window",
                "--no-sandbox",
                "--use-fake-ui-for-media-stream",
                "--use-fake-device-for-media-stream",
            ]
        );

        let config = BrowserConfig {
            fake_media: false,
            ..config
        };
        assert_eq!(config.chrome_args(), vec!["--no-startup-window"]);
    }
}
