#[macro_use]
extern crate tracing;

use chromiumoxide::{
    browser,
    Browser,
    Handler,
};
use eyre::{
    Context as _,
    Result,
};
use meet_ui_config::BrowserConfig;
use std::path::PathBuf;

pub mod driver;
pub mod locator;
pub mod pageobjects;
pub mod participant;
pub mod wait;

#[cfg(test)]
mod testing;

pub use locator::Locator;
pub use participant::{
    BrowserParticipant,
    MeetParticipant,
    RemoteParticipant,
};
pub use wait::{
    TimeoutError,
    WaitOutcome,
    Waiter,
};

/// Names Chromium is installed under, in order of preference.
const BROWSER_BINARIES: [&str; 5] = ["chromium", "chromium-browser", "google-chrome", "google-chrome-stable", "chrome"];

/// Explicit browser binary, for machines where none of the usual names are on `PATH`.
const BROWSER_BINARY_VAR: &str = "MEET_UI_CHROMIUM";

fn get_binary() -> Result<PathBuf> {
    let explicit = std::env::var_os(BROWSER_BINARY_VAR).map(PathBuf::from);
    let binary = pick_binary(explicit, |name| which::which(name).ok())?;
    debug!(?binary, "Using browser binary");
    Ok(binary)
}

fn pick_binary(explicit: Option<PathBuf>, lookup: impl Fn(&str) -> Option<PathBuf>) -> Result<PathBuf> {
    if let Some(binary) = explicit {
        eyre::ensure!(binary.is_file(), "{BROWSER_BINARY_VAR} points to {binary:?}, which is not a file");
        return Ok(binary);
    }

    BROWSER_BINARIES
        .iter()
        .find_map(|name| lookup(name))
        .ok_or_else(|| eyre::eyre!("none of {BROWSER_BINARIES:?} found on PATH, set {BROWSER_BINARY_VAR}"))
}

/// Launches a browser for one participant.
pub(crate) async fn create_browser(browser_config: &BrowserConfig) -> Result<(Browser, Handler)> {
    let binary = get_binary()?;

    let mut config = browser::BrowserConfig::builder();

    if !browser_config.headless {
        config = config.with_head().window_size(1280, 720).viewport(None)
    }

    let config = config
        .user_data_dir(&browser_config.user_data_dir)
        .chrome_executable(binary)
        .args(browser_config.chrome_args())
        .build()
        .map_err(|e| eyre::eyre!(e))
        .context("failed to build browser config")?;

    browser::Browser::launch(config)
        .await
        .context("failed to launch browser")
}
