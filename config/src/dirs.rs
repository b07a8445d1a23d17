//! Where meet-ui looks for `config.yaml` and keeps its data.
//!
//! `MEET_UI_CONFIG_CONFIG` and `MEET_UI_CONFIG_DATA` take precedence over the
//! platform directories.

use directories::ProjectDirs;
use std::{
    env,
    path::PathBuf,
};

lazy_static::lazy_static! {
    static ref PROJECT_DIRS: Option<ProjectDirs> = ProjectDirs::from("org", "meet-ui", "meet-ui");
}

fn override_var(kind: &str) -> String {
    format!("{}_{kind}", env!("CARGO_CRATE_NAME").to_uppercase())
}

fn resolve(kind: &str, platform: impl FnOnce(&ProjectDirs) -> PathBuf) -> PathBuf {
    env::var_os(override_var(kind))
        .map(PathBuf::from)
        .or_else(|| PROJECT_DIRS.as_ref().map(platform))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{}", kind.to_lowercase())))
}

pub fn get_data_dir() -> PathBuf {
    resolve("DATA", |dirs| dirs.data_local_dir().to_path_buf())
}

pub fn get_config_dir() -> PathBuf {
    resolve("CONFIG", |dirs| dirs.config_local_dir().to_path_buf())
}
