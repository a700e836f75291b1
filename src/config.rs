use std::{
    ops::Not,
    path::{Path, PathBuf},
};

use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

fn default_volume() -> f32 {
    100.0
}

fn default_frequency() -> f32 {
    2500.0
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub(crate) time_format: String,
    #[serde(default)]
    pub(crate) theme: Theme,
    /// alarm loudness as a percentage
    #[serde(default = "default_volume")]
    pub(crate) volume: f32,
    /// pitch of the alarm tone in Hz
    #[serde(default = "default_frequency")]
    pub(crate) tone_frequency: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: "%l:%M %p".to_string(),
            theme: Theme::Dark,
            volume: default_volume(),
            tone_frequency: default_frequency(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// read the config file, falling back to the defaults if it is missing
    /// or does not parse
    #[must_use]
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .map_err(|e| log::warn!("couldn't read config file: {e}"))
            .and_then(|config| {
                toml::from_str(&config).map_err(|e| log::warn!("couldn't parse config file: {e}"))
            })
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) {
        let config = toml::to_string(self).expect("couldn't serialize config");
        std::fs::create_dir_all(path.parent().expect("config path has no parent"))
            .expect("couldn't create config dir");
        std::fs::write(path, config).expect("couldn't write config file");
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        let mut path = directories::ProjectDirs::from("", "", "draw_alarm")
            .expect("couldn't get config path")
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        path
    }

    #[must_use]
    pub fn is_config_present() -> bool {
        Self::config_path().exists()
    }
}
