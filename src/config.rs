//! On-disk configuration.
//!
//! Read from `<config dir>/waystatus/config.toml` on every invocation; a
//! missing file yields the defaults and a broken one logs a warning and
//! falls back. Only the pomodoro module has settings today.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::Deserialize;

const CONFIG_DIR: &str = "waystatus";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pomodoro: PomodoroConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub enabled: bool,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                warn!("ignoring unreadable config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.pomodoro.clamp();
        Ok(config)
    }
}

impl PomodoroConfig {
    /// Session lengths outside 1..=120 minutes are brought back in range.
    fn clamp(&mut self) {
        self.work_minutes = self.work_minutes.clamp(1, 120);
        self.break_minutes = self.break_minutes.clamp(1, 120);
    }
}
