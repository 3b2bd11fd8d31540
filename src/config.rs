//! Server settings.
//!
//! Settings are read once at startup, in increasing precedence, from built-in
//! defaults, an optional TOML file and `ROSTER_*` environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use config::{Config, Environment, File};
use roster_core::RosterConfig;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "ROSTER";

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 8787);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,

    /// Serve feeds as if it were always this day instead of reading the clock.
    pub today: Option<NaiveDate>,

    #[serde(flatten)]
    pub roster: RosterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind: SocketAddr::from(DEFAULT_BIND),
            today: None,
            roster: RosterConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or the default config file if it exists)
    /// and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        let settings: Settings = builder
            .add_source(env)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.roster.validate()?;

        Ok(settings)
    }
}

/// Default config file path (~/.config/roster-cycles/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roster-cycles").join("config.toml"))
}
