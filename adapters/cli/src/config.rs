use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use pushbox_core::{MoveTiming, DEFAULT_MOVE_SPEED};
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Settings read from the CLI configuration file.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CliConfig {
    /// Directory that custom levels are listed from and saved into.
    pub levels_dir: PathBuf,
    /// Move speed handed to the world when a playthrough starts.
    pub move_speed: f32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("levels"),
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

impl CliConfig {
    /// Returns the configuration path used when none is given explicitly.
    #[must_use]
    pub(crate) fn default_path() -> PathBuf {
        PathBuf::from("pushbox.toml")
    }

    /// Loads the configuration at `path`, or at the default path when `None`.
    ///
    /// A missing default file yields the defaults; an explicitly requested
    /// file must exist.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read config at {}", path.display()));
            }
        };

        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        parse_config(&contents, &base)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Timing derived from the configured move speed.
    #[must_use]
    pub(crate) fn timing(&self) -> MoveTiming {
        MoveTiming::new(self.move_speed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    levels_dir: Option<PathBuf>,
    move_speed: Option<f32>,
}

fn parse_config(contents: &str, base_path: &Path) -> Result<CliConfig> {
    let file: ConfigFile =
        toml::from_str(contents).context("failed to parse config toml contents")?;
    if file.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected {}",
            file.version,
            SUPPORTED_CONFIG_VERSION
        );
    }

    let defaults = CliConfig::default();
    let levels_dir = file
        .levels_dir
        .map(|dir| base_path.join(dir))
        .unwrap_or(defaults.levels_dir);
    let move_speed = file.move_speed.unwrap_or(defaults.move_speed);
    if !move_speed.is_finite() || move_speed <= 0.0 {
        bail!("move_speed must be a positive number, got {move_speed}");
    }

    Ok(CliConfig {
        levels_dir,
        move_speed,
    })
}
