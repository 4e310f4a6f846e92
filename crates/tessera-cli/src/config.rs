//! Locating and reading the CLI's TOML configuration.
//!
//! A configuration file holds up to two tables, `[layout]` and `[style]`,
//! matching the sections of [`AppConfig`]. Each table is read on its own so
//! that an error names the section it came from; a missing table keeps its
//! defaults and unknown tables are ignored with a warning.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;
use toml::{Table, Value};

use tessera::{
    TesseraError,
    config::{AppConfig, LayoutConfig, StyleConfig},
};

/// Project-local configuration, relative to the working directory.
const LOCAL_CONFIG: &str = "tessera/config.toml";

const LAYOUT_SECTION: &str = "layout";
const STYLE_SECTION: &str = "style";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file `{}` does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid TOML: {0}")]
    Syntax(String),

    #[error("invalid [{section}] section: {message}")]
    Section {
        section: &'static str,
        message: String,
    },
}

impl From<ConfigError> for TesseraError {
    fn from(err: ConfigError) -> Self {
        TesseraError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Explicit,
    Local,
    Platform,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "command line",
            Self::Local => "working directory",
            Self::Platform => "user config directory",
        })
    }
}

#[derive(Debug)]
struct ConfigFile {
    path: PathBuf,
    origin: Origin,
}

/// Loads the configuration the CLI should run with.
///
/// An explicit path wins and must exist. Otherwise `tessera/config.toml`
/// in the working directory is tried, then `config.toml` in the platform
/// config directory; with neither present the defaults are used.
///
/// # Errors
///
/// Returns [`TesseraError::Config`] when the explicit file is missing, a
/// file cannot be read, or a section does not deserialize.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TesseraError> {
    let file = match explicit_path {
        Some(path) => ConfigFile {
            path: path.as_ref().to_path_buf(),
            origin: Origin::Explicit,
        },
        None => match discover() {
            Some(file) => file,
            None => {
                debug!("No configuration file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    info!(path = file.path.display().to_string(), origin:% = file.origin; "Loading configuration");
    let config = read_config(&file.path)?;
    debug!(
        snap_to_grid = config.layout().snap_to_grid(),
        drag_forces:? = config.layout().drag_forces(),
        history_limit = config.layout().history_limit(),
        tracking_pixel = config.style().tracking_pixel();
        "Configuration loaded"
    );
    Ok(config)
}

/// First existing implicit configuration file.
fn discover() -> Option<ConfigFile> {
    let local = ConfigFile {
        path: PathBuf::from(LOCAL_CONFIG),
        origin: Origin::Local,
    };
    let platform = ProjectDirs::from("com", "tessera", "tessera").map(|dirs| ConfigFile {
        path: dirs.config_dir().join("config.toml"),
        origin: Origin::Platform,
    });

    std::iter::once(local).chain(platform).find(|file| {
        let found = file.path.is_file();
        if !found {
            debug!(path = file.path.display().to_string(), origin:% = file.origin; "No configuration here");
        }
        found
    })
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let mut table: Table =
        toml::from_str(content).map_err(|err| ConfigError::Syntax(err.message().to_string()))?;

    let layout: LayoutConfig = section(&mut table, LAYOUT_SECTION)?;
    let style: StyleConfig = section(&mut table, STYLE_SECTION)?;

    for unknown in table.keys() {
        warn!(section = unknown.as_str(); "Ignoring unknown configuration section");
    }
    Ok(AppConfig::new(layout, style))
}

/// Removes `name` from `table` and deserializes it, defaulting when absent.
fn section<T>(table: &mut Table, name: &'static str) -> Result<T, ConfigError>
where
    T: Default + DeserializeOwned,
{
    match table.remove(name) {
        None => Ok(T::default()),
        Some(value @ Value::Table(_)) => value.try_into().map_err(|err: toml::de::Error| {
            ConfigError::Section {
                section: name,
                message: err.message().to_string(),
            }
        }),
        Some(other) => Err(ConfigError::Section {
            section: name,
            message: format!("expected a table, found {}", other.type_str()),
        }),
    }
}
