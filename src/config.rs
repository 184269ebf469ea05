//! Configuration file handling.
//!
//! Configuration is optional. Without a file every setting takes its default; with one, the file is
//! a small JSON document and any key it leaves out still takes its default. Command line flags are
//! applied on top of whatever the file says.

use crate::validation::Policy;
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PORT: u16 = 8080;

/// The `Config` object represents the configuration of the app. Create it with `Config::load`,
/// passing the path to a configuration file if there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    path: Option<PathBuf>,
    config_file: ConfigFile,
}

impl Config {
    /// Loads the configuration file at `path`, or returns the defaults when `path` is `None`.
    ///
    /// # Errors
    /// - Returns an error if the file cannot be read or is not a valid configuration file.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = match path {
            Some(path) => ConfigFile::load(path).await?,
            None => ConfigFile::default(),
        };
        debug!("Loaded configuration: {config_file:?}");
        Ok(Self {
            path: path.map(Path::to_path_buf),
            config_file,
        })
    }

    /// Overrides the bind address when `bind` is `Some`.
    pub fn with_bind(mut self, bind: Option<SocketAddr>) -> Self {
        if let Some(bind) = bind {
            self.config_file.bind = bind;
        }
        self
    }

    /// The configuration file this was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bind(&self) -> SocketAddr {
        self.config_file.bind
    }

    /// The validation policy to apply to submitted receipts.
    pub fn policy(&self) -> Policy {
        Policy {
            allow_empty_items: self.config_file.allow_empty_items,
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "bind": "0.0.0.0:8080",
///   "allow_empty_items": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// The address the HTTP server listens on.
    #[serde(default = "default_bind")]
    bind: SocketAddr,

    /// Whether receipts without any items are accepted.
    #[serde(default = "default_allow_empty_items")]
    allow_empty_items: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allow_empty_items: default_allow_empty_items(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    async fn load(path: &Path) -> Result<Self> {
        utils::read_json(path)
            .await
            .with_context(|| format!("Unable to load the configuration file {}", path.display()))
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

fn default_allow_empty_items() -> bool {
    Policy::default().allow_empty_items
}
