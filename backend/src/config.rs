//! Runtime configuration, read from the environment (and an optional `.env` file).
//!
//! | Variable             | Default      | Meaning                                        |
//! |----------------------|--------------|------------------------------------------------|
//! | `CORAL_HOST`         | `127.0.0.1`  | Interface to bind.                             |
//! | `CORAL_PORT`         | `3000`       | Port to bind.                                  |
//! | `CORAL_DATA_DIR`     | `coral-data` | Store root; its last component is the URL prefix of record files. |
//! | `CORAL_OPEN_BROWSER` | `false`      | Open the catalog in the default browser once the server is up. |

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "coral-data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("data directory {0:?} has no usable final path component")]
    DataDir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// `/<data-dir-name>`, the mount point of record files.
    pub public_prefix: String,
    pub open_browser: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("CORAL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("CORAL_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "CORAL_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let data_dir = PathBuf::from(
            lookup("CORAL_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );
        let public_prefix = public_prefix_for(&data_dir)?;

        let open_browser = match lookup("CORAL_OPEN_BROWSER") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: "CORAL_OPEN_BROWSER",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            public_prefix,
            open_browser,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn public_prefix_for(data_dir: &Path) -> Result<String, ConfigError> {
    data_dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("/{}", name))
        .ok_or_else(|| ConfigError::DataDir(data_dir.to_path_buf()))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
