//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `PODIUM_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::scoring::TaskType;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PODIUM_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// SQLite database file for submissions. Default: `./podium.db`.
    pub database_path: PathBuf,

    /// Directory uploaded CSVs are stored under. Default: `./uploads`.
    pub upload_dir: PathBuf,

    /// Ground-truth labels CSV. Default: `./true_labels.csv`.
    pub reference_path: PathBuf,

    /// Student roster CSV. Default: `./roster.csv`.
    pub roster_path: PathBuf,

    /// Task type for this leaderboard. Default: classification.
    pub task_type: TaskType,

    /// Max submissions per client IP per minute. Default: `20`.
    pub rate_limit_per_minute: u32,

    /// Upper bound on upload body size in bytes. Default: `5 MiB`.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            database_path: PathBuf::from("./podium.db"),
            upload_dir: PathBuf::from("./uploads"),
            reference_path: PathBuf::from("./true_labels.csv"),
            roster_path: PathBuf::from("./roster.csv"),
            task_type: TaskType::Classification,
            rate_limit_per_minute: 20,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "PODIUM_PORT";
    const ENV_BIND_ADDR: &'static str = "PODIUM_BIND_ADDR";
    const ENV_DATABASE_PATH: &'static str = "PODIUM_DATABASE_PATH";
    const ENV_UPLOAD_DIR: &'static str = "PODIUM_UPLOAD_DIR";
    const ENV_REFERENCE_PATH: &'static str = "PODIUM_REFERENCE_PATH";
    const ENV_ROSTER_PATH: &'static str = "PODIUM_ROSTER_PATH";
    const ENV_TASK_TYPE: &'static str = "PODIUM_TASK_TYPE";
    const ENV_RATE_LIMIT: &'static str = "PODIUM_RATE_LIMIT_PER_MIN";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "PODIUM_MAX_UPLOAD_BYTES";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let database_path = Self::parse_path_from_env(Self::ENV_DATABASE_PATH, defaults.database_path);
        let upload_dir = Self::parse_path_from_env(Self::ENV_UPLOAD_DIR, defaults.upload_dir);
        let reference_path =
            Self::parse_path_from_env(Self::ENV_REFERENCE_PATH, defaults.reference_path);
        let roster_path = Self::parse_path_from_env(Self::ENV_ROSTER_PATH, defaults.roster_path);
        let task_type = match env::var(Self::ENV_TASK_TYPE) {
            Ok(value) => TaskType::parse(&value),
            Err(_) => defaults.task_type,
        };
        let rate_limit_per_minute =
            Self::parse_u32_from_env(Self::ENV_RATE_LIMIT, defaults.rate_limit_per_minute)?;
        let max_upload_bytes =
            Self::parse_usize_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            database_path,
            upload_dir,
            reference_path,
            roster_path,
            task_type,
            rate_limit_per_minute,
            max_upload_bytes,
        })
    }

    /// Validates basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_dir.exists() && !self.upload_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.upload_dir.clone(),
            });
        }

        if self.roster_path.exists() && !self.roster_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.roster_path.clone(),
            });
        }

        if self.rate_limit_per_minute == 0 {
            return Err(ConfigError::InvalidRateLimit);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(name: &'static str, default: PathBuf) -> PathBuf {
        match env::var(name) {
            Ok(value) if !value.is_empty() => PathBuf::from(value),
            _ => default,
        }
    }

    fn parse_u32_from_env(name: &'static str, default: u32) -> Result<u32, ConfigError> {
        match env::var(name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::NumberParseError {
                name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::NumberParseError {
                name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
