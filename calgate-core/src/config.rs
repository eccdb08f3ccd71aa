//! Gateway configuration.
//!
//! Loaded from defaults, then an optional TOML file, then `CALGATE_*`
//! environment variables (`CALGATE_STORES__IDENTITY=http://...`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::store::Store;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Base URLs of the downstream stores, each including its `/api` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreUrls {
    pub identity: String,
    pub events: String,
    pub invites: String,
    pub rsvp: String,
    pub shares: String,
}

impl Default for StoreUrls {
    fn default() -> Self {
        StoreUrls {
            identity: "http://auth-service:8000/api".to_string(),
            events: "http://events-service:8000/api".to_string(),
            invites: "http://invites-service:8000/api".to_string(),
            rsvp: "http://rsvp-service:8000/api".to_string(),
            shares: "http://calendars-service:8000/api".to_string(),
        }
    }
}

impl StoreUrls {
    pub fn get(&self, store: Store) -> &str {
        match store {
            Store::Identity => &self.identity,
            Store::Events => &self.events,
            Store::Invites => &self.invites,
            Store::Rsvp => &self.rsvp,
            Store::Shares => &self.shares,
        }
    }

    /// Parse the configured base URL for `store`.
    pub fn parse(&self, store: Store) -> Result<Url, ConfigError> {
        let url = Url::parse(self.get(store)).map_err(|e| ConfigError::InvalidUrl {
            store,
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                store,
                reason: "not a base URL".to_string(),
            });
        }

        Ok(url)
    }
}

/// `CALGATE_STORES__IDENTITY` -> `stores.identity`
fn environment() -> Environment {
    Environment::with_prefix("CALGATE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Applies to every lookup and forwarded call. Expiry counts as unreachable.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub stores: StoreUrls,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            listen: default_listen(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            stores: StoreUrls::default(),
        }
    }
}

impl GatewayConfig {
    /// `<config dir>/calgate/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("calgate").join("config.toml"))
    }

    /// Load configuration. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let config: GatewayConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Every store URL must parse as a base URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for store in Store::ALL {
            self.stores.parse(store)?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
