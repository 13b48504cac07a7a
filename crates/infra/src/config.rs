//! Process configuration, read once at startup.
//!
//! Every setting has a development default. A missing variable is logged at
//! `info`, an unparsable one at `warn`; neither aborts startup.

use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://mydata.db";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Private in-memory database with a single connection (tests, demos).
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([0, 0, 0, 0], 8080));
        Self {
            bind_addr: load(&lookup, "VENDO_BIND_ADDR", DEFAULT_BIND_ADDR, default_addr),
            database: DatabaseConfig {
                url: load(
                    &lookup,
                    "VENDO_DATABASE_URL",
                    DEFAULT_DATABASE_URL,
                    DEFAULT_DATABASE_URL.to_string(),
                ),
                max_connections: load(
                    &lookup,
                    "VENDO_DB_MAX_CONNECTIONS",
                    "5",
                    DEFAULT_MAX_CONNECTIONS,
                )
                .max(1),
            },
            public_dir: load(
                &lookup,
                "VENDO_PUBLIC_DIR",
                DEFAULT_PUBLIC_DIR,
                PathBuf::from(DEFAULT_PUBLIC_DIR),
            ),
        }
    }

    /// Directory scanned for catalog images.
    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join("images")
    }
}

fn load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default_text: &str,
    default: T,
) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default_text}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("invalid {key} value {raw:?} ({e}), using default: {default_text}");
        default
    })
}
