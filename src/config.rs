use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

/// Which store implementation a deployment runs against. `database.url`
/// only matters for the sql backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sql,
    Memory,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:data/videos.db?mode=rwc".to_string()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            store: StoreConfig {
                backend: parse_backend(
                    &env::var("STORE_BACKEND").unwrap_or_else(|_| "sql".to_string()),
                )?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_backend(value: &str) -> anyhow::Result<StoreBackend> {
    match value.to_lowercase().as_str() {
        "sql" | "sqlite" => Ok(StoreBackend::Sql),
        "memory" => Ok(StoreBackend::Memory),
        other => anyhow::bail!(
            "unknown STORE_BACKEND {:?} (expected \"sql\" or \"memory\")",
            other
        ),
    }
}
