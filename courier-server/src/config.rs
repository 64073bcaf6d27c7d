//! Server config: listener, message store, logging. Loaded from env.

use std::env;
use std::time::Duration;

use anyhow::Result;
use storage::PoolSettings;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// DATABASE_URL, or `sqlite://<DB_NAME>.db` when unset
    pub database_url: String,
    /// DB_MAX_CONNECTIONS
    pub max_connections: u32,
    /// STORE_TIMEOUT_MS; bounds each store statement and each pool checkout
    pub store_timeout_ms: u64,
    /// LOG_FILE
    pub log_file: String,
}

impl ServerConfig {
    /// Load from environment variables. `port` and `database_url` override PORT and DATABASE_URL.
    pub fn load(port: Option<u16>, database_url: Option<String>) -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = port.unwrap_or_else(|| {
            env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT)
        });
        let database_url = database_url
            .or_else(|| env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| {
                let name = env::var("DB_NAME").unwrap_or_else(|_| "courier".to_string());
                format!("sqlite://{}.db", name)
            });
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let store_timeout_ms = env::var("STORE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/courier-server.log".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            store_timeout_ms,
            log_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is set but empty");
        }
        if self.max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.store_timeout_ms == 0 {
            anyhow::bail!("STORE_TIMEOUT_MS must be greater than 0");
        }
        if self.host.trim().is_empty() {
            anyhow::bail!("HOST is set but empty");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: self.store_timeout(),
        }
    }
}
