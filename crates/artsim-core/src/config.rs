//! Configuration management
//!
//! Handles configuration from environment variables with sensible
//! defaults for development. Index and search tuning values are
//! deployment constants, not request-configurable.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Vector store configuration
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins (comma-separated); empty means allow any
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Qdrant
        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.store.qdrant_url = url;
        }
        if let Ok(name) = std::env::var("ARTICLE_COLLECTION") {
            config.store.collection = name;
        }
        if let Ok(path) = std::env::var("SEED_PATH") {
            config.store.seed_path = path;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec![],
        }
    }
}

/// Vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Qdrant gRPC URL
    pub qdrant_url: String,

    /// Collection name (singleton per deployment)
    pub collection: String,

    /// Path to the seed dataset, read once at bootstrap
    pub seed_path: String,

    /// Client call timeout in seconds
    pub timeout_secs: u64,

    /// HNSW graph connectivity
    pub hnsw_m: u64,

    /// HNSW build-time beam width
    pub hnsw_ef_construct: u64,

    /// HNSW search-time beam width
    pub hnsw_ef_search: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            qdrant_url: "http://localhost:6334".to_string(),
            collection: "articles".to_string(),
            seed_path: "data.json".to_string(),
            timeout_secs: 30,
            hnsw_m: 16,
            hnsw_ef_construct: 128,
            hnsw_ef_search: 256,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.collection, "articles");
        assert_eq!(config.store.qdrant_url, "http://localhost:6334");
    }

    #[test]
    fn default_tuning_constants() {
        let store = StoreConfig::default();
        assert_eq!(store.hnsw_m, 16);
        assert_eq!(store.hnsw_ef_construct, 128);
        assert_eq!(store.hnsw_ef_search, 256);
    }
}
