use serde::{Deserialize, Serialize};

use crate::service::scoring::{DuplicatePolicy, MatchParams};

/// Application configuration, loaded from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub matching: MatchParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/losthere".to_string()),
            },
            matching: MatchParams::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables. The match weights and
    /// threshold are tunable here so calibration never needs a code change.
    pub fn from_env() -> Self {
        let defaults = MatchParams::default();
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/losthere".to_string()),
            },
            matching: MatchParams {
                brand_weight: env_u32("MATCH_BRAND_WEIGHT", defaults.brand_weight),
                model_weight: env_u32("MATCH_MODEL_WEIGHT", defaults.model_weight),
                color_weight: env_u32("MATCH_COLOR_WEIGHT", defaults.color_weight),
                characteristics_weight: env_u32(
                    "MATCH_CHARACTERISTICS_WEIGHT",
                    defaults.characteristics_weight,
                ),
                location_weight: env_u32("MATCH_LOCATION_WEIGHT", defaults.location_weight),
                threshold: env_u32("MATCH_THRESHOLD", defaults.threshold),
                duplicate_policy: std::env::var("DUPLICATE_POLICY")
                    .ok()
                    .and_then(|p| p.parse::<DuplicatePolicy>().ok())
                    .unwrap_or(defaults.duplicate_policy),
            },
        }
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
