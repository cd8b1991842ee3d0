use std::time::Duration;

use anyhow::{Context, Result};

use crate::page::{LoadSettings, RouteRules};

/// Where page rows are read from.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgres { database_url: String },
    /// PostgREST-compatible endpoint (e.g. Supabase) with its anon key.
    Rest { base_url: String, api_key: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub port: u16,
    pub rust_log: String,
    pub routes: RouteRules,
    pub brand_name: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RouteRules::default();
        let settings = LoadSettings::default();

        Ok(Config {
            store: store_from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            routes: RouteRules {
                admin_prefix: std::env::var("ADMIN_PREFIX").unwrap_or(defaults.admin_prefix),
                demo_slug: std::env::var("DEMO_SLUG").unwrap_or(defaults.demo_slug),
            },
            brand_name: std::env::var("BRAND_NAME").unwrap_or(settings.brand_name),
            fetch_timeout: match std::env::var("FETCH_TIMEOUT_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse::<u64>()
                        .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                Err(_) => settings.fetch_timeout,
            },
        })
    }

    pub fn load_settings(&self) -> LoadSettings {
        LoadSettings {
            brand_name: self.brand_name.clone(),
            fetch_timeout: self.fetch_timeout,
        }
    }

    /// Defaults with a placeholder store, for handler tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let settings = LoadSettings::default();
        Config {
            store: StoreConfig::Postgres {
                database_url: "postgres://localhost/vitrine_test".to_string(),
            },
            port: 0,
            rust_log: "debug".to_string(),
            routes: RouteRules::default(),
            brand_name: settings.brand_name,
            fetch_timeout: settings.fetch_timeout,
        }
    }
}

/// A REST endpoint takes precedence over a direct database connection.
fn store_from_env() -> Result<StoreConfig> {
    match std::env::var("SUPABASE_URL") {
        Ok(base_url) => Ok(StoreConfig::Rest {
            base_url,
            api_key: require_env("SUPABASE_ANON_KEY")?,
        }),
        Err(_) => Ok(StoreConfig::Postgres {
            database_url: require_env("DATABASE_URL")?,
        }),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
