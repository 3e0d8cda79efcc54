// Configuration management from environment variables

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Configuration settings for the Greed Line server
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Storage configuration
    pub profiles_csv_path: PathBuf,

    // Cookie configuration
    pub cookie_prefix: String,

    // Shown next to tomorrow's date on the confirmation message
    pub results_time: String,
}

impl AppConfig {
    /// Creates configuration instance from environment variables with defaults
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .unwrap_or(3000);
        let profiles_csv_path = env::var("PROFILES_CSV_PATH")
            .unwrap_or_else(|_| "data/demo_amount.csv".to_string())
            .into();
        let cookie_prefix = env::var("COOKIE_PREFIX").unwrap_or_else(|_| "wtwtt_".to_string());
        let results_time = env::var("RESULTS_TIME").unwrap_or_else(|_| "12:00 EDT".to_string());

        Self {
            host,
            port,
            profiles_csv_path,
            cookie_prefix,
            results_time,
        }
    }

    /// Returns formatted server address string (host:port)
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full cookie name for a key, with the configured prefix applied
    pub fn cookie_name(&self, key: &str) -> String {
        format!("{}{}", self.cookie_prefix, key)
    }
}
