//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Routing ===
    /// Prefix for the application resource routes (e.g. `/ums/v1`).
    #[serde(default = "default_api_base_path")]
    pub api_base_path: String,

    /// Mount point of the Swagger UI; the OpenAPI JSON is served at `<url>.json`.
    #[serde(default = "default_api_spec_url")]
    pub api_spec_url: String,

    // === Store ===
    /// Create one application at startup.
    #[serde(default = "default_true")]
    pub seed_initial_application: bool,

    /// Name of the application created at startup.
    #[serde(default = "default_initial_application_name")]
    pub initial_application_name: String,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_base_path() -> String {
    "/ums/v1".to_string()
}

fn default_api_spec_url() -> String {
    "/api/spec".to_string()
}

fn default_true() -> bool {
    true
}

fn default_initial_application_name() -> String {
    "Initial Application".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_base_path: default_api_base_path(),
            api_spec_url: default_api_spec_url(),
            seed_initial_application: default_true(),
            initial_application_name: default_initial_application_name(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.api_base_path.starts_with('/') || self.api_base_path.ends_with('/') {
            return Err("API_BASE_PATH must start with '/' and must not end with '/'".to_string());
        }

        if !self.api_spec_url.starts_with('/') || self.api_spec_url.ends_with('/') {
            return Err("API_SPEC_URL must start with '/' and must not end with '/'".to_string());
        }

        if self.api_spec_url == self.api_base_path
            || self
                .api_spec_url
                .starts_with(&format!("{}/", self.api_base_path))
        {
            return Err("API_SPEC_URL must not live under API_BASE_PATH".to_string());
        }

        if self.seed_initial_application && self.initial_application_name.is_empty() {
            return Err(
                "INITIAL_APPLICATION_NAME is required when SEED_INITIAL_APPLICATION is set"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log filter directive: crate debug logging when `cli_verbose` or
    /// `VERBOSE` is set, `RUST_LOG` otherwise.
    pub fn log_directive(&self, cli_verbose: bool) -> String {
        if cli_verbose || self.verbose {
            "ums_api=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Path of the OpenAPI JSON document.
    pub fn openapi_json_url(&self) -> String {
        format!("{}.json", self.api_spec_url)
    }
}
