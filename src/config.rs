//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::models::CohortInfo;

/// What create/update requests do to the store.
///
/// Parsed case-insensitively, both from `WRITE_MODE` and from `--write-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WriteMode {
    /// Validate and echo the input, leave the store untouched.
    #[default]
    Echo,
    /// Validate, then insert/update through the repository.
    Persist,
}

impl TryFrom<String> for WriteMode {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated list of allowed CORS origins. Unset means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    // === Store ===
    /// Whether create/update requests mutate the store.
    #[serde(default)]
    pub write_mode: WriteMode,

    // === Cohort Info ===
    #[serde(default = "default_academy")]
    pub cohort_academy: String,

    #[serde(default = "default_curriculum")]
    pub cohort_curriculum: String,

    #[serde(default = "default_cohort_number")]
    pub cohort_number: u32,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

fn default_academy() -> String {
    "4geeks".to_string()
}

fn default_curriculum() -> String {
    "Fullstack Developer(JS|Python)".to_string()
}

fn default_cohort_number() -> u32 {
    44
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: None,
            write_mode: WriteMode::default(),
            cohort_academy: default_academy(),
            cohort_curriculum: default_curriculum(),
            cohort_number: default_cohort_number(),
            rust_log: default_log_level(),
            verbose: false,
            log_json: false,
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
        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if self.cohort_academy.trim().is_empty() {
            return Err("COHORT_ACADEMY must not be empty".to_string());
        }

        self.cors_origins()?;

        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parsed CORS origins. `None` means allow any origin.
    pub fn cors_origins(&self) -> Result<Option<Vec<HeaderValue>>, String> {
        let Some(raw) = self.cors_allowed_origins.as_deref() else {
            return Ok(None);
        };

        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| format!("CORS_ALLOWED_ORIGINS has invalid origin {origin:?}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Cohort info served by `GET /info`.
    pub fn cohort_info(&self) -> CohortInfo {
        CohortInfo {
            academy: self.cohort_academy.clone(),
            curriculum: self.cohort_curriculum.clone(),
            cohort: self.cohort_number,
        }
    }
}
