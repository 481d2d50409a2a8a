//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Listening address
//!
//! ```bash
//! export PORT=3001                 # binds 0.0.0.0:3001
//! export LISTEN="127.0.0.1:8080"   # full address, takes priority over PORT
//! ```
//!
//! ## Optional Variables
//!
//! - `BASE_URL` - Public base for short links (default: `http://<Host header>`)
//! - `BEHIND_PROXY` - Read client address from `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `LOG_COLLECTOR_URL` - Remote log collector base URL (default: `http://localhost:3000`)
//! - `LOG_SHIPPING` - Ship events to the collector at all (default: `true`)
//! - `LOG_RETRY_ATTEMPTS` - Delivery attempts per event (default: 3, range 1-10)
//! - `LOG_RETRY_BASE_DELAY_MS` - Linear backoff base in ms (default: 1000)
//! - `LOG_REQUEST_TIMEOUT_MS` - Per-attempt timeout in ms (default: 5000)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::time::Duration;

use crate::infrastructure::logging::RetryPolicy;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LOG_COLLECTOR_URL: &str = "http://localhost:3000";

/// Upper bound for `LOG_RETRY_BASE_DELAY_MS` and `LOG_REQUEST_TIMEOUT_MS` (one minute).
const MAX_LOG_DELAY_MS: u64 = 60_000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public base URL used to build short links. When `None`, the request's
    /// `Host` header is used with the `http` scheme.
    pub base_url: Option<String>,
    /// When true, client addresses are read from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub log_level: String,
    pub log_format: String,

    // ── Log shipping ────────────────────────────────────────────────────────
    pub log_collector_url: String,
    /// When false, events are accepted and discarded (`LOG_SHIPPING`).
    pub log_shipping_enabled: bool,
    pub log_retry_attempts: u32,
    pub log_retry_base_delay_ms: u64,
    pub log_request_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr()?;

        let base_url = env::var("BASE_URL").ok().filter(|v| !v.trim().is_empty());

        let behind_proxy = env_flag("BEHIND_PROXY").unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let log_collector_url = env::var("LOG_COLLECTOR_URL")
            .unwrap_or_else(|_| DEFAULT_LOG_COLLECTOR_URL.to_string());

        let log_shipping_enabled = env_flag("LOG_SHIPPING").unwrap_or(true);

        let defaults = RetryPolicy::default();

        let log_retry_attempts = env::var("LOG_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_attempts);

        let log_retry_base_delay_ms = env::var("LOG_RETRY_BASE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.base_delay.as_millis() as u64);

        let log_request_timeout_ms = env::var("LOG_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.attempt_timeout.as_millis() as u64);

        Ok(Self {
            listen_addr,
            base_url,
            behind_proxy,
            log_level,
            log_format,
            log_collector_url,
            log_shipping_enabled,
            log_retry_attempts,
            log_retry_base_delay_ms,
            log_request_timeout_ms,
        })
    }

    /// Resolves the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:<PORT>`
    /// 3. `0.0.0.0:3001`
    fn load_listen_addr() -> Result<String> {
        if let Ok(listen) = env::var("LISTEN") {
            return Ok(listen);
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(format!("0.0.0.0:{}", port))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `base_url` or `log_collector_url` is not an http(s) URL
    /// - retry settings are out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if !self.log_collector_url.starts_with("http://")
            && !self.log_collector_url.starts_with("https://")
        {
            anyhow::bail!(
                "LOG_COLLECTOR_URL must start with 'http://' or 'https://', got '{}'",
                self.log_collector_url
            );
        }

        if self.log_retry_attempts == 0 || self.log_retry_attempts > 10 {
            anyhow::bail!(
                "LOG_RETRY_ATTEMPTS must be between 1 and 10, got {}",
                self.log_retry_attempts
            );
        }

        if self.log_retry_base_delay_ms > MAX_LOG_DELAY_MS {
            anyhow::bail!(
                "LOG_RETRY_BASE_DELAY_MS must be at most {}, got {}",
                MAX_LOG_DELAY_MS,
                self.log_retry_base_delay_ms
            );
        }

        if self.log_request_timeout_ms == 0 || self.log_request_timeout_ms > MAX_LOG_DELAY_MS {
            anyhow::bail!(
                "LOG_REQUEST_TIMEOUT_MS must be between 1 and {}, got {}",
                MAX_LOG_DELAY_MS,
                self.log_request_timeout_ms
            );
        }

        Ok(())
    }

    /// Delivery limits for the log shipper.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.log_retry_attempts,
            base_delay: Duration::from_millis(self.log_retry_base_delay_ms),
            attempt_timeout: Duration::from_millis(self.log_request_timeout_ms),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match self.base_url {
            Some(ref base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: from Host header"),
        }

        if self.log_shipping_enabled {
            tracing::info!("  Log collector: {} (enabled)", self.log_collector_url);
            tracing::info!(
                "  Log retry: {} attempts, {}ms base delay, {}ms timeout",
                self.log_retry_attempts,
                self.log_retry_base_delay_ms,
                self.log_request_timeout_ms
            );
        } else {
            tracing::info!("  Log collector: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a boolean flag: `true`/`1` and `false`/`0`, case-insensitive.
fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;

    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
