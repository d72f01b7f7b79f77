//! Runtime configuration read from the process environment.
//!
//! Values are resolved once in `main` and handed to the API client and the
//! report formatter, so nothing below this module touches `std::env`.

use std::env;
use std::time::Duration;

/// Kea Control Agent used when `KEA_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://10.200.1.68:8000/";
/// Request timeout in seconds used when `KEA_API_TIMEOUT` is unset or invalid.
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;
/// log4rs config file used when `KEA_LOG_CONFIG` is not set.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

pub const ENV_API_URL: &str = "KEA_API_URL";
pub const ENV_TIMEOUT: &str = "KEA_API_TIMEOUT";
pub const ENV_DEBUG: &str = "KEA_DEBUG";
pub const ENV_LOG_CONFIG: &str = "KEA_LOG_CONFIG";

/// Strings that switch `KEA_DEBUG` off. Anything else switches it on.
const FALSY: [&str; 6] = ["0", "", "false", "False", "no", "No"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Kea Control Agent.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Emit the `kea_dhcp_debug` section.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => parse_timeout(&raw).unwrap_or_else(|e| {
                log::warn!("{ENV_TIMEOUT}={raw:?} ignored: {e}");
                Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)
            }),
            None => Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        };
        let debug = lookup(ENV_DEBUG)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Config {
            api_url,
            timeout,
            debug,
        }
    }
}

/// Path of the log4rs YAML file.
pub fn log_config_path() -> String {
    env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string())
}

fn is_truthy(value: &str) -> bool {
    !FALSY.contains(&value)
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("not a number: {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("out of range: {secs}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("out of range: {e}"))
}
