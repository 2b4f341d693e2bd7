use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can feed a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SUNUY_ENV", "development"))?;

    let bind_addr = parse_addr("SUNUY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SUNUY_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("SUNUY_CATALOG_PATH", "./config/artisans.yaml"));
    let locations_path = PathBuf::from(or_default(
        "SUNUY_LOCATIONS_PATH",
        "./config/locations.yaml",
    ));

    let page_size = parse_usize("SUNUY_PAGE_SIZE", "8")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUNUY_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    let search_delay_ms = parse_u64("SUNUY_SEARCH_DELAY_MS", "300")?;
    let show_more_delay_ms = parse_u64("SUNUY_SHOW_MORE_DELAY_MS", "1500")?;
    let submit_delay_ms = parse_u64("SUNUY_SUBMIT_DELAY_MS", "2000")?;
    let auth_delay_ms = parse_u64("SUNUY_AUTH_DELAY_MS", "1500")?;
    let confirmation_delay_ms = parse_u64("SUNUY_CONFIRMATION_DELAY_MS", "2000")?;

    let rate_limit_max_requests = parse_usize("SUNUY_RATE_LIMIT_MAX_REQUESTS", "120")?;
    let rate_limit_window_secs = parse_u64("SUNUY_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        locations_path,
        page_size,
        search_delay_ms,
        show_more_delay_ms,
        submit_delay_ms,
        auth_delay_ms,
        confirmation_delay_ms,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SUNUY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
