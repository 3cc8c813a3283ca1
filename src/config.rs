use std::net::IpAddr;

use chrono::FixedOffset;
use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreBackend,
    pub display_zone: DisplayZone,
    pub max_body_size: usize,
    pub rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
    Rest(RestConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

/// Timezone used when rendering timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("FEEDBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FEEDBOARD_HOST: {e}"))?;

        let port: u16 = env_or("FEEDBOARD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FEEDBOARD_PORT: {e}"))?;

        let store = match env_or("FEEDBOARD_STORE", "memory").as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: env_required("DATABASE_URL")?,
            },
            "rest" => StoreBackend::Rest(RestConfig {
                url: env_required("FEEDBOARD_REST_URL")?,
                api_key: env_required("FEEDBOARD_REST_KEY")?,
                table: env_or("FEEDBOARD_REST_TABLE", "feedback"),
            }),
            other => {
                return Err(format!(
                    "Invalid FEEDBOARD_STORE '{other}' (expected memory, postgres or rest)"
                ));
            }
        };

        let display_zone = match std::env::var("FEEDBOARD_DISPLAY_UTC_OFFSET") {
            Ok(raw) if !raw.trim().is_empty() => DisplayZone::Fixed(
                parse_utc_offset(raw.trim())
                    .ok_or_else(|| format!("Invalid FEEDBOARD_DISPLAY_UTC_OFFSET: {raw}"))?,
            ),
            _ => DisplayZone::Local,
        };

        let max_body_size: usize = env_or("FEEDBOARD_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid FEEDBOARD_MAX_BODY_SIZE: {e}"))?;

        let rate_limit: u32 = env_or("FEEDBOARD_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid FEEDBOARD_RATE_LIMIT: {e}"))?;

        let rate_limit_window_secs: u64 = env_or("FEEDBOARD_RATE_LIMIT_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid FEEDBOARD_RATE_LIMIT_WINDOW_SECS: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("FEEDBOARD_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid FEEDBOARD_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("FEEDBOARD_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            store,
            display_zone,
            max_body_size,
            rate_limit,
            rate_limit_window_secs,
            trusted_proxies,
            log_level,
        })
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HH` or `Z`.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (rest.parse::<i32>().ok()?, 0),
    };

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
