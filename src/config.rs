use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub sites_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_body_size: usize,
    pub form_timeout: Duration,
    pub rate_limit: u32,
    pub rate_window_secs: u64,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("GYMSITE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_HOST: {e}"))?;

        let port: u16 = env_or("GYMSITE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_PORT: {e}"))?;

        let sites_dir = PathBuf::from(env_or("GYMSITE_SITES_DIR", "sites"));
        let static_dir = PathBuf::from(env_or("GYMSITE_STATIC_DIR", "static"));

        let max_body_size: usize = env_or("GYMSITE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_MAX_BODY_SIZE: {e}"))?;

        let form_timeout_secs: u64 = env_or("GYMSITE_FORM_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_FORM_TIMEOUT_SECS: {e}"))?;

        let rate_limit: u32 = env_or("GYMSITE_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_RATE_LIMIT: {e}"))?;

        let rate_window_secs: u64 = env_or("GYMSITE_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid GYMSITE_RATE_WINDOW_SECS: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("GYMSITE_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid GYMSITE_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("GYMSITE_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            sites_dir,
            static_dir,
            max_body_size,
            form_timeout: Duration::from_secs(form_timeout_secs),
            rate_limit,
            rate_window_secs,
            trusted_proxies,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
