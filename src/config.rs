use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::error::{BookingError, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:3030/api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_TAX_RATE: f64 = 0.18;
const DEFAULT_GATEWAY_KEY_ID: &str = "rzp_test_bikya";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub bike_service_url: String,
    pub user_service_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Every service points at the same host.
    pub fn new(api_base_url: &str) -> Self {
        let base = api_base_url.trim_end_matches('/').to_string();
        ClientConfig {
            api_base_url: base.clone(),
            bike_service_url: base.clone(),
            user_service_url: base,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        ClientConfig::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api = lookup("BIKYA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = ClientConfig::new(&api);
        if let Some(url) = lookup("BIKYA_BIKE_SERVICE_URL") {
            config.bike_service_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("BIKYA_USER_SERVICE_URL") {
            config.user_service_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("BIKYA_HTTP_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| BookingError::Config(format!("BIKYA_HTTP_TIMEOUT_SECS is not a number: {}", raw)))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub bind_addr: SocketAddr,
    pub tax_rate: f64,
    pub gateway_key_id: String,
    pub gateway_secret: [u8; 32],
    pub currency: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            bind_addr: ([127, 0, 0, 1], 3030).into(),
            tax_rate: DEFAULT_TAX_RATE,
            gateway_key_id: DEFAULT_GATEWAY_KEY_ID.to_string(),
            gateway_secret: blake3::derive_key("bikya mock gateway 2024-06 signing key", b"development"),
            currency: String::from("INR"),
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let mut config = BackendConfig::default();

        let bind = env_or_default("BIKYA_BIND_ADDR", DEFAULT_BIND_ADDR);
        config.bind_addr = bind
            .parse()
            .map_err(|_| BookingError::Config(format!("BIKYA_BIND_ADDR is not a socket address: {}", bind)))?;

        if let Ok(raw) = env::var("BIKYA_TAX_RATE") {
            let rate = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| BookingError::Config(format!("BIKYA_TAX_RATE is not a number: {}", raw)))?;
            if !(0.0..1.0).contains(&rate) {
                return Err(BookingError::Config(format!("BIKYA_TAX_RATE must be in [0, 1): {}", rate)));
            }
            config.tax_rate = rate;
        }

        if let Ok(key_id) = env::var("BIKYA_GATEWAY_KEY_ID") {
            config.gateway_key_id = key_id;
        }
        if let Ok(raw) = env::var("BIKYA_GATEWAY_SECRET") {
            config.gateway_secret = parse_secret(&raw)?;
        }
        Ok(config)
    }
}

fn parse_secret(raw: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(raw.trim())
        .map_err(|_| BookingError::Config(String::from("BIKYA_GATEWAY_SECRET is not hex")))?;
    bytes
        .try_into()
        .map_err(|_| BookingError::Config(String::from("BIKYA_GATEWAY_SECRET must be 32 bytes (64 hex chars)")))
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let config = ClientConfig::new("http://localhost:3030/api/");
        assert_eq!(config.endpoint("/bookings"), "http://localhost:3030/api/bookings");
        assert_eq!(config.bike_service_url, "http://localhost:3030/api");
    }

    #[test]
    fn secret_must_be_32_bytes() {
        assert!(parse_secret(&"ab".repeat(32)).is_ok());
        assert!(matches!(parse_secret("abcd"), Err(BookingError::Config(_))));
        assert!(matches!(parse_secret("zz"), Err(BookingError::Config(_))));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn client_config_defaults_to_local_backend() {
        let config = ClientConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:3030/api");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn client_config_reads_service_overrides() {
        let config = ClientConfig::from_lookup(vars(&[
            ("BIKYA_API_URL", "https://api.bikya.in/api/"),
            ("BIKYA_BIKE_SERVICE_URL", "https://bikes.bikya.in/"),
            ("BIKYA_HTTP_TIMEOUT_SECS", " 30 "),
        ]))
        .unwrap();
        assert_eq!(config.endpoint("/bookings"), "https://api.bikya.in/api/bookings");
        assert_eq!(config.bike_service_url, "https://bikes.bikya.in");
        assert_eq!(config.user_service_url, "https://api.bikya.in/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ClientConfig::from_lookup(vars(&[("BIKYA_HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, BookingError::Config(_)));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn log_filter_defaults_to_info_without_overriding_rust_log() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("  ")).to_string(), "info");
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
    }
}
