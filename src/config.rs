//! Host configuration parsed from environment variables.

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Model training runs inside a single backend request.
pub const DEFAULT_PROXY_REQUEST_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub backend_url: String,
    pub timeouts: ProxyTimeouts,
    pub max_body_bytes: usize,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_URL`: review API origin, default `http://localhost:8000`
    /// - `PROXY_REQUEST_TIMEOUT_SECS`: default 600
    /// - `PROXY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PROXY_MAX_BODY_BYTES`: default 1 MiB
    ///
    /// # Errors
    ///
    /// Returns `HostError::Config` for an unparseable port or backend URL.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Config` for an unparseable port or backend URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = parse_port(lookup("PORT").as_deref())?;
        let backend_url = parse_backend_url(lookup("BACKEND_URL").as_deref())?;
        let timeouts = ProxyTimeouts {
            request_secs: parse_or(lookup("PROXY_REQUEST_TIMEOUT_SECS").as_deref(), DEFAULT_PROXY_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(lookup("PROXY_CONNECT_TIMEOUT_SECS").as_deref(), DEFAULT_PROXY_CONNECT_TIMEOUT_SECS),
        };
        let max_body_bytes = parse_or(lookup("PROXY_MAX_BODY_BYTES").as_deref(), DEFAULT_MAX_BODY_BYTES);
        Ok(Self { port, backend_url, timeouts, max_body_bytes })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn parse_port(raw: Option<&str>) -> Result<u16, HostError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| HostError::Config(format!("invalid PORT: {value}"))),
    }
}

fn parse_backend_url(raw: Option<&str>) -> Result<String, HostError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_BACKEND_URL);
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(HostError::Config(format!("BACKEND_URL must be an http(s) origin: {value}")));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
