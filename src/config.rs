//! Client configuration parsed from environment variables.

use crate::error::IpMsgError;

pub const DEFAULT_BASE_URL: &str = "https://ip-messaging.twilio.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpMsgTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for IpMsgTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpMsgConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub base_url: String,
    pub timeouts: IpMsgTimeouts,
}

impl IpMsgConfig {
    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `TWILIO_ACCOUNT_SID`
    /// - `TWILIO_AUTH_TOKEN`
    ///
    /// Optional:
    /// - `IPMSG_BASE_URL`: default provider URL, trailing slash trimmed
    /// - `IPMSG_REQUEST_TIMEOUT_SECS`: default 30
    /// - `IPMSG_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`IpMsgError::MissingCredential`] if either credential is unset.
    pub fn from_env() -> Result<Self, IpMsgError> {
        let account_sid = required_env("TWILIO_ACCOUNT_SID")?;
        let auth_token = required_env("TWILIO_AUTH_TOKEN")?;
        let base_url = normalize_base_url(&std::env::var("IPMSG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()));
        let timeouts = IpMsgTimeouts {
            request_secs: env_parse_u64("IPMSG_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("IPMSG_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { account_sid, auth_token, base_url, timeouts })
    }
}

/// Strip trailing slashes so path segments can be appended with `/`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

fn required_env(key: &str) -> Result<String, IpMsgError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(IpMsgError::MissingCredential { var: key.into() }),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .map_or(default, |v| v.parse::<u64>().unwrap_or(default))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
