use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIME_TO_LIVE: u32 = 255;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Search parameters for one discovery attempt.
/// Negative `time_to_live` / `timeout_ms` select the defaults (255 hops, 5000 ms).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// USER-AGENT header value (default: "discovery client")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// MAN header value, sent quoted (default: "ssdp:discover")
    #[serde(default = "default_man_value")]
    pub man_value: String,
    /// ST header value (default: "ssdp:all")
    #[serde(default = "default_service_type")]
    pub service_type: String,
    /// Multicast hop limit
    #[serde(default = "default_time_to_live")]
    pub time_to_live: i32,
    /// Listening window in milliseconds, also sent as MX in whole seconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: i64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            user_agent: default_user_agent(),
            man_value: default_man_value(),
            service_type: default_service_type(),
            time_to_live: default_time_to_live(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_user_agent() -> String { "discovery client".to_string() }
fn default_man_value() -> String { "ssdp:discover".to_string() }
fn default_service_type() -> String { "ssdp:all".to_string() }
fn default_time_to_live() -> i32 { DEFAULT_TIME_TO_LIVE as i32 }
fn default_timeout_ms() -> i64 { DEFAULT_TIMEOUT_MS as i64 }

impl DiscoveryConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_man_value(mut self, man_value: impl Into<String>) -> Self {
        self.man_value = man_value.into();
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn with_time_to_live(mut self, time_to_live: i32) -> Self {
        self.time_to_live = time_to_live;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Hop limit actually applied to the socket, always within 0..=255.
    pub fn effective_ttl(&self) -> u32 {
        effective_ttl(self.time_to_live)
    }

    /// Timeout in milliseconds after default substitution.
    pub fn effective_timeout_ms(&self) -> u64 {
        effective_timeout_ms(self.timeout_ms)
    }

    /// Read deadline for the socket. Never zero: a zero read timeout means "block forever".
    pub fn effective_timeout(&self) -> Duration {
        Duration::from_millis(self.effective_timeout_ms().max(1))
    }

    /// MX header value: whole seconds of the effective timeout.
    pub fn mx_seconds(&self) -> u64 {
        self.effective_timeout_ms() / 1000
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            crate::error::DiscoveryError::Config(format!("{}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

pub(crate) fn effective_ttl(ttl: i32) -> u32 {
    if ttl < 0 {
        DEFAULT_TIME_TO_LIVE
    } else {
        (ttl as u32).min(DEFAULT_TIME_TO_LIVE)
    }
}

pub(crate) fn effective_timeout_ms(timeout_ms: i64) -> u64 {
    if timeout_ms < 0 {
        DEFAULT_TIMEOUT_MS
    } else {
        timeout_ms as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.user_agent, "discovery client");
        assert_eq!(config.man_value, "ssdp:discover");
        assert_eq!(config.service_type, "ssdp:all");
        assert_eq!(config.effective_ttl(), 255);
        assert_eq!(config.effective_timeout_ms(), 5000);
    }

    #[test]
    fn test_negative_values_use_defaults() {
        let config = DiscoveryConfig::default()
            .with_time_to_live(-1)
            .with_timeout_ms(-20);
        assert_eq!(config.effective_ttl(), 255);
        assert_eq!(config.effective_timeout_ms(), 5000);
        assert_eq!(config.effective_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_non_negative_values_pass_through() {
        let config = DiscoveryConfig::default()
            .with_time_to_live(4)
            .with_timeout_ms(300);
        assert_eq!(config.effective_ttl(), 4);
        assert_eq!(config.effective_timeout_ms(), 300);
        assert_eq!(config.mx_seconds(), 0);

        let zero = DiscoveryConfig::default().with_time_to_live(0);
        assert_eq!(zero.effective_ttl(), 0);
    }

    #[test]
    fn test_ttl_clamped_to_hop_limit_range() {
        let config = DiscoveryConfig::default().with_time_to_live(1000);
        assert_eq!(config.effective_ttl(), 255);
    }

    #[test]
    fn test_zero_timeout_never_blocks_forever() {
        let config = DiscoveryConfig::default().with_timeout_ms(0);
        assert_eq!(config.effective_timeout_ms(), 0);
        assert_eq!(config.effective_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_from_json_partial() {
        let config = DiscoveryConfig::from_json(
            r#"{ "service_type": "urn:stock-server", "timeout_ms": 2500 }"#,
        )
        .unwrap();
        assert_eq!(config.service_type, "urn:stock-server");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.man_value, "ssdp:discover");
        assert_eq!(config.time_to_live, 255);
        assert_eq!(config.mx_seconds(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DiscoveryConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DiscoveryConfig::load("/nonexistent/ssdp.json").unwrap_err();
        assert!(!err.is_network());
    }
}
