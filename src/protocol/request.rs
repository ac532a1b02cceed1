use super::multicast_group;
use crate::config::DiscoveryConfig;
use std::fmt;
use std::net::SocketAddrV4;

/// An M-SEARCH request, built once per session and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    text: String,
}

impl SearchRequest {
    pub const REQUEST_LINE: &'static str = "M-SEARCH * HTTP/1.1";

    /// Build a request addressed to the standard SSDP group.
    pub fn build(config: &DiscoveryConfig) -> Self {
        Self::build_for(config, multicast_group())
    }

    /// Build a request whose HOST header names `group`.
    /// Header order is fixed: HOST, MAN, ST, MX, USER-AGENT.
    pub fn build_for(config: &DiscoveryConfig, group: SocketAddrV4) -> Self {
        let text = format!(
            "{}\r\nHOST: {}:{}\r\nMAN: \"{}\"\r\nST: {}\r\nMX:{}\r\nUSER-AGENT: {}\r\n\r\n",
            Self::REQUEST_LINE,
            group.ip(),
            group.port(),
            config.man_value,
            config.service_type,
            config.mx_seconds(),
            config.user_agent,
        );
        SearchRequest { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
