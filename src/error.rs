//! Error types for SSDP discovery.
//!
//! Read-deadline expiry is not an error: the transport reports it as
//! [`Received::TimedOut`](crate::transport::Received::TimedOut) and the session
//! treats it as normal completion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to bind discovery socket: {0}")]
    Bind(#[source] std::io::Error),

    #[error("failed to join multicast group {group}: {source}")]
    JoinGroup {
        group: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to configure discovery socket: {0}")]
    Configure(#[source] std::io::Error),

    #[error("failed to send search request: {0}")]
    Send(#[source] std::io::Error),

    #[error("failed to receive response: {0}")]
    Receive(#[source] std::io::Error),

    #[error("invalid discovery config: {0}")]
    Config(String),

    #[error("discovery task failed: {0}")]
    Join(String),
}

impl DiscoveryError {
    /// True for socket failures (bind, join, configure, send, receive).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DiscoveryError::Bind(_)
                | DiscoveryError::JoinGroup { .. }
                | DiscoveryError::Configure(_)
                | DiscoveryError::Send(_)
                | DiscoveryError::Receive(_)
        )
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(e: serde_json::Error) -> Self {
        DiscoveryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_network_errors_are_flagged() {
        let err = DiscoveryError::Receive(Error::new(ErrorKind::ConnectionReset, "reset"));
        assert!(err.is_network());
        assert!(format!("{}", err).contains("failed to receive response"));
    }

    #[test]
    fn test_config_error_is_not_network() {
        let err: DiscoveryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(!err.is_network());
        assert!(matches!(err, DiscoveryError::Config(_)));
    }

    #[test]
    fn test_join_group_display() {
        let err = DiscoveryError::JoinGroup {
            group: "239.255.255.250".to_string(),
            source: Error::new(ErrorKind::AddrNotAvailable, "no interface"),
        };
        assert_eq!(
            format!("{}", err),
            "failed to join multicast group 239.255.255.250: no interface"
        );
    }
}
