//! # Discovery Session Module
//!
//! Sends one M-SEARCH and collects every reply until the listening window closes.
//!
//! ## Key Types
//!
//! - [`DiscoverySession`] - Request/collect state machine owning one transport
//! - [`SessionState`] - `Idle -> Sending -> Listening -> (TimedOut | Failed) -> Closed`
//!
//! ## Example
//!
//! ```ignore
//! let config = DiscoveryConfig::default().with_service_type("ssdp:stock-server");
//! for ad in discover(config)? {
//!     println!("{:?} @ {:?}", ad.usn(), ad.location());
//! }
//! ```

pub mod session;

pub use session::*;

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::protocol::Advertisement;

/// Run one discovery attempt on the calling thread.
pub fn discover(config: DiscoveryConfig) -> Result<Vec<Advertisement>> {
    DiscoverySession::new(config).run()
}

/// Run one discovery attempt on tokio's blocking pool.
/// Each call owns its own socket, so any number may run concurrently.
pub async fn discover_async(config: DiscoveryConfig) -> Result<Vec<Advertisement>> {
    tokio::task::spawn_blocking(move || discover(config))
        .await
        .map_err(|e| DiscoveryError::Join(e.to_string()))?
}
