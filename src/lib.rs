pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod transport;

pub use config::DiscoveryConfig;
pub use discovery::{DiscoverySession, SessionState, discover, discover_async};
pub use error::{DiscoveryError, Result};
pub use protocol::{Advertisement, SearchRequest, parse_response};
pub use transport::{DiscoveryTransport, MulticastTransport, Received};
