//! # SSDP Wire Format
//!
//! Builds M-SEARCH requests and parses responder replies.
//!
//! ## Key Types
//!
//! - [`SearchRequest`] - CRLF-framed M-SEARCH text built from a [`DiscoveryConfig`](crate::DiscoveryConfig)
//! - [`Advertisement`] - One responder's headers in order of appearance
//! - [`parse_response`] - Raw datagram to [`Advertisement`]
//!
//! ## Example
//!
//! ```ignore
//! use ssdp_client::protocol::{SearchRequest, parse_response};
//!
//! let request = SearchRequest::build(&config);
//! let ad = parse_response(b"HTTP/1.1 200 OK\r\nLOCATION: http://10.0.0.5:8080\r\n\r\n");
//! ```

use std::net::{Ipv4Addr, SocketAddrV4};

pub mod request;
pub mod response;

pub use request::SearchRequest;
pub use response::{Advertisement, parse_response, parse_response_text};

/// SSDP multicast group.
pub const MULTICAST_ADDRESS: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
/// SSDP standard port.
pub const SSDP_PORT: u16 = 1900;
/// Largest UDP payload over IPv4.
pub const MAX_DATAGRAM_SIZE: usize = 65507;

pub const fn multicast_group() -> SocketAddrV4 {
    SocketAddrV4::new(MULTICAST_ADDRESS, SSDP_PORT)
}
