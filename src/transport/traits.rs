use crate::error::Result;
use std::net::SocketAddr;

/// Outcome of one receive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A response datagram and the address it came from.
    Datagram { data: Vec<u8>, source: SocketAddr },
    /// The read deadline elapsed with nothing to read.
    TimedOut,
}

/// Socket seam used by [`DiscoverySession`](crate::DiscoverySession).
/// Implemented by [`MulticastTransport`](super::MulticastTransport); tests plug in scripted ones.
pub trait DiscoveryTransport: Send {
    /// Apply hop limit and read deadline. Negative inputs select the defaults (255, 5000 ms).
    fn configure(&mut self, ttl: i32, timeout_ms: i64) -> Result<()>;

    /// Send one datagram to the multicast group.
    fn send(&mut self, request: &[u8]) -> Result<usize>;

    /// Block until a datagram arrives or the read deadline elapses.
    fn receive_next(&mut self) -> Result<Received>;

    /// Release the socket.
    fn close(&mut self);
}
