use super::traits::{DiscoveryTransport, Received};
use crate::config::{DEFAULT_TIMEOUT_MS, effective_timeout_ms, effective_ttl};
use crate::error::{DiscoveryError, Result};
use crate::protocol::{MAX_DATAGRAM_SIZE, multicast_group};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant};

/// UDP socket joined to an SSDP multicast group for one discovery attempt.
///
/// The read timeout is a deadline for the whole listening window, counted from
/// the send, so a steady stream of replies cannot keep the session open.
pub struct MulticastTransport {
    socket: Option<UdpSocket>,
    group: SocketAddrV4,
    buffer: Vec<u8>,
    timeout: Duration,
    deadline: Option<Instant>,
}

impl MulticastTransport {
    /// Join 239.255.255.250:1900 on the default interface.
    pub fn open() -> Result<Self> {
        Self::open_on(multicast_group(), Ipv4Addr::UNSPECIFIED)
    }

    /// Bind an ephemeral port with SO_REUSEADDR and join `group` on `interface`.
    pub fn open_on(group: SocketAddrV4, interface: Ipv4Addr) -> Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(DiscoveryError::Bind)?;
        socket.set_reuse_address(true).map_err(DiscoveryError::Bind)?;

        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
        socket.bind(&bind_addr.into()).map_err(DiscoveryError::Bind)?;

        socket
            .join_multicast_v4(group.ip(), &interface)
            .map_err(|source| DiscoveryError::JoinGroup {
                group: group.to_string(),
                source,
            })?;

        Ok(MulticastTransport {
            socket: Some(socket.into()),
            group,
            buffer: vec![0u8; MAX_DATAGRAM_SIZE],
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            deadline: None,
        })
    }

    pub fn group(&self) -> SocketAddrV4 {
        self.group
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket()?.local_addr()
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn socket(&self) -> io::Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| io::Error::new(ErrorKind::NotConnected, "discovery socket is closed"))
    }
}

impl DiscoveryTransport for MulticastTransport {
    fn configure(&mut self, ttl: i32, timeout_ms: i64) -> Result<()> {
        let socket = self.socket().map_err(DiscoveryError::Configure)?;
        socket
            .set_multicast_ttl_v4(effective_ttl(ttl))
            .map_err(DiscoveryError::Configure)?;
        // A zero read timeout is rejected by the OS
        let timeout = Duration::from_millis(effective_timeout_ms(timeout_ms).max(1));
        socket
            .set_read_timeout(Some(timeout))
            .map_err(DiscoveryError::Configure)?;
        self.timeout = timeout;
        Ok(())
    }

    fn send(&mut self, request: &[u8]) -> Result<usize> {
        let socket = self.socket().map_err(DiscoveryError::Send)?;
        let sent = socket
            .send_to(request, self.group)
            .map_err(DiscoveryError::Send)?;
        self.deadline = Some(Instant::now() + self.timeout);
        Ok(sent)
    }

    fn receive_next(&mut self) -> Result<Received> {
        let socket = self.socket.as_ref().ok_or_else(|| {
            DiscoveryError::Receive(io::Error::new(
                ErrorKind::NotConnected,
                "discovery socket is closed",
            ))
        })?;

        let deadline = *self.deadline.get_or_insert_with(|| Instant::now() + self.timeout);
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(Received::TimedOut);
        }
        socket
            .set_read_timeout(Some(remaining))
            .map_err(DiscoveryError::Receive)?;

        match socket.recv_from(&mut self.buffer) {
            Ok((len, source)) => Ok(Received::Datagram {
                data: self.buffer[..len].to_vec(),
                source,
            }),
            // Unix reports an expired SO_RCVTIMEO as WouldBlock, Windows as TimedOut
            Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                Ok(Received::TimedOut)
            }
            Err(e) => Err(DiscoveryError::Receive(e)),
        }
    }

    fn close(&mut self) {
        self.socket.take();
        self.deadline = None;
    }
}
