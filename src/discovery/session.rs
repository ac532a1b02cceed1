use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::logging::{DiscoveryLogger, LogFacade, LogLevel};
use crate::protocol::Advertisement;
use crate::protocol::SearchRequest;
use crate::protocol::response::parse_lines;
use crate::transport::{DiscoveryTransport, MulticastTransport, Received};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    Listening,
    TimedOut,
    Failed,
    Closed,
}

/// Closes the wrapped transport exactly once, on every exit path.
struct TransportGuard<T: DiscoveryTransport>(T);

impl<T: DiscoveryTransport> Deref for TransportGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: DiscoveryTransport> DerefMut for TransportGuard<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DiscoveryTransport> Drop for TransportGuard<T> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// One SSDP search: send the request, then collect replies until the deadline.
///
/// A session may be run again; every run opens a fresh transport and returns
/// only the advertisements collected by that run.
pub struct DiscoverySession {
    config: DiscoveryConfig,
    state: SessionState,
    logger: Arc<dyn DiscoveryLogger>,
}

impl DiscoverySession {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self::with_logger(config, LogFacade::new())
    }

    pub fn with_logger(config: DiscoveryConfig, logger: Arc<dyn DiscoveryLogger>) -> Self {
        DiscoverySession {
            config,
            state: SessionState::Idle,
            logger,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Search on the standard SSDP group.
    ///
    /// Returns every advertisement received before the timeout, in arrival order.
    /// A socket failure at any point discards partial results and returns the error.
    pub fn run(&mut self) -> Result<Vec<Advertisement>> {
        self.transition(SessionState::Sending);
        match MulticastTransport::open() {
            Ok(transport) => {
                self.logger.log(
                    LogLevel::Debug,
                    "Session",
                    &format!("Joined multicast group {}", transport.group()),
                );
                self.drive(transport)
            }
            Err(e) => {
                self.fail(&e);
                self.transition(SessionState::Closed);
                Err(e)
            }
        }
    }

    /// Search over an already opened transport. The session takes ownership and
    /// closes it before returning.
    pub fn run_with<T: DiscoveryTransport>(&mut self, transport: T) -> Result<Vec<Advertisement>> {
        self.transition(SessionState::Sending);
        self.drive(transport)
    }

    fn drive<T: DiscoveryTransport>(&mut self, transport: T) -> Result<Vec<Advertisement>> {
        let mut transport = TransportGuard(transport);
        let outcome = self.exchange(&mut *transport);

        match &outcome {
            Ok(advertisements) => {
                self.transition(SessionState::TimedOut);
                self.logger.log(
                    LogLevel::Info,
                    "Session",
                    &format!("Search finished with {} advertisement(s)", advertisements.len()),
                );
            }
            Err(e) => self.fail(e),
        }

        drop(transport);
        self.transition(SessionState::Closed);
        outcome
    }

    fn exchange<T: DiscoveryTransport>(&mut self, transport: &mut T) -> Result<Vec<Advertisement>> {
        transport.configure(self.config.time_to_live, self.config.timeout_ms)?;

        let request = SearchRequest::build(&self.config);
        let sent = transport.send(request.as_bytes())?;
        self.logger.log(
            LogLevel::Debug,
            "Session",
            &format!("Sent M-SEARCH ({} bytes, ST: {})", sent, self.config.service_type),
        );
        self.transition(SessionState::Listening);

        let mut advertisements = Vec::new();
        loop {
            match transport.receive_next()? {
                Received::Datagram { data, source } => {
                    let (advertisement, skipped) = parse_lines(&String::from_utf8_lossy(&data));
                    self.logger.log(
                        LogLevel::Debug,
                        "Session",
                        &format!(
                            "Response from {} ({} bytes, {} header(s))",
                            source,
                            data.len(),
                            advertisement.len()
                        ),
                    );
                    if skipped > 0 {
                        self.logger.log(
                            LogLevel::Debug,
                            "Session",
                            &format!("Skipped {} line(s) without ':' from {}", skipped, source),
                        );
                    }
                    advertisements.push(advertisement);
                }
                Received::TimedOut => return Ok(advertisements),
            }
        }
    }

    fn fail(&mut self, error: &DiscoveryError) {
        self.transition(SessionState::Failed);
        self.logger
            .log(LogLevel::Warn, "Session", &format!("Search failed: {}", error));
    }

    fn transition(&mut self, next: SessionState) {
        self.logger.log(
            LogLevel::Debug,
            "Session",
            &format!("{:?} -> {:?}", self.state, next),
        );
        self.state = next;
    }
}
