//! Single request/response exchanges with a device.
//!
//! A [`Session`] owns the transport for as long as it runs phases. Each
//! [`Step`] is executed by writing the request followed by CR+LF, framing the
//! reply, checking it against the expected response, and pausing so the
//! device can settle before the next command.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use senbiot_model::{SessionPolicy, Step};
use tracing::{debug, trace, warn};

use crate::error::{SessionError, SessionResult};
use crate::framing::ReplyFramer;

/// Size of the buffer each transport read fills.
pub const READ_CHUNK_SIZE: usize = 10;

/// Line terminator appended to every request.
pub const REQUEST_TERMINATOR: &str = "\r\n";

/// A blocking byte stream to a device.
///
/// A read returning zero bytes means the peer closed the stream.
pub trait Transport: Read + Write {}

impl<T: Read + Write + ?Sized> Transport for T {}

/// Why a session is pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// After a successful step.
    Settle,
    /// Between network attach polls.
    RetryBackoff,
    /// After the reboot phase, while the device boots.
    Boot,
}

/// Blocks the session for a while.
pub trait Delay {
    fn pause(&mut self, pause: Pause, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn pause(&mut self, _pause: Pause, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A command session with one device.
pub struct Session<T, D = ThreadDelay> {
    pub(crate) transport: T,
    pub(crate) policy: SessionPolicy,
    pub(crate) delay: D,
}

impl<T: Transport> Session<T> {
    /// Create a session with the default policy.
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, SessionPolicy::default())
    }

    /// Create a session with the given policy.
    pub fn with_policy(transport: T, policy: SessionPolicy) -> Self {
        Session::with_delay(transport, policy, ThreadDelay)
    }
}

impl<T: Transport, D: Delay> Session<T, D> {
    /// Create a session that pauses through `delay`.
    pub fn with_delay(transport: T, policy: SessionPolicy, delay: D) -> Self {
        Session {
            transport,
            policy,
            delay,
        }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Execute one step and return the framed reply.
    ///
    /// Fails if the transport fails, or if the step has an expected response
    /// and the reply does not equal it exactly.
    pub fn execute_step(&mut self, step: &Step) -> SessionResult<String> {
        self.write_request(&step.request)?;
        let reply = self.read_reply()?;
        debug!("{} -> {:?}", step.request, reply);

        if step.has_expectation() && reply != step.expected_response {
            return Err(SessionError::ResponseMismatch {
                request: step.request.clone(),
                expected: step.expected_response.clone(),
                actual: reply,
            });
        }

        self.delay.pause(Pause::Settle, self.policy.settle_delay());
        Ok(reply)
    }

    fn write_request(&mut self, request: &str) -> SessionResult<()> {
        let line = format!("{request}{REQUEST_TERMINATOR}");
        self.transport.write_all(line.as_bytes())?;
        self.transport.flush()?;
        trace!("Sent {} bytes", line.len());
        Ok(())
    }

    fn read_reply(&mut self) -> SessionResult<String> {
        let mut framer = ReplyFramer::new(self.policy.framing);
        let mut buf = [0u8; READ_CHUNK_SIZE];

        while !framer.is_complete() {
            let n = match self.transport.read(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                warn!(
                    "Stream closed after {} line breaks, using partial reply",
                    framer.line_breaks()
                );
                break;
            }
            trace!("Read {:?}", String::from_utf8_lossy(&buf[..n]));
            let consumed = framer.push(&buf[..n]);
            if consumed < n {
                trace!("Dropped {} bytes after end of reply", n - consumed);
            }
        }

        Ok(framer.finish())
    }
}
