//! Test doubles shared by the session integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;

use senbiot_model::SessionPolicy;
use senbiot_session::{Delay, Pause, Session};

/// What the device does in answer to one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Bytes the device sends back.
    Data(Vec<u8>),
    /// The next read fails.
    Fail(ErrorKind),
}

/// Device reply `text` framed as `\r\n<text>\r\n`.
pub fn framed(text: &str) -> Reply {
    Reply::Data(format!("\r\n{text}\r\n").into_bytes())
}

/// An in-memory transport that answers each write with the next scripted
/// reply and hands it out a few bytes per read.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Reply>,
    pending: VecDeque<u8>,
    failure: Option<ErrorKind>,
    /// Every write, as text.
    pub writes: Vec<String>,
    /// Number of read calls.
    pub reads: usize,
    /// Maximum bytes returned by one read.
    pub chunk: usize,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        ScriptedTransport {
            replies: replies.into_iter().collect(),
            chunk: 3,
            ..Default::default()
        }
    }

    /// Transport that answers every request with the same framed reply.
    pub fn repeating(text: &str, times: usize) -> Self {
        Self::new(std::iter::repeat_with(|| framed(text)).take(times))
    }

    pub fn untouched(&self) -> bool {
        self.writes.is_empty() && self.reads == 0
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if let Some(kind) = self.failure.take() {
            return Err(io::Error::new(kind, "scripted failure"));
        }
        let n = buf.len().min(self.chunk).min(self.pending.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.pending.pop_front().unwrap_or_default();
        }
        Ok(n)
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(String::from_utf8_lossy(buf).into_owned());
        match self.replies.pop_front() {
            Some(Reply::Data(data)) => self.pending.extend(data),
            Some(Reply::Fail(kind)) => self.failure = Some(kind),
            None => {}
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub pauses: Vec<(Pause, Duration)>,
}

impl RecordingDelay {
    pub fn count(&self, pause: Pause) -> usize {
        self.pauses.iter().filter(|(p, _)| *p == pause).count()
    }
}

impl Delay for RecordingDelay {
    fn pause(&mut self, pause: Pause, duration: Duration) {
        self.pauses.push((pause, duration));
    }
}

pub fn session(transport: ScriptedTransport) -> Session<ScriptedTransport, RecordingDelay> {
    Session::with_delay(transport, SessionPolicy::default(), RecordingDelay::default())
}
