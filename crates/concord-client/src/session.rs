//! Client protocol session.
//!
//! A session owns the client-side codec, the pending-request table, and the
//! outbound [`FrameSink`]. It is shared (`Arc<Session<_>>`) between the task
//! issuing requests and the task feeding inbound frames.

use std::time::Duration;

use tokio::sync::oneshot;

use concord_core::error::{ConcordError, ErrorCode, Result};
use concord_core::{Envelope, EventCodec, EventKind, Payload};

use crate::config::ConcordConfig;
use crate::tracker::RequestTracker;
use crate::transport::FrameSink;

/// Fresh ids drawn for one request before a collision is reported.
const ID_ATTEMPTS: usize = 4;

/// Outcome of handing one inbound frame to the session.
#[derive(Debug)]
pub enum Inbound {
    /// The frame answered a pending request and was delivered to it.
    Response { request_id: u32, kind: EventKind },
    /// A well-formed frame nobody was waiting for (e.g. `Challenge`).
    Unsolicited(Envelope),
    /// The frame was rejected and dropped; the session stays usable.
    ProtocolError { code: ErrorCode, error: ConcordError },
}

pub struct Session<S> {
    codec: EventCodec,
    sink: S,
    tracker: RequestTracker,
    protocol_version: u8,
    max_frame_bytes: usize,
    request_timeout: Duration,
    next_id: Box<dyn Fn() -> u32 + Send + Sync>,
}

impl<S: FrameSink> Session<S> {
    pub fn new(cfg: &ConcordConfig, sink: S) -> Self {
        Self {
            codec: EventCodec::client(),
            sink,
            tracker: RequestTracker::new(cfg.session.max_pending),
            protocol_version: cfg.protocol.version,
            max_frame_bytes: cfg.protocol.max_frame_bytes,
            request_timeout: cfg.session.request_timeout(),
            next_id: Box::new(rand::random::<u32>),
        }
    }

    /// Wrap a payload in a fresh envelope stamped with the configured version.
    pub fn envelope(&self, payload: impl Into<Payload>) -> Envelope {
        let mut env = Envelope::new(payload).with_request_id((self.next_id)());
        env.version = self.protocol_version;
        env
    }

    /// Send a payload without waiting for an answer. Returns its request id.
    pub async fn send(&self, payload: impl Into<Payload>) -> Result<u32> {
        let env = self.envelope(payload);
        self.transmit(&env).await?;
        Ok(env.request_id)
    }

    /// Send a request and wait for the response echoing its request id.
    pub async fn request(&self, payload: impl Into<Payload>) -> Result<Envelope> {
        let mut env = self.envelope(payload);
        let rx = self.park(&mut env)?;
        let request_id = env.request_id;

        if let Err(e) = self.transmit(&env).await {
            self.tracker.cancel(request_id);
            return Err(e);
        }

        match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(resp)) => Ok(resp),
            Ok(Err(_)) => {
                self.tracker.cancel(request_id);
                Err(ConcordError::Internal(format!(
                    "request {request_id:08x} abandoned"
                )))
            }
            Err(_) => {
                self.tracker.cancel(request_id);
                tracing::warn!(
                    request_id = format_args!("{request_id:08x}"),
                    kind = env.kind().name(),
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "request timed out"
                );
                Err(ConcordError::Timeout(request_id))
            }
        }
    }

    /// Register `env`, drawing a new request id while the current one is taken.
    fn park(&self, env: &mut Envelope) -> Result<oneshot::Receiver<Envelope>> {
        for _ in 0..ID_ATTEMPTS {
            if let Some(rx) = self.tracker.try_register(env.request_id, env.kind())? {
                return Ok(rx);
            }
            tracing::debug!(
                request_id = format_args!("{:08x}", env.request_id),
                "request id collision, drawing another"
            );
            env.request_id = (self.next_id)();
        }
        Err(ConcordError::Internal(format!(
            "no free request id after {ID_ATTEMPTS} attempts"
        )))
    }

    async fn transmit(&self, env: &Envelope) -> Result<()> {
        let frame = self.codec.encode(env)?;
        if frame.len() > self.max_frame_bytes {
            return Err(ConcordError::FrameTooLarge {
                size: frame.len(),
                max: self.max_frame_bytes,
            });
        }

        tracing::debug!(
            request_id = format_args!("{:08x}", env.request_id),
            kind = env.kind().name(),
            len = frame.len(),
            "sending event"
        );
        self.sink.send(frame).await
    }

    /// Process one inbound frame with exact boundaries.
    pub fn on_frame(&self, frame: &[u8]) -> Inbound {
        match self.decode(frame) {
            Ok(env) => {
                let request_id = env.request_id;
                let kind = env.kind();
                match self.tracker.complete(env) {
                    None => Inbound::Response { request_id, kind },
                    Some(env) => {
                        tracing::debug!(
                            request_id = format_args!("{request_id:08x}"),
                            kind = kind.name(),
                            "unsolicited event"
                        );
                        Inbound::Unsolicited(env)
                    }
                }
            }
            Err(error) => {
                let code = error.code();
                tracing::warn!(
                    code = code.as_str(),
                    error = %error,
                    len = frame.len(),
                    raw = %hex::encode(frame),
                    "dropping inbound frame"
                );
                Inbound::ProtocolError { code, error }
            }
        }
    }

    fn decode(&self, frame: &[u8]) -> Result<Envelope> {
        if frame.len() > self.max_frame_bytes {
            return Err(ConcordError::FrameTooLarge {
                size: frame.len(),
                max: self.max_frame_bytes,
            });
        }
        let (env, _) = self.codec.decode(frame)?;
        Ok(env)
    }

    /// Number of requests still waiting for a response.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Drop requests older than the configured timeout; returns their ids.
    pub fn expire_stale(&self) -> Vec<u32> {
        self.tracker.expire(self.request_timeout)
    }
}
