//! Transport seam.
//!
//! How bytes reach the service is not this crate's business: the session
//! hands every encoded frame to a [`FrameSink`], and whoever owns the
//! connection feeds inbound frames back through `Session::on_frame`.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use concord_core::error::{ConcordError, Result};

/// Outbound half of a connection. One call carries exactly one frame.
#[async_trait]
pub trait FrameSink: Send + Sync {
    async fn send(&self, frame: Bytes) -> Result<()>;
}

/// In-process sink backed by a bounded tokio channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    /// Create a sink and the receiver that observes its frames.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl FrameSink for ChannelSink {
    async fn send(&self, frame: Bytes) -> Result<()> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| ConcordError::Transport("outbound channel closed".into()))
    }
}
