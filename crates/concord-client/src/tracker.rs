//! Request/response correlation.
//!
//! Every request that expects an answer is parked here under its request id
//! until a response of the expected kind carrying the same id arrives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::oneshot;

use concord_core::error::{ConcordError, Result};
use concord_core::{Envelope, EventKind};

struct Pending {
    kind: EventKind,
    expect: EventKind,
    sent_at: Instant,
    tx: oneshot::Sender<Envelope>,
}

/// Concurrent table of in-flight requests, shared by sender and receiver.
///
/// `slots` counts table entries and is claimed before an insert, so
/// concurrent registrations never push the table past `max_pending`.
pub struct RequestTracker {
    pending: DashMap<u32, Pending>,
    slots: AtomicUsize,
    max_pending: usize,
}

impl RequestTracker {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: DashMap::new(),
            slots: AtomicUsize::new(0),
            max_pending,
        }
    }

    /// Park a request. The receiver resolves with the matching response.
    pub fn register(&self, request_id: u32, kind: EventKind) -> Result<oneshot::Receiver<Envelope>> {
        self.try_register(request_id, kind)?.ok_or_else(|| {
            ConcordError::Internal(format!("request id {request_id:08x} already pending"))
        })
    }

    /// Like [`register`](Self::register), but reports a taken request id as
    /// `Ok(None)` so the caller can draw another one.
    pub fn try_register(
        &self,
        request_id: u32,
        kind: EventKind,
    ) -> Result<Option<oneshot::Receiver<Envelope>>> {
        let expect = kind.response().ok_or(ConcordError::NotSupported {
            kind: kind.name(),
            op: "request",
        })?;

        self.claim_slot()?;
        match self.pending.entry(request_id) {
            Entry::Occupied(_) => {
                self.release_slots(1);
                Ok(None)
            }
            Entry::Vacant(slot) => {
                let (tx, rx) = oneshot::channel();
                slot.insert(Pending {
                    kind,
                    expect,
                    sent_at: Instant::now(),
                    tx,
                });
                Ok(Some(rx))
            }
        }
    }

    fn claim_slot(&self) -> Result<()> {
        self.slots
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_pending).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|_| {
                ConcordError::Internal(format!(
                    "too many pending requests (max {})",
                    self.max_pending
                ))
            })
    }

    fn release_slots(&self, n: usize) {
        if n > 0 {
            self.slots.fetch_sub(n, Ordering::AcqRel);
        }
    }

    /// Whether `request_id` is parked right now.
    pub fn is_pending(&self, request_id: u32) -> bool {
        self.pending.contains_key(&request_id)
    }

    /// Hand a decoded envelope to the request waiting for it.
    ///
    /// Returns the envelope back when nothing was waiting for it.
    pub fn complete(&self, env: Envelope) -> Option<Envelope> {
        let kind = env.kind();
        let Some((request_id, pending)) = self
            .pending
            .remove_if(&env.request_id, |_, p| p.expect == kind)
        else {
            return Some(env);
        };
        self.release_slots(1);

        tracing::debug!(
            request_id = format_args!("{request_id:08x}"),
            request = pending.kind.name(),
            response = kind.name(),
            elapsed_ms = pending.sent_at.elapsed().as_millis() as u64,
            "response matched"
        );

        if pending.tx.send(env).is_err() {
            tracing::debug!(
                request_id = format_args!("{request_id:08x}"),
                "requester went away before the response arrived"
            );
        }
        None
    }

    /// Forget a request; returns whether it was still pending.
    pub fn cancel(&self, request_id: u32) -> bool {
        let removed = self.pending.remove(&request_id).is_some();
        if removed {
            self.release_slots(1);
        }
        removed
    }

    /// Drop every request older than `max_age` and return their ids.
    pub fn expire(&self, max_age: Duration) -> Vec<u32> {
        let mut expired = Vec::new();
        self.pending.retain(|id, p| {
            let keep = p.sent_at.elapsed() < max_age;
            if !keep {
                expired.push(*id);
            }
            keep
        });
        self.release_slots(expired.len());
        expired
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
