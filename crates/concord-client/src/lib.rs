//! Concord client library entry.
//!
//! This crate wires the codec from `concord-core` into a client-side
//! protocol session: strict config loading, envelope construction,
//! request/response correlation by request id, and per-frame protocol error
//! handling. The transport stays behind the [`transport::FrameSink`] seam.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod inspect;
pub mod session;
pub mod tracker;
pub mod transport;

pub use session::{Inbound, Session};
pub use tracker::RequestTracker;
pub use transport::{ChannelSink, FrameSink};
