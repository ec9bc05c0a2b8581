//! Concord core: the binary event codec shared by client and service.
//!
//! This crate defines the wire-level contracts and the error surface of the
//! Concord protocol: primitive encodings, domain records, the 36 request and
//! response payloads, and the versioned envelope that multiplexes them. It
//! carries no transport or runtime dependencies so it can be reused by the
//! client session, tooling, and any service implementation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every decode path is bounds-checked and surfaces failures as
//! `ConcordError`, so hostile or truncated frames can never crash a process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ConcordError, ErrorCode, Result};
pub use protocol::{
    Direction, Envelope, EventCodec, EventKind, Payload, Role, Schema, HEADER_LEN,
    PROTOCOL_VERSION,
};
