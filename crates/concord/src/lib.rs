//! Top-level facade crate for Concord.
//!
//! Re-exports the codec and the client session so users can depend on a
//! single crate.

pub mod core {
    pub use concord_core::*;
}

pub mod client {
    pub use concord_client::*;
}

pub use concord_core::{ConcordError, Envelope, EventCodec, EventKind, Payload, Result, Role};
pub use concord_client::{Inbound, Session};
