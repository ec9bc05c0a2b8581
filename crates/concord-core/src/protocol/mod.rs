//! Concord wire protocol.
//!
//! Layers, bottom-up:
//! - `wire`: primitive encodings (big-endian integers, length-prefixed
//!   strings and blobs, option tags, counted sequences).
//! - `ident` / `domain`: identifiers and records shared by payloads.
//! - `payload`: one type per event kind.
//! - `registry` / `schema`: discriminant table and versioned header layouts.
//! - `envelope`: the framed message and the role-aware codec.
//!
//! All parsers are panic-free: malformed input is reported as `ConcordError`
//! instead of panicking or indexing raw buffers.

pub mod domain;
pub mod envelope;
pub mod ident;
pub mod payload;
pub mod registry;
pub mod schema;
pub mod wire;

pub use domain::{
    Channel, Invite, InviteResponseInfo, Member, OnlineStatus, ProfileData,
    ProfileImageRequestType, ServerInfo,
};
pub use envelope::{Envelope, EventCodec, Role};
pub use ident::{Image, Pubkey, ServerId, Signature};
pub use registry::{Direction, EventKind, KindSpec, Payload};
pub use schema::{Schema, HEADER_LEN, PROTOCOL_VERSION};
