//! Event envelope encoding and dispatch (panic-free).
//!
//! Decoding rules:
//! - The transport supplies exact frame boundaries; the payload must end
//!   exactly at the end of the frame.
//! - The header is validated (version, discriminant, direction) before a
//!   single payload byte is read.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use crate::error::{ConcordError, Result};
use crate::protocol::registry::{self, Direction, EventKind, Payload};
use crate::protocol::schema::{Schema, PROTOCOL_VERSION};
use crate::protocol::wire::Decode;

/// One framed message: header fields plus exactly one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// Protocol version.
    pub version: u8,
    /// Client-local send time, ms since epoch.
    pub timestamp: u128,
    /// Opaque correlation token; responses echo it.
    pub request_id: u32,
    pub payload: Payload,
}

impl Envelope {
    /// Stamp a payload with the current version, time, and a random request id.
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            timestamp: now_millis(),
            request_id: rand::random(),
            payload: payload.into(),
        }
    }

    /// Build the answer to `self`, carrying the same request id.
    pub fn reply(&self, payload: impl Into<Payload>) -> Self {
        Self {
            request_id: self.request_id,
            ..Self::new(payload)
        }
    }

    pub fn with_request_id(mut self, request_id: u32) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u128) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis()
}

/// Side of the connection a codec speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    /// Direction of the payloads this role produces.
    pub fn outbound(self) -> Direction {
        match self {
            Role::Client => Direction::ClientToServer,
            Role::Server => Direction::ServerToClient,
        }
    }

    pub fn can_encode(self, kind: EventKind) -> bool {
        kind.direction() == self.outbound()
    }

    pub fn can_decode(self, kind: EventKind) -> bool {
        kind.direction() != self.outbound()
    }
}

/// Stateless envelope codec for one side of the connection.
///
/// A codec only encodes the kinds its role sends and only decodes the kinds
/// its role receives; the other direction fails with `NotSupported`.
#[derive(Debug, Clone, Copy)]
pub struct EventCodec {
    role: Role,
}

impl EventCodec {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn client() -> Self {
        Self::new(Role::Client)
    }

    pub fn server() -> Self {
        Self::new(Role::Server)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Serialize an envelope into one frame.
    pub fn encode(&self, env: &Envelope) -> Result<Bytes> {
        let schema = Schema::for_version(env.version)?;
        let kind = env.kind();
        if !self.role.can_encode(kind) {
            return Err(ConcordError::NotSupported {
                kind: kind.name(),
                op: "encode",
            });
        }

        let mut out = BytesMut::with_capacity(schema.header_len + 64);
        out.put_u8(env.version);
        out.put_u128(env.timestamp);
        out.put_u32(env.request_id);
        out.put_u16(kind.as_u16());

        env.payload.encode_body(&mut out)?;

        tracing::trace!(
            kind = kind.name(),
            request_id = env.request_id,
            len = out.len(),
            "encoded event"
        );
        Ok(out.freeze())
    }

    /// Decode one complete frame.
    ///
    /// Returns the envelope and the number of bytes consumed, which always
    /// equals `frame.len()` on success.
    pub fn decode(&self, frame: &[u8]) -> Result<(Envelope, usize)> {
        let (version, _) = u8::decode(frame, 0)?;
        let schema = Schema::for_version(version)?;
        if frame.len() < schema.header_len {
            return Err(ConcordError::OutOfBounds {
                offset: 0,
                needed: schema.header_len,
                available: frame.len(),
            });
        }

        let (timestamp, _) = u128::decode(frame, schema.timestamp_offset)?;
        let (request_id, _) = u32::decode(frame, schema.request_id_offset)?;
        let (disc, _) = u16::decode(frame, schema.discriminant_offset)?;
        let spec = registry::lookup(disc)?;

        if !self.role.can_decode(spec.kind) {
            return Err(ConcordError::NotSupported {
                kind: spec.kind.name(),
                op: "decode",
            });
        }

        let (payload, end) = (spec.decode)(frame, schema.header_len)?;
        if end != frame.len() {
            return Err(ConcordError::Malformed(format!(
                "{} trailing bytes after {}",
                frame.len() - end,
                spec.kind.name()
            )));
        }

        tracing::trace!(
            kind = spec.kind.name(),
            request_id,
            len = end,
            "decoded event"
        );

        let env = Envelope {
            version,
            timestamp,
            request_id,
            payload,
        };
        Ok((env, end))
    }
}
