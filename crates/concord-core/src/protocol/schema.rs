//! Versioned header layouts.
//!
//! The header layout is part of an immutable schema keyed by the version
//! byte. Fields are never shifted inside a shipped schema; a layout change
//! means a new version.
//!
//! Version 1 (23 bytes):
//!
//! ```text
//! ┌─────────┬────────────┬────────────┬──────────┬──────────────┐
//! │ version │ timestamp  │ request id │   disc   │   payload    │
//! │  (1 B)  │  (16 B)    │   (4 B)    │ (2 B BE) │    (var)     │
//! └─────────┴────────────┴────────────┴──────────┴──────────────┘
//! ```

use crate::error::{ConcordError, Result};

/// Current protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// Header length of the current protocol version.
pub const HEADER_LEN: usize = SCHEMA_V1.header_len;

/// Fixed header layout of one protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub version: u8,
    pub header_len: usize,
    pub timestamp_offset: usize,
    pub request_id_offset: usize,
    pub discriminant_offset: usize,
}

const SCHEMA_V1: Schema = Schema {
    version: 1,
    header_len: 23,
    timestamp_offset: 1,
    request_id_offset: 17,
    discriminant_offset: 21,
};

static SCHEMAS: &[Schema] = &[SCHEMA_V1];

impl Schema {
    /// Schema of the current protocol version.
    pub fn current() -> &'static Schema {
        &SCHEMA_V1
    }

    /// Schema registered for a version byte.
    pub fn for_version(version: u8) -> Result<&'static Schema> {
        SCHEMAS
            .iter()
            .find(|s| s.version == version)
            .ok_or(ConcordError::UnsupportedVersion(version))
    }

    /// Versions this build understands.
    pub fn supported_versions() -> impl Iterator<Item = u8> {
        SCHEMAS.iter().map(|s| s.version)
    }
}
