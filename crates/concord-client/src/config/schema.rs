use std::time::Duration;

use serde::Deserialize;

use concord_core::error::{ConcordError, Result};
use concord_core::{Schema, PROTOCOL_VERSION};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcordConfig {
    pub version: u32,

    #[serde(default)]
    pub protocol: ProtocolSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl Default for ConcordConfig {
    fn default() -> Self {
        Self {
            version: 1,
            protocol: ProtocolSection::default(),
            session: SessionSection::default(),
        }
    }
}

impl ConcordConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ConcordError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.protocol.validate()?;
        self.session.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolSection {
    /// Wire protocol version stamped on outbound envelopes.
    #[serde(default = "default_protocol_version")]
    pub version: u8,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self {
            version: default_protocol_version(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl ProtocolSection {
    pub fn validate(&self) -> Result<()> {
        if Schema::for_version(self.version).is_err() {
            return Err(ConcordError::BadConfig(format!(
                "protocol.version {} is not supported",
                self.version
            )));
        }
        if !(1024..=64 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(ConcordError::BadConfig(
                "protocol.max_frame_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Upper bound on requests awaiting a response.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            max_pending: default_max_pending(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=300_000).contains(&self.request_timeout_ms) {
            return Err(ConcordError::BadConfig(
                "session.request_timeout_ms must be between 100 and 300000".into(),
            ));
        }
        if !(1..=65_536).contains(&self.max_pending) {
            return Err(ConcordError::BadConfig(
                "session.max_pending must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_protocol_version() -> u8 {
    PROTOCOL_VERSION
}
fn default_max_frame_bytes() -> usize {
    4 * 1024 * 1024
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_max_pending() -> usize {
    1024
}
