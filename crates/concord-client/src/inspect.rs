//! Line-oriented frame inspection used by the `concord-inspect` binary.

use serde::Serialize;

use concord_core::error::{ConcordError, Result};
use concord_core::{Envelope, EventCodec};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Decoded(Envelope),
    Rejected { code: &'static str, message: String },
}

/// Decode one hex-encoded frame. Blank lines and `#` comments yield `None`.
pub fn inspect_line(codec: &EventCodec, max_frame_bytes: usize, line: &str) -> Option<Report> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let report = match decode_hex_frame(codec, max_frame_bytes, line) {
        Ok(env) => Report::Decoded(env),
        Err(e) => {
            tracing::warn!(code = e.code().as_str(), error = %e, "frame rejected");
            Report::Rejected {
                code: e.code().as_str(),
                message: e.to_string(),
            }
        }
    };
    Some(report)
}

fn decode_hex_frame(codec: &EventCodec, max_frame_bytes: usize, line: &str) -> Result<Envelope> {
    let raw = hex::decode(line).map_err(|e| ConcordError::Malformed(format!("bad hex: {e}")))?;
    if raw.len() > max_frame_bytes {
        return Err(ConcordError::FrameTooLarge {
            size: raw.len(),
            max: max_frame_bytes,
        });
    }
    let (env, _) = codec.decode(&raw)?;
    Ok(env)
}
