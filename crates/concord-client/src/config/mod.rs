//! Client config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use concord_core::error::{ConcordError, Result};

pub use schema::{ConcordConfig, ProtocolSection, SessionSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ConcordConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        ConcordError::BadConfig(format!("read {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ConcordConfig> {
    let cfg: ConcordConfig = serde_yaml::from_str(s)
        .map_err(|e| ConcordError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
