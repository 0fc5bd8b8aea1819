//! Job config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use netprivacy_core::error::{NetPrivacyError, Result};

pub use schema::JobConfig;

pub fn load_from_file(path: impl AsRef<Path>) -> Result<JobConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| NetPrivacyError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<JobConfig> {
    let cfg: JobConfig = serde_yaml::from_str(s)
        .map_err(|e| NetPrivacyError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
