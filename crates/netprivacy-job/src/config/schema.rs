use std::path::PathBuf;

use serde::Deserialize;

use netprivacy_core::error::{NetPrivacyError, Result};
use netprivacy_core::{Selection, VendorOverride};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub version: u32,

    /// Mount point of the installed system. The CLI `--root` wins over this.
    #[serde(default)]
    pub target_root: Option<PathBuf>,

    #[serde(default)]
    pub selection: Selection,

    /// Extra or replacement vendors. Invalid entries are skipped, not fatal.
    #[serde(default)]
    pub custom_vendors: Vec<VendorOverride>,
}

impl JobConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NetPrivacyError::UnsupportedVersion(self.version));
        }
        if let Some(root) = &self.target_root {
            if root.as_os_str().is_empty() {
                return Err(NetPrivacyError::Config("target_root must not be empty".into()));
            }
            if !root.is_absolute() {
                return Err(NetPrivacyError::Config(format!(
                    "target_root must be absolute, got {}",
                    root.display()
                )));
            }
        }
        Ok(())
    }
}
