//! Writes rendered files under the target root.
//!
//! Every file is written to a sibling temp file, synced, and renamed over the
//! destination, so a failure never leaves a half-written config behind. The
//! temp file handle is scoped to one function and closed on every path.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use netprivacy_core::{NetPrivacyError, Result};

/// World-readable, owner-writable. These files hold no secrets.
pub const CONFIG_FILE_MODE: u32 = 0o644;

/// Destination for rendered configuration.
pub trait ConfigSink {
    /// Write `contents` to `rel` (relative to the sink's root), replacing any
    /// existing file. Returns the full destination path.
    fn write(&mut self, rel: &Path, contents: &str) -> Result<PathBuf>;
}

/// The installed system's filesystem, mounted at `root`.
#[derive(Debug, Clone)]
pub struct TargetFs {
    root: PathBuf,
}

impl TargetFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join `rel` onto the root, refusing `..` and absolute components.
    /// Symlinks are checked when writing.
    pub fn resolve(&self, rel: &Path) -> Result<PathBuf> {
        resolve_under(&self.root, rel)
    }

    /// Fail unless `dir`, with symlinks resolved, lies inside the root.
    fn confine(&self, dir: &Path) -> Result<()> {
        let root = self
            .root
            .canonicalize()
            .map_err(|e| NetPrivacyError::fs(&self.root, e))?;
        let real = dir.canonicalize().map_err(|e| NetPrivacyError::fs(dir, e))?;
        if !real.starts_with(&root) {
            return Err(NetPrivacyError::InvalidInput(format!(
                "{} resolves to {}, outside the target root",
                dir.display(),
                real.display()
            )));
        }
        Ok(())
    }
}

impl ConfigSink for TargetFs {
    fn write(&mut self, rel: &Path, contents: &str) -> Result<PathBuf> {
        let dest = self.resolve(rel)?;
        let dir = dest
            .parent()
            .ok_or_else(|| NetPrivacyError::InvalidInput(format!("no parent for {}", dest.display())))?;
        let name = dest
            .file_name()
            .ok_or_else(|| NetPrivacyError::InvalidInput(format!("no file name in {}", dest.display())))?;

        // Check the deepest existing directory before creating anything below it.
        if let Some(existing) = dir
            .ancestors()
            .take_while(|p| p.starts_with(&self.root))
            .find(|p| p.exists())
        {
            self.confine(existing)?;
        }
        fs::create_dir_all(dir).map_err(|e| NetPrivacyError::fs(dir, e))?;
        self.confine(dir)?;

        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(name);
        tmp_name.push(".netprivacy-tmp");
        let tmp = dir.join(tmp_name);

        let res = write_synced(&tmp, contents).and_then(|()| fs::rename(&tmp, &dest));
        if let Err(e) = res {
            // best-effort cleanup
            let _ = fs::remove_file(&tmp);
            return Err(NetPrivacyError::fs(&dest, e));
        }

        tracing::info!(path = %dest.display(), bytes = contents.len(), "wrote config file");
        Ok(dest)
    }
}

fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(CONFIG_FILE_MODE);
    }

    let mut out = BufWriter::new(opts.open(path)?);
    out.write_all(contents.as_bytes())?;
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

fn resolve_under(root: &Path, rel: &Path) -> Result<PathBuf> {
    let mut out = root.to_path_buf();
    let mut any = false;
    for comp in rel.components() {
        match comp {
            Component::Normal(part) => {
                out.push(part);
                any = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(NetPrivacyError::InvalidInput(format!(
                    "path {} must stay inside the target root",
                    rel.display()
                )));
            }
        }
    }
    if !any {
        return Err(NetPrivacyError::InvalidInput("empty config path".into()));
    }
    Ok(out)
}

/// Records files instead of writing them.
#[derive(Debug, Clone, Default)]
pub struct DryRun {
    root: PathBuf,
    files: Vec<(PathBuf, String)>,
}

impl DryRun {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// `(destination, contents)` in write order.
    pub fn files(&self) -> &[(PathBuf, String)] {
        &self.files
    }
}

impl ConfigSink for DryRun {
    fn write(&mut self, rel: &Path, contents: &str) -> Result<PathBuf> {
        let dest = resolve_under(&self.root, rel)?;
        tracing::info!(path = %dest.display(), "dry run: would write\n{contents}");
        self.files.push((dest.clone(), contents.to_string()));
        Ok(dest)
    }
}
