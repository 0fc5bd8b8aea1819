//! Config emitters.
//!
//! Each emitter owns one job step and a disjoint set of files. Rendering is
//! pure; writing goes through the [`ConfigSink`] so the same emitter serves
//! the real target root and dry runs.

pub mod ipv6;
pub mod link;
pub mod mac;

use std::fmt::Write as _;
use std::path::PathBuf;

use rand::RngCore;

use netprivacy_core::{NetPrivacyError, PolicyConfig, Result, VendorRegistry};

use crate::job::JobStep;
use crate::writer::ConfigSink;

pub use ipv6::Ipv6PrivacyEmitter;
pub use link::LinkOverrideEmitter;
pub use mac::MacOverrideEmitter;

/// First line of every generated file.
pub const GENERATED_BY: &str = "Generated by netprivacy-job at install time. Reinstalling overwrites this file.";

/// A file ready to be written, path relative to the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Everything an emitter may consult while rendering.
pub struct EmitContext<'a> {
    pub policy: &'a PolicyConfig,
    pub registry: &'a VendorRegistry,
    /// Source for draws that the target format forces us to persist.
    pub rng: &'a mut dyn RngCore,
}

/// One step of the job: render files for a policy axis and write them.
pub trait ConfigEmitter: Send + Sync {
    fn step(&self) -> JobStep;

    /// `false` when the governing policy is its no-op value.
    fn applies(&self, policy: &PolicyConfig) -> bool;

    fn render(&self, ctx: &mut EmitContext<'_>) -> Result<Vec<RenderedFile>>;

    /// Render, then write every file. Stops at the first write failure.
    fn emit(&self, ctx: &mut EmitContext<'_>, sink: &mut dyn ConfigSink) -> Result<Vec<PathBuf>> {
        let files = self.render(ctx)?;
        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            written.push(sink.write(&file.path, &file.contents)?);
        }
        Ok(written)
    }
}

/// Minimal builder for `Key=Value` ini-style files (NetworkManager, systemd).
#[derive(Debug, Default)]
pub(crate) struct IniDoc {
    out: String,
}

impl IniDoc {
    pub(crate) fn new() -> Self {
        let mut doc = Self::default();
        doc.comment(GENERATED_BY);
        doc
    }

    pub(crate) fn comment(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.out, "# {text}");
        self
    }

    pub(crate) fn section(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.out, "\n[{name}]");
        self
    }

    pub(crate) fn kv(&mut self, key: &str, value: impl std::fmt::Display) -> &mut Self {
        let _ = writeln!(self.out, "{key}={value}");
        self
    }

    pub(crate) fn finish(&self) -> String {
        self.out.clone()
    }
}

/// Parse the fixed address or fail the step with a clear message.
pub(crate) fn fixed_address(policy: &PolicyConfig) -> Result<netprivacy_core::MacAddr> {
    policy.fixed_mac_address.parse().map_err(|_| {
        NetPrivacyError::InvalidInput(format!(
            "fixed MAC address {:?} is not of the form XX:XX:XX:XX:XX:XX",
            policy.fixed_mac_address
        ))
    })
}

/// `vendor_random (Apple, Inc., A4:83:E7)` style description for file headers.
pub(crate) fn describe_vendor(policy: &PolicyConfig, registry: &VendorRegistry) -> String {
    match registry.get(&policy.vendor_id) {
        Some(v) => format!("{} ({}, {})", policy.mac_policy.as_str(), v.display_name, v.oui),
        None => format!(
            "{} (unknown vendor {:?}, generic prefix {})",
            policy.mac_policy.as_str(),
            policy.vendor_id,
            registry.lookup(&policy.vendor_id)
        ),
    }
}
