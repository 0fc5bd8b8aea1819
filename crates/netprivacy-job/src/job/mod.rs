//! Job executor and its result types.

pub mod executor;
pub mod outcome;

use serde::Serialize;

pub use executor::{NetPrivacyJob, ProgressSink};
pub use outcome::JobOutcome;

/// Steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobStep {
    MacConfig,
    Ipv6Config,
    LinkConfig,
}

impl JobStep {
    pub fn label(self) -> &'static str {
        match self {
            JobStep::MacConfig => "MAC address configuration",
            JobStep::Ipv6Config => "IPv6 configuration",
            JobStep::LinkConfig => "link override configuration",
        }
    }

    /// Progress text shown while the step runs.
    pub fn status_message(self) -> &'static str {
        match self {
            JobStep::MacConfig => "Writing MAC address policy...",
            JobStep::Ipv6Config => "Writing IPv6 privacy settings...",
            JobStep::LinkConfig => "Writing early-boot link override...",
        }
    }
}

impl std::fmt::Display for JobStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `Pending -> Running -> {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}
