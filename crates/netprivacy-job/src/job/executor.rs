//! Sequential executor.
//!
//! Steps run in registration order (MAC, IPv6, link) and stop at the first
//! failure: the link override assumes the MAC policy was written, so a later
//! step is never applied on top of a failed earlier one.

use std::sync::Arc;

use rand::RngCore;

use netprivacy_core::{NetPrivacyError, PolicyConfig, VendorRegistry};

use super::{JobOutcome, JobState, JobStep};
use crate::emit::{
    ConfigEmitter, EmitContext, Ipv6PrivacyEmitter, LinkOverrideEmitter, MacOverrideEmitter,
};
use crate::status;
use crate::writer::ConfigSink;

/// Receives `(fraction done, status text)` updates.
pub trait ProgressSink {
    fn progress(&mut self, fraction: f64, status: &str);
}

impl<F: FnMut(f64, &str)> ProgressSink for F {
    fn progress(&mut self, fraction: f64, status: &str) {
        self(fraction, status)
    }
}

/// One install-time run over a resolved policy.
pub struct NetPrivacyJob {
    policy: PolicyConfig,
    registry: Arc<VendorRegistry>,
    emitters: Vec<Box<dyn ConfigEmitter>>,
    state: JobState,
}

impl NetPrivacyJob {
    pub fn new(policy: PolicyConfig, registry: Arc<VendorRegistry>) -> Self {
        let mut job = Self {
            policy,
            registry,
            emitters: Vec::new(),
            state: JobState::Pending,
        };
        job.register(Box::new(MacOverrideEmitter));
        job.register(Box::new(Ipv6PrivacyEmitter));
        job.register(Box::new(LinkOverrideEmitter));
        job
    }

    fn register(&mut self, emitter: Box<dyn ConfigEmitter>) {
        self.emitters.push(emitter);
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn pretty_name(&self) -> &'static str {
        "Network Privacy"
    }

    pub fn pretty_description(&self) -> String {
        format!("Configure network privacy ({})", self.status_text())
    }

    /// Human-readable net effect, available before the job runs.
    pub fn status_text(&self) -> String {
        status::status_text(&self.policy, &self.registry)
    }

    /// Steps that will run for this policy, in order.
    pub fn planned_steps(&self) -> Vec<JobStep> {
        self.emitters
            .iter()
            .filter(|e| e.applies(&self.policy))
            .map(|e| e.step())
            .collect()
    }

    /// Run with the thread RNG and no progress reporting.
    pub fn exec(&mut self, sink: &mut dyn ConfigSink) -> JobOutcome {
        self.exec_with(sink, &mut rand::thread_rng(), &mut |_: f64, _: &str| {})
    }

    pub fn exec_with(
        &mut self,
        sink: &mut dyn ConfigSink,
        rng: &mut dyn RngCore,
        progress: &mut dyn ProgressSink,
    ) -> JobOutcome {
        if self.state != JobState::Pending {
            return JobOutcome::rejected(&NetPrivacyError::InvalidInput(
                "network privacy job has already run".into(),
            ));
        }
        self.state = JobState::Running;

        let span = tracing::info_span!(
            "netprivacy_job",
            mac_policy = self.policy.mac_policy.as_str(),
            ipv6_mode = self.policy.ipv6_mode.as_str()
        );
        let _enter = span.enter();

        if !self.policy.requires_job() {
            tracing::info!("no network privacy changes requested");
            progress.progress(1.0, "Nothing to configure");
            self.state = JobState::Succeeded;
            return JobOutcome::succeeded("No network privacy changes requested", Vec::new());
        }

        let steps: Vec<&dyn ConfigEmitter> = self
            .emitters
            .iter()
            .filter(|e| e.applies(&self.policy))
            .map(Box::as_ref)
            .collect();

        let total = steps.len() as f64;
        let mut written = Vec::new();
        for (i, emitter) in steps.iter().enumerate() {
            let step = emitter.step();
            progress.progress(i as f64 / total, step.status_message());

            let mut ctx = EmitContext {
                policy: &self.policy,
                registry: &self.registry,
                rng: &mut *rng,
            };
            match emitter.emit(&mut ctx, sink) {
                Ok(paths) => {
                    tracing::info!(step = %step, files = paths.len(), "step complete");
                    written.extend(paths);
                }
                Err(e) => {
                    let skipped = steps.len() - i - 1;
                    tracing::error!(step = %step, code = e.code().as_str(), error = %e, skipped, "step failed");
                    self.state = JobState::Failed;
                    return JobOutcome::failed(step, &e, written);
                }
            }
        }

        progress.progress(1.0, "Network privacy configured");
        self.state = JobState::Succeeded;
        JobOutcome::succeeded(
            format!("Network privacy configured: {}", self.status_text()),
            written,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::DryRun;
    use netprivacy_core::{Ipv6Mode, MacPolicy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn job(mac_policy: MacPolicy, ipv6_mode: Ipv6Mode) -> NetPrivacyJob {
        let policy = PolicyConfig {
            mac_policy,
            ipv6_mode,
            vendor_id: "intel".into(),
            ..PolicyConfig::default()
        };
        NetPrivacyJob::new(policy, Arc::new(VendorRegistry::with_defaults()))
    }

    #[test]
    fn planned_steps_follow_policy() {
        assert!(job(MacPolicy::Disabled, Ipv6Mode::Unchanged).planned_steps().is_empty());
        assert_eq!(
            job(MacPolicy::Disabled, Ipv6Mode::Disabled).planned_steps(),
            vec![JobStep::Ipv6Config]
        );
        assert_eq!(
            job(MacPolicy::Random, Ipv6Mode::PrivacyEnabled).planned_steps(),
            vec![JobStep::MacConfig, JobStep::Ipv6Config, JobStep::LinkConfig]
        );
    }

    #[test]
    fn planned_steps_agree_with_requires_job() {
        for mac in [MacPolicy::Disabled, MacPolicy::Random, MacPolicy::VendorRandom, MacPolicy::Fixed] {
            for ipv6 in [Ipv6Mode::Unchanged, Ipv6Mode::PrivacyEnabled, Ipv6Mode::Disabled] {
                let j = job(mac, ipv6);
                assert_eq!(j.planned_steps().is_empty(), !j.policy().requires_job(), "{mac:?}/{ipv6:?}");
            }
        }
    }

    #[test]
    fn nothing_requested_writes_nothing() {
        let mut sink = DryRun::new("/target");
        let mut j = job(MacPolicy::Disabled, Ipv6Mode::Unchanged);
        let out = j.exec(&mut sink);
        assert!(out.success);
        assert!(out.written.is_empty());
        assert!(sink.files().is_empty());
        assert_eq!(j.state(), JobState::Succeeded);
    }

    #[test]
    fn description_names_the_effect() {
        let j = job(MacPolicy::VendorRandom, Ipv6Mode::PrivacyEnabled);
        assert_eq!(j.pretty_name(), "Network Privacy");
        assert_eq!(
            j.pretty_description(),
            "Configure network privacy (Vendor-random MAC (Intel Corporation); IPv6 privacy enabled)"
        );
    }

    #[test]
    fn progress_is_monotonic_and_finishes() {
        let mut seen = Vec::new();
        let mut sink = DryRun::new("/target");
        let mut j = job(MacPolicy::VendorRandom, Ipv6Mode::PrivacyEnabled);
        let out = j.exec_with(
            &mut sink,
            &mut StdRng::seed_from_u64(1),
            &mut |f: f64, s: &str| seen.push((f, s.to_string())),
        );
        assert!(out.success, "{}", out.message);
        assert_eq!(j.state(), JobState::Succeeded);
        assert_eq!(seen.len(), 4);
        assert!(seen.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(seen.last().map(|p| p.0), Some(1.0));
        assert_eq!(seen[0].1, JobStep::MacConfig.status_message());
    }

    #[test]
    fn second_run_is_rejected() {
        let mut sink = DryRun::new("/target");
        let mut j = job(MacPolicy::Random, Ipv6Mode::Unchanged);
        assert!(j.exec(&mut sink).success);
        let again = j.exec(&mut sink);
        assert!(!again.success);
        assert_eq!(again.failed_step, None);
        assert_eq!(sink.files().len(), 2);
    }

    #[test]
    fn invalid_fixed_address_fails_first_step() {
        let policy = PolicyConfig {
            mac_policy: MacPolicy::Fixed,
            fixed_mac_address: "not-a-mac".into(),
            ipv6_mode: Ipv6Mode::Disabled,
            ..PolicyConfig::default()
        };
        let mut j = NetPrivacyJob::new(policy, Arc::new(VendorRegistry::with_defaults()));
        let mut sink = DryRun::new("/target");
        let out = j.exec(&mut sink);
        assert!(!out.success);
        assert_eq!(out.failed_step, Some(JobStep::MacConfig));
        assert_eq!(out.error_code.map(|c| c.as_str()), Some("INVALID_INPUT"));
        assert!(sink.files().is_empty());
        assert_eq!(j.state(), JobState::Failed);
    }
}
