//! netprivacy-job
//!
//! Applies the selected network privacy policy to an installed system:
//! - reads the job config (strict YAML)
//! - writes NetworkManager / sysctl / systemd.link files under the target root
//! - prints a single JSON `JobOutcome` on stdout; logs go to stderr

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use netprivacy_job::{config, ConfigSink, DryRun, JobOutcome, JobSetup, TargetFs};

#[derive(Parser, Debug)]
#[command(name = "netprivacy-job", version, about = "Write network privacy settings to an installed system")]
struct Cli {
    #[arg(long, default_value = "netprivacy.yaml", help = "Job configuration file")]
    config: PathBuf,
    #[arg(long, help = "Target root (overrides target_root in the config)")]
    root: Option<PathBuf>,
    #[arg(long, help = "Render and log files without writing them")]
    dry_run: bool,
    #[arg(long, help = "Print the status text for the selection and exit")]
    status: bool,
    #[arg(long, help = "Print a sample address for the selection and exit")]
    preview: bool,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match config::load_from_file(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(config = %cli.config.display(), error = %e, "config load failed");
            return report(&JobOutcome::rejected(&e));
        }
    };
    let setup = JobSetup::new(cfg);
    let mut job = setup.job();

    if cli.status {
        println!("{}", job.status_text());
        return ExitCode::SUCCESS;
    }
    if cli.preview {
        match setup.preview() {
            Some(mac) => println!("{mac}"),
            None => println!("-"),
        }
        return ExitCode::SUCCESS;
    }

    let root = match cli.root.or_else(|| setup.target_root().map(PathBuf::from)) {
        Some(root) => root,
        None => {
            let e = netprivacy_core::NetPrivacyError::Config(
                "no target root: pass --root or set target_root".into(),
            );
            tracing::error!(error = %e, "cannot run");
            return report(&JobOutcome::rejected(&e));
        }
    };

    tracing::info!(
        job = job.pretty_name(),
        root = %root.display(),
        dry_run = cli.dry_run,
        "{}",
        job.pretty_description()
    );

    let mut sink: Box<dyn ConfigSink> = if cli.dry_run {
        Box::new(DryRun::new(root))
    } else {
        Box::new(TargetFs::new(root))
    };
    let outcome = job.exec_with(
        sink.as_mut(),
        &mut rand::thread_rng(),
        &mut |fraction: f64, status: &str| {
            tracing::info!(progress = fraction, "{status}");
        },
    );
    report(&outcome)
}

fn report(outcome: &JobOutcome) -> ExitCode {
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "cannot serialize outcome"),
    }
    if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
