use std::path::PathBuf;

use serde::Serialize;

use netprivacy_core::{ErrorCode, NetPrivacyError};

use super::JobStep;

/// The single result handed back to the installation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<JobStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    /// Shown verbatim by the pipeline.
    pub message: String,
    /// Files written before the job ended, in order.
    pub written: Vec<PathBuf>,
}

impl JobOutcome {
    pub fn succeeded(message: impl Into<String>, written: Vec<PathBuf>) -> Self {
        Self {
            success: true,
            failed_step: None,
            error_code: None,
            message: message.into(),
            written,
        }
    }

    pub fn failed(step: JobStep, err: &NetPrivacyError, written: Vec<PathBuf>) -> Self {
        Self {
            success: false,
            failed_step: Some(step),
            error_code: Some(err.code()),
            message: format!("{} failed: {err}", step.label()),
            written,
        }
    }

    /// Failure not tied to a step (e.g. the job was run twice).
    pub fn rejected(err: &NetPrivacyError) -> Self {
        Self {
            success: false,
            failed_step: None,
            error_code: Some(err.code()),
            message: err.to_string(),
            written: Vec::new(),
        }
    }
}
