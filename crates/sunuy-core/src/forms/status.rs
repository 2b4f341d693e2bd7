use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FormKind;

/// Acknowledgement returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub kind: FormKind,
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
    /// Set for contest applications only.
    pub application_number: Option<String>,
}

/// Contest application number, e.g. `CND-2025-04217`.
#[must_use]
pub fn application_number(year: i32, serial: u32) -> String {
    format!("CND-{year}-{:05}", serial % 100_000)
}

/// Lifecycle of one form submission.
///
/// `Idle → Submitting → Succeeded | Failed → Idle`. A form may be resubmitted
/// from `Failed` without acknowledging first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        receipt: SubmissionReceipt,
    },
    Failed {
        reason: String,
    },
}

impl SubmitStatus {
    /// Enter `Submitting`. Returns `false` (and changes nothing) while a
    /// submission is in flight or a success is still being shown.
    pub fn begin(&mut self) -> bool {
        match self {
            SubmitStatus::Idle | SubmitStatus::Failed { .. } => {
                *self = SubmitStatus::Submitting;
                true
            }
            SubmitStatus::Submitting | SubmitStatus::Succeeded { .. } => false,
        }
    }

    pub fn succeed(&mut self, receipt: SubmissionReceipt) {
        if matches!(self, SubmitStatus::Submitting) {
            *self = SubmitStatus::Succeeded { receipt };
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        if matches!(self, SubmitStatus::Submitting) {
            *self = SubmitStatus::Failed {
                reason: reason.into(),
            };
        }
    }

    /// Dismiss a shown outcome.
    pub fn acknowledge(&mut self) {
        if matches!(
            self,
            SubmitStatus::Succeeded { .. } | SubmitStatus::Failed { .. }
        ) {
            *self = SubmitStatus::Idle;
        }
    }

    /// Drop an in-flight submission whose outcome will never arrive.
    /// Returns `true` if the status changed.
    pub fn abandon(&mut self) -> bool {
        if self.is_submitting() {
            *self = SubmitStatus::Idle;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitStatus::Submitting)
    }
}
