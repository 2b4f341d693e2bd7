use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use sunuy_core::forms::{
    application_number, AuthRequest, FormKind, SubmissionReceipt, SubmitStatus, Validate,
};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::DirectoryError;

/// Destination for validated forms.
pub trait FormSubmitter: Send + Sync + 'static {
    fn submit<F: Validate + Sync>(
        &self,
        form: &F,
    ) -> impl Future<Output = Result<SubmissionReceipt, DirectoryError>> + Send;
}

/// Accepts every form after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl FormSubmitter for SimulatedSubmitter {
    async fn submit<F: Validate + Sync>(&self, form: &F) -> Result<SubmissionReceipt, DirectoryError> {
        let kind = form.kind();
        tokio::time::sleep(self.delay).await;

        let submitted_at = Utc::now();
        let application_number = (kind == FormKind::Contest)
            .then(|| application_number(submitted_at.year(), rand::random::<u32>()));
        let receipt = SubmissionReceipt {
            kind,
            reference: Uuid::new_v4().to_string(),
            submitted_at,
            application_number,
        };
        tracing::info!(
            kind = %kind,
            reference = %receipt.reference,
            application_number = receipt.application_number.as_deref(),
            "form submitted"
        );
        Ok(receipt)
    }
}

/// A visitor who signed in or registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visitor {
    pub id: String,
    pub via: FormKind,
    pub signed_in_at: DateTime<Utc>,
}

pub trait Authenticator: Send + Sync + 'static {
    fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = Result<Visitor, DirectoryError>> + Send;
}

/// Signs in any well-formed request after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Visitor, DirectoryError> {
        tokio::time::sleep(self.delay).await;
        let visitor = Visitor {
            id: Uuid::new_v4().to_string(),
            via: request.kind(),
            signed_in_at: Utc::now(),
        };
        tracing::info!(visitor = %visitor.id, via = %visitor.via, "visitor signed in");
        Ok(visitor)
    }
}

/// Drives one form's [`SubmitStatus`] through a submission.
///
/// A success stays visible for the confirmation delay, then the status
/// returns to `Idle` on its own.
pub struct FormController<S> {
    submitter: S,
    confirmation_delay: Duration,
    status: Arc<watch::Sender<SubmitStatus>>,
}

impl<S: FormSubmitter> FormController<S> {
    #[must_use]
    pub fn new(submitter: S, confirmation_delay: Duration) -> Self {
        let (status, _) = watch::channel(SubmitStatus::default());
        Self {
            submitter,
            confirmation_delay,
            status: Arc::new(status),
        }
    }

    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmitStatus> {
        self.status.subscribe()
    }

    /// Dismiss a shown success or failure early.
    pub fn acknowledge(&self) {
        self.status.send_if_modified(|status| {
            let before = status.clone();
            status.acknowledge();
            *status != before
        });
    }

    /// Validate and submit `form`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Form`] without touching the status when the
    /// form is invalid, [`DirectoryError::AlreadySubmitting`] while another
    /// submission or confirmation is showing, or the submitter's error.
    pub async fn submit<F: Validate + Sync>(
        &self,
        form: &F,
    ) -> Result<SubmissionReceipt, DirectoryError> {
        form.validate()?;
        for warning in form.warnings() {
            tracing::warn!(kind = %form.kind(), "{warning}");
        }

        if !self.status.send_if_modified(SubmitStatus::begin) {
            return Err(DirectoryError::AlreadySubmitting);
        }
        let _in_flight = InFlight {
            status: &self.status,
        };

        match self.submitter.submit(form).await {
            Ok(receipt) => {
                let reference = receipt.reference.clone();
                self.status.send_modify(|s| s.succeed(receipt.clone()));
                self.schedule_acknowledge(reference);
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(kind = %form.kind(), error = %e, "form submission failed");
                self.status.send_modify(|s| s.fail(e.to_string()));
                Err(e)
            }
        }
    }

    fn schedule_acknowledge(&self, reference: String) {
        let status = Arc::clone(&self.status);
        let delay = self.confirmation_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_if_modified(|s| {
                let current = matches!(
                    s,
                    SubmitStatus::Succeeded { receipt } if receipt.reference == reference
                );
                if current {
                    s.acknowledge();
                }
                current
            });
        });
    }
}

/// Returns the status to `Idle` if a submission is dropped before it
/// resolves. Once the outcome arrives the status has moved on and this is a
/// no-op.
struct InFlight<'a> {
    status: &'a watch::Sender<SubmitStatus>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.status.send_if_modified(SubmitStatus::abandon) {
            tracing::warn!("submission dropped before completion");
        }
    }
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
