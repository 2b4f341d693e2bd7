//! Typed application forms and their submission lifecycle.
//!
//! Validation mirrors required-field semantics only. Attachment type and
//! size hints never block a submission; they surface as warnings.

pub mod agreement;
pub mod attachment;
pub mod auth;
pub mod contest;
pub mod market;
mod status;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use agreement::{AgreementApplication, AgreementDocuments, ExperienceRange};
pub use attachment::{Attachment, AttachmentRule};
pub use auth::{
    AdministrationForm, AuthFlow, AuthRequest, AuthStep, EntityType, LoginForm, ParticulierForm,
    ProfileKind,
};
pub use contest::{ContestApplication, ContestExperience, ContestTrade, Gender};
pub use market::{MarketProposal, MarketType};
pub use status::{application_number, SubmissionReceipt, SubmitStatus};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Agreement,
    Contest,
    MarketProposal,
    Login,
    RegisterParticulier,
    RegisterAdministration,
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FormKind::Agreement => "agreement",
            FormKind::Contest => "contest",
            FormKind::MarketProposal => "market_proposal",
            FormKind::Login => "login",
            FormKind::RegisterParticulier => "register_particulier",
            FormKind::RegisterAdministration => "register_administration",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },

    #[error("{field} must be accepted")]
    NotAccepted { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} '{value}' is not a known location")]
    UnknownLocation { field: &'static str, value: String },

    #[error("passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} form is invalid: {}", summarize(.errors))]
pub struct FormError {
    pub kind: FormKind,
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A form that can be checked before submission.
pub trait Validate {
    fn kind(&self) -> FormKind;

    /// Field-level problems, empty when the form may be submitted.
    fn field_errors(&self) -> Vec<FieldError>;

    /// Non-blocking notices (attachment hints).
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// # Errors
    ///
    /// Returns `FormError` listing every invalid field.
    fn validate(&self) -> Result<(), FormError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormError {
                kind: self.kind(),
                errors,
            })
        }
    }
}

/// Accumulates field errors for one form.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub(crate) fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::Required { field });
        }
        self
    }

    pub(crate) fn required_some<T>(&mut self, field: &'static str, value: Option<&T>) -> &mut Self {
        if value.is_none() {
            self.errors.push(FieldError::Required { field });
        }
        self
    }

    /// Required and shaped like an email address.
    pub(crate) fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::Required { field });
        } else {
            self.optional_email(field, value);
        }
        self
    }

    /// Empty is fine; anything else must look like an email address.
    pub(crate) fn optional_email(&mut self, field: &'static str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !EMAIL_RE.is_match(value) {
            self.errors.push(FieldError::InvalidEmail { field });
        }
        self
    }

    pub(crate) fn accepted(&mut self, field: &'static str, value: bool) -> &mut Self {
        if !value {
            self.errors.push(FieldError::NotAccepted { field });
        }
        self
    }

    pub(crate) fn push(&mut self, error: FieldError) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub(crate) fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}
