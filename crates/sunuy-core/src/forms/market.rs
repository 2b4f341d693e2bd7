use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, AttachmentRule};
use super::{FieldChecks, FieldError, FormKind, Validate};

const SPECIFICATIONS: AttachmentRule =
    AttachmentRule::new("Cahier des charges", AttachmentRule::IMAGES_OR_PDF);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketType {
    #[default]
    Fourniture,
    Travaux,
    Services,
    Maintenance,
    #[serde(rename = "Réparation")]
    Reparation,
    Installation,
    #[serde(rename = "Rénovation")]
    Renovation,
    Construction,
}

/// Public-market offer addressed to one artisan of the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketProposal {
    pub artisan_id: String,
    pub title: String,
    pub description: String,
    pub budget_fcfa: u64,
    pub start_date: Option<NaiveDate>,
    pub duration: String,
    pub market_type: MarketType,
    pub attachment: Option<Attachment>,
}

impl Validate for MarketProposal {
    fn kind(&self) -> FormKind {
        FormKind::MarketProposal
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let mut checks = FieldChecks::default();
        checks
            .required("artisan_id", &self.artisan_id)
            .required("title", &self.title)
            .required("description", &self.description);
        if self.budget_fcfa == 0 {
            checks.push(FieldError::NotPositive {
                field: "budget_fcfa",
            });
        }
        checks
            .required_some("start_date", self.start_date.as_ref())
            .required("duration", &self.duration);
        checks.finish()
    }

    fn warnings(&self) -> Vec<String> {
        SPECIFICATIONS.hints_all(&self.attachment)
    }
}
