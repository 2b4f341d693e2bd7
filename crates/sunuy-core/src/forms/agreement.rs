use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, AttachmentRule};
use super::{FieldChecks, FieldError, FormKind, Validate};
use crate::profession::Profession;

const CNI: AttachmentRule = AttachmentRule::new("Copie de la CNI", AttachmentRule::IMAGES_OR_PDF);
const NINEA: AttachmentRule = AttachmentRule::new("NINEA", AttachmentRule::IMAGES_OR_PDF);
const RESIDENCE: AttachmentRule =
    AttachmentRule::new("Certificat de résidence", AttachmentRule::IMAGES_OR_PDF);
const TRAINING: AttachmentRule =
    AttachmentRule::new("Attestation de formation", AttachmentRule::IMAGES_OR_PDF);
const WORK_PHOTOS: AttachmentRule =
    AttachmentRule::new("Photos de réalisations", AttachmentRule::IMAGES);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceRange {
    #[serde(rename = "3-5 ans")]
    ThreeToFive,
    #[serde(rename = "6-10 ans")]
    SixToTen,
    #[serde(rename = "11-15 ans")]
    ElevenToFifteen,
    #[serde(rename = "Plus de 15 ans")]
    MoreThanFifteen,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementDocuments {
    pub cni: Option<Attachment>,
    pub ninea: Option<Attachment>,
    pub proof_of_residence: Option<Attachment>,
    pub training_certificate: Option<Attachment>,
    pub work_photos: Vec<Attachment>,
}

/// Request for the "artisan agréé" label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementApplication {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub activity: Option<Profession>,
    pub experience: Option<ExperienceRange>,
    pub address: String,
    pub certified_accurate: bool,
    pub documents: AgreementDocuments,
}

impl Validate for AgreementApplication {
    fn kind(&self) -> FormKind {
        FormKind::Agreement
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let docs = &self.documents;
        let mut checks = FieldChecks::default();
        checks
            .required("full_name", &self.full_name)
            .required("phone", &self.phone)
            .optional_email("email", &self.email)
            .required_some("activity", self.activity.as_ref())
            .required_some("experience", self.experience.as_ref())
            .required("address", &self.address)
            .required_some("cni", docs.cni.as_ref())
            .required_some("ninea", docs.ninea.as_ref())
            .required_some("proof_of_residence", docs.proof_of_residence.as_ref())
            .required_some("training_certificate", docs.training_certificate.as_ref())
            .required_some("work_photos", docs.work_photos.first())
            .accepted("certified_accurate", self.certified_accurate);
        checks.finish()
    }

    fn warnings(&self) -> Vec<String> {
        let docs = &self.documents;
        let mut hints = CNI.hints_all(&docs.cni);
        hints.extend(NINEA.hints_all(&docs.ninea));
        hints.extend(RESIDENCE.hints_all(&docs.proof_of_residence));
        hints.extend(TRAINING.hints_all(&docs.training_certificate));
        hints.extend(WORK_PHOTOS.hints_all(&docs.work_photos));
        hints
    }
}
