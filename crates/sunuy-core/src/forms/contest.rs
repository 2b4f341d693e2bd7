use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, AttachmentRule};
use super::{FieldChecks, FieldError, FormKind, Validate};
use crate::cascade::CascadingSelector;
use crate::locations::LocationIndex;

const ID_PHOTO: AttachmentRule = AttachmentRule::new("Photo d'identité", AttachmentRule::IMAGES);
const PHOTOS: AttachmentRule = AttachmentRule::new("Photos de réalisations", AttachmentRule::IMAGES);
const CERTIFICATE: AttachmentRule =
    AttachmentRule::new("Attestation ou diplôme", AttachmentRule::IMAGES_OR_PDF);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Homme,
    Femme,
}

impl Gender {
    /// Senegalese CIN numbers start with `1` for men and `2` for women.
    #[must_use]
    pub fn from_cin(cin: &str) -> Option<Self> {
        match cin.chars().next() {
            Some('1') => Some(Gender::Homme),
            Some('2') => Some(Gender::Femme),
            _ => None,
        }
    }
}

/// Trades admitted to the contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestTrade {
    #[serde(rename = "Menuisier bois")]
    MenuisierBois,
    Autre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestExperience {
    #[serde(rename = "Moins de 2 ans")]
    LessThanTwo,
    #[serde(rename = "2-5 ans")]
    TwoToFive,
    #[serde(rename = "6-10 ans")]
    SixToTen,
    #[serde(rename = "Plus de 10 ans")]
    MoreThanTen,
}

/// Registration for the national carpentry contest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestApplication {
    /// First and last name in one field.
    pub full_name: String,
    pub gender: Option<Gender>,
    pub cin: String,
    pub phone: String,
    pub email: String,
    pub region: String,
    pub department: String,
    pub commune: String,
    pub village: String,
    pub profession: Option<ContestTrade>,
    pub years_experience: Option<ContestExperience>,
    pub workshop: String,
    pub ninea: String,
    pub approval: String,
    pub id_photo: Option<Attachment>,
    pub photos: Vec<Attachment>,
    pub certificate: Option<Attachment>,
    pub motivation: String,
    pub certified_accurate: bool,
    pub data_consent: bool,
}

impl ContestApplication {
    /// Record the CIN and infer gender from its first digit when possible.
    /// An unrecognized prefix leaves the current gender untouched.
    pub fn set_cin(&mut self, cin: impl Into<String>) {
        self.cin = cin.into();
        if let Some(gender) = Gender::from_cin(&self.cin) {
            self.gender = Some(gender);
        }
    }

    /// Fill a missing gender from the CIN, as typing the CIN would have.
    pub fn infer_gender(&mut self) {
        if self.gender.is_none() {
            self.gender = Gender::from_cin(&self.cin);
        }
    }

    /// Copy the current cascading selection into the location fields.
    pub fn apply_location(&mut self, selector: &CascadingSelector<'_>) {
        self.region = selector.region().to_string();
        self.department = selector.department().to_string();
        self.commune = selector.commune().to_string();
    }

    /// Location fields that do not resolve in `index`. Blank fields are left
    /// to the required checks.
    #[must_use]
    pub fn location_errors(&self, index: &LocationIndex) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.region.is_empty() {
            return errors;
        }
        if index.region(&self.region).is_none() {
            errors.push(FieldError::UnknownLocation {
                field: "region",
                value: self.region.clone(),
            });
            return errors;
        }
        if self.department.is_empty() {
            return errors;
        }
        if !index
            .departments(&self.region)
            .iter()
            .any(|d| d.name == self.department)
        {
            errors.push(FieldError::UnknownLocation {
                field: "department",
                value: self.department.clone(),
            });
            return errors;
        }
        if !self.commune.is_empty()
            && !index
                .communes(&self.region, &self.department)
                .contains(&self.commune)
        {
            errors.push(FieldError::UnknownLocation {
                field: "commune",
                value: self.commune.clone(),
            });
        }
        errors
    }
}

impl Validate for ContestApplication {
    fn kind(&self) -> FormKind {
        FormKind::Contest
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let mut checks = FieldChecks::default();
        checks
            .required("full_name", &self.full_name)
            .required_some("gender", self.gender.as_ref())
            .required("cin", &self.cin)
            .required("phone", &self.phone)
            .optional_email("email", &self.email)
            .required("region", &self.region)
            .required("department", &self.department)
            .required("commune", &self.commune)
            .required_some("profession", self.profession.as_ref())
            .required_some("years_experience", self.years_experience.as_ref())
            .required("workshop", &self.workshop)
            .required("ninea", &self.ninea)
            .required_some("id_photo", self.id_photo.as_ref())
            .required_some("photos", self.photos.first())
            .required("motivation", &self.motivation)
            .accepted("certified_accurate", self.certified_accurate)
            .accepted("data_consent", self.data_consent);
        checks.finish()
    }

    fn warnings(&self) -> Vec<String> {
        let mut hints = ID_PHOTO.hints_all(&self.id_photo);
        hints.extend(PHOTOS.hints_all(&self.photos));
        hints.extend(CERTIFICATE.hints_all(&self.certificate));
        hints
    }
}
