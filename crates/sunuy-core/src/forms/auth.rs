//! Visitor sign-in and registration.
//!
//! [`AuthFlow`] is a tagged state machine: the active variant carries the
//! form being filled in, so only the current step's data exists.

use serde::{Deserialize, Serialize};

use super::{FieldChecks, FieldError, FormKind, Validate};

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("phone", &self.phone)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl Validate for LoginForm {
    fn kind(&self) -> FormKind {
        FormKind::Login
    }

    fn field_errors(&self) -> Vec<FieldError> {
        FieldChecks::default()
            .required("phone", &self.phone)
            .required("password", &self.password)
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParticulierForm {
    pub full_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for ParticulierForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticulierForm")
            .field("full_name", &self.full_name)
            .field("phone", &self.phone)
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

impl Validate for ParticulierForm {
    fn kind(&self) -> FormKind {
        FormKind::RegisterParticulier
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let mut checks = FieldChecks::default();
        checks
            .required("full_name", &self.full_name)
            .required("phone", &self.phone)
            .required("password", &self.password)
            .required("confirm_password", &self.confirm_password);
        if !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password != self.confirm_password
        {
            checks.push(FieldError::PasswordMismatch);
        }
        checks.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "Ministère (Dage)")]
    Ministere,
    #[serde(rename = "Agence d'exécution")]
    AgenceExecution,
    #[serde(rename = "Société nationale")]
    SocieteNationale,
    #[serde(rename = "Projet programme")]
    ProjetProgramme,
    Autre,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdministrationForm {
    pub institution_name: String,
    pub entity_type: Option<EntityType>,
    pub institutional_email: String,
}

impl Validate for AdministrationForm {
    fn kind(&self) -> FormKind {
        FormKind::RegisterAdministration
    }

    fn field_errors(&self) -> Vec<FieldError> {
        FieldChecks::default()
            .required("institution_name", &self.institution_name)
            .required_some("entity_type", self.entity_type.as_ref())
            .email("institutional_email", &self.institutional_email)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Particulier,
    Administration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStep {
    #[default]
    Login,
    Register,
    ProfileSelection,
    RegisterParticulier,
    RegisterAdministration,
}

impl AuthStep {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthStep::Login => "Connexion",
            AuthStep::Register => "Inscription",
            AuthStep::ProfileSelection => "Compte",
            AuthStep::RegisterParticulier => "Inscription du particulier",
            AuthStep::RegisterAdministration => "Information de profil",
        }
    }

    /// Step reached by the back arrow. `Login` has none and maps to itself.
    #[must_use]
    pub fn back(self) -> Self {
        match self {
            AuthStep::Login | AuthStep::Register => AuthStep::Login,
            AuthStep::ProfileSelection => AuthStep::Register,
            AuthStep::RegisterParticulier | AuthStep::RegisterAdministration => {
                AuthStep::ProfileSelection
            }
        }
    }
}

/// A validated-ready request for the authenticator, built from the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login(LoginForm),
    RegisterParticulier(ParticulierForm),
    RegisterAdministration(AdministrationForm),
}

impl Validate for AuthRequest {
    fn kind(&self) -> FormKind {
        match self {
            AuthRequest::Login(form) => form.kind(),
            AuthRequest::RegisterParticulier(form) => form.kind(),
            AuthRequest::RegisterAdministration(form) => form.kind(),
        }
    }

    fn field_errors(&self) -> Vec<FieldError> {
        match self {
            AuthRequest::Login(form) => form.field_errors(),
            AuthRequest::RegisterParticulier(form) => form.field_errors(),
            AuthRequest::RegisterAdministration(form) => form.field_errors(),
        }
    }
}

/// Sign-in state machine. Each step owns only the data its form collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlow {
    Login(LoginForm),
    Register,
    ProfileSelection,
    RegisterParticulier(ParticulierForm),
    RegisterAdministration(AdministrationForm),
}

impl Default for AuthFlow {
    fn default() -> Self {
        AuthFlow::Login(LoginForm::default())
    }
}

impl AuthFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> AuthStep {
        match self {
            AuthFlow::Login(_) => AuthStep::Login,
            AuthFlow::Register => AuthStep::Register,
            AuthFlow::ProfileSelection => AuthStep::ProfileSelection,
            AuthFlow::RegisterParticulier(_) => AuthStep::RegisterParticulier,
            AuthFlow::RegisterAdministration(_) => AuthStep::RegisterAdministration,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.step().title()
    }

    /// `Login → Register`. Returns `false` from any other step.
    pub fn go_to_register(&mut self) -> bool {
        self.advance(AuthStep::Login, AuthFlow::Register)
    }

    /// `Register → ProfileSelection`.
    pub fn continue_to_profile_selection(&mut self) -> bool {
        self.advance(AuthStep::Register, AuthFlow::ProfileSelection)
    }

    /// `ProfileSelection → RegisterParticulier | RegisterAdministration`,
    /// starting from an empty form.
    pub fn choose_profile(&mut self, profile: ProfileKind) -> bool {
        let next = match profile {
            ProfileKind::Particulier => AuthFlow::RegisterParticulier(ParticulierForm::default()),
            ProfileKind::Administration => {
                AuthFlow::RegisterAdministration(AdministrationForm::default())
            }
        };
        self.advance(AuthStep::ProfileSelection, next)
    }

    /// Follow the back arrow. Leaving a form step discards what was typed;
    /// `Login` has no back step and keeps its data.
    pub fn back(&mut self) {
        match self.step() {
            AuthStep::Login => {}
            AuthStep::Register => self.reset(),
            AuthStep::ProfileSelection => *self = AuthFlow::Register,
            AuthStep::RegisterParticulier | AuthStep::RegisterAdministration => {
                *self = AuthFlow::ProfileSelection;
            }
        }
    }

    /// Return to an empty `Login` step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The request the active step would submit, if it submits anything.
    #[must_use]
    pub fn request(&self) -> Option<AuthRequest> {
        match self {
            AuthFlow::Login(form) => Some(AuthRequest::Login(form.clone())),
            AuthFlow::RegisterParticulier(form) => {
                Some(AuthRequest::RegisterParticulier(form.clone()))
            }
            AuthFlow::RegisterAdministration(form) => {
                Some(AuthRequest::RegisterAdministration(form.clone()))
            }
            AuthFlow::Register | AuthFlow::ProfileSelection => None,
        }
    }

    fn advance(&mut self, from: AuthStep, to: AuthFlow) -> bool {
        if self.step() == from {
            *self = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_registration_path() {
        let mut flow = AuthFlow::new();
        assert_eq!(flow.title(), "Connexion");
        assert!(flow.go_to_register());
        assert_eq!(flow.title(), "Inscription");
        assert!(flow.continue_to_profile_selection());
        assert_eq!(flow.title(), "Compte");
        assert!(flow.choose_profile(ProfileKind::Administration));
        assert_eq!(flow.step(), AuthStep::RegisterAdministration);
        assert_eq!(flow.title(), "Information de profil");
    }

    #[test]
    fn back_steps() {
        assert_eq!(AuthStep::Login.back(), AuthStep::Login);
        assert_eq!(AuthStep::Register.back(), AuthStep::Login);
        assert_eq!(AuthStep::ProfileSelection.back(), AuthStep::Register);
        assert_eq!(
            AuthStep::RegisterParticulier.back(),
            AuthStep::ProfileSelection
        );
        assert_eq!(
            AuthStep::RegisterAdministration.back(),
            AuthStep::ProfileSelection
        );
    }

    #[test]
    fn out_of_order_transitions_are_ignored() {
        let mut flow = AuthFlow::new();
        assert!(!flow.continue_to_profile_selection());
        assert!(!flow.choose_profile(ProfileKind::Particulier));
        assert_eq!(flow.step(), AuthStep::Login);
    }

    #[test]
    fn flow_back_walks_the_table() {
        let mut flow = AuthFlow::new();
        flow.go_to_register();
        flow.continue_to_profile_selection();
        flow.choose_profile(ProfileKind::Particulier);

        flow.back();
        assert_eq!(flow.step(), AuthStep::ProfileSelection);
        flow.back();
        assert_eq!(flow.step(), AuthStep::Register);
        flow.back();
        assert_eq!(flow, AuthFlow::default());
    }

    #[test]
    fn back_from_login_keeps_typed_phone() {
        let mut flow = AuthFlow::Login(LoginForm {
            phone: "77 111 22 33".to_string(),
            password: String::new(),
        });
        flow.back();
        assert!(matches!(flow, AuthFlow::Login(ref form) if form.phone == "77 111 22 33"));
    }

    #[test]
    fn leaving_a_form_step_discards_its_data() {
        let mut flow = AuthFlow::ProfileSelection;
        flow.choose_profile(ProfileKind::Particulier);
        if let AuthFlow::RegisterParticulier(form) = &mut flow {
            form.full_name = "Ousmane Ba".to_string();
        }

        flow.back();
        flow.choose_profile(ProfileKind::Particulier);
        assert_eq!(
            flow,
            AuthFlow::RegisterParticulier(ParticulierForm::default())
        );

        flow.reset();
        assert_eq!(flow.step(), AuthStep::Login);
    }

    #[test]
    fn request_follows_active_step() {
        let mut flow = AuthFlow::new();
        assert!(matches!(flow.request(), Some(AuthRequest::Login(_))));
        flow.go_to_register();
        assert!(flow.request().is_none());
        flow.continue_to_profile_selection();
        assert!(flow.request().is_none());
        flow.choose_profile(ProfileKind::Particulier);
        let request = flow.request().unwrap();
        assert_eq!(request.kind(), FormKind::RegisterParticulier);
    }

    #[test]
    fn login_requires_phone_and_password() {
        let err = LoginForm::default().validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn password_confirmation_must_match() {
        let form = ParticulierForm {
            full_name: "Khady Fall".to_string(),
            phone: "77 000 00 00".to_string(),
            password: "secret-1".to_string(),
            confirm_password: "secret-2".to_string(),
        };
        assert_eq!(
            form.validate().unwrap_err().errors,
            vec![FieldError::PasswordMismatch]
        );
    }

    #[test]
    fn administration_needs_entity_and_institutional_email() {
        let form = AdministrationForm {
            institution_name: "AGEROUTE".to_string(),
            entity_type: None,
            institutional_email: "contact@ageroute".to_string(),
        };
        assert_eq!(
            form.validate().unwrap_err().errors,
            vec![
                FieldError::Required {
                    field: "entity_type"
                },
                FieldError::InvalidEmail {
                    field: "institutional_email"
                },
            ]
        );
    }

    #[test]
    fn entity_type_parses_from_label() {
        let parsed: EntityType = serde_json::from_str("\"Agence d'exécution\"").unwrap();
        assert_eq!(parsed, EntityType::AgenceExecution);
    }

    #[test]
    fn debug_redacts_passwords() {
        let form = LoginForm {
            phone: "77 111 22 33".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{form:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("hunter2"));
    }
}
