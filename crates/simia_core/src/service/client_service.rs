//! Client onboarding.

use crate::model::client::Client;
use crate::model::policy::PolicyType;
use crate::model::validation::{is_valid_email, normalize_kra_pin, ModelValidationError};
use crate::query::{ListQuery, Searchable};
use crate::repo::{PartyRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CLIENT_ID_PREFIX: &str = "c";
const POLICY_ID_PREFIX: &str = "pol";

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()];
        fields.extend(self.kra_pin.as_deref());
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientServiceError {
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidKraPin(String),
    Repo(RepoError),
}

impl Display for ClientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidKraPin(value) => write!(f, "invalid KRA PIN: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ClientServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(ModelValidationError::InvalidEmail(email)) => {
                Self::InvalidEmail(email)
            }
            other => Self::Repo(other),
        }
    }
}

/// Onboarding wizard input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnboardingForm {
    pub first_name: String,
    pub last_name: String,
    pub kra_pin: String,
    pub id_number: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub policy_type: Option<PolicyType>,
}

impl OnboardingForm {
    fn required(&self) -> [(&'static str, &str); 7] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("kraPin", self.kra_pin.as_str()),
            ("idNumber", self.id_number.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("location", self.location.as_str()),
        ]
    }
}

pub struct ClientService<R: PartyRepository> {
    repo: R,
}

impl<R: PartyRepository> ClientService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a client with one freshly issued policy id.
    pub fn onboard(&mut self, form: &OnboardingForm) -> Result<Client, ClientServiceError> {
        if let Some((field, _)) = form
            .required()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ClientServiceError::MissingField(field));
        }
        let email = form.email.trim();
        if !is_valid_email(email) {
            return Err(ClientServiceError::InvalidEmail(email.to_string()));
        }
        let kra_pin = normalize_kra_pin(&form.kra_pin)
            .map_err(|_| ClientServiceError::InvalidKraPin(form.kra_pin.trim().to_string()))?;

        let client = Client {
            id: self.repo.next_id(CLIENT_ID_PREFIX),
            name: format!("{} {}", form.first_name.trim(), form.last_name.trim()),
            kra_pin: Some(kra_pin),
            id_number: Some(form.id_number.trim().to_string()),
            phone: form.phone.trim().to_string(),
            email: email.to_string(),
            location: form.location.trim().to_string(),
            policies: vec![self.repo.next_id(POLICY_ID_PREFIX)],
        };
        let client = self.repo.create_client(client)?;
        info!(
            "event=client_onboard module=client status=ok client_id={} policies={}",
            client.id,
            client.policies.len()
        );
        Ok(client)
    }

    /// Clients matching `term` over name, email, phone and KRA PIN.
    pub fn search(&self, term: &str) -> Vec<Client> {
        ListQuery::new().search(term).apply(&self.repo.list_clients())
    }
}
