//! Policy holders onboarded by the agency.

use crate::model::validation::{is_valid_email, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};

pub type ClientId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kra_pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub phone: String,
    pub email: String,
    pub location: String,
    /// Loose references to policy ids.
    #[serde(default)]
    pub policies: Vec<String>,
}

impl Client {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("client.id", &self.id)?;
        require_text("client.name", &self.name)?;
        if !is_valid_email(&self.email) {
            return Err(ModelValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// `No policies`, `1 Policy` or `N Policies`.
    pub fn policy_count_label(&self) -> String {
        match self.policies.len() {
            0 => "No policies".to_string(),
            1 => "1 Policy".to_string(),
            count => format!("{count} Policies"),
        }
    }
}

/// Denormalized client reference carried on invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: ClientId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
