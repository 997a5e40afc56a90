//! Agency staff accounts and directory profiles.

use crate::model::validation::{is_valid_email, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type UserId = String;

/// Staff role. Drives what each session may see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Boss,
    Employee,
    Accountant,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Boss, Role::Employee, Role::Accountant];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boss => "BOSS",
            Self::Employee => "EMPLOYEE",
            Self::Accountant => "ACCOUNTANT",
        }
    }

    /// Revenue figures are visible to the director and the accountant.
    pub fn can_see_revenue(self) -> bool {
        matches!(self, Self::Boss | Self::Accountant)
    }

    pub fn can_create_tasks(self) -> bool {
        matches!(self, Self::Boss)
    }

    pub fn can_process_renewals(self) -> bool {
        matches!(self, Self::Employee)
    }

    pub fn can_invoice_renewals(self) -> bool {
        matches!(self, Self::Boss | Self::Accountant)
    }

    /// Employees only ever see work assigned to them.
    pub fn sees_only_own_tasks(self) -> bool {
        matches!(self, Self::Employee)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown role `{}`", value.trim()))
    }
}

/// Staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub avatar: String,
    pub email: String,
}

impl User {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("user.id", &self.id)?;
        require_text("user.name", &self.name)?;
        if !is_valid_email(&self.email) {
            return Err(ModelValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// First whitespace-separated part of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }
}

/// Online presence shown in the team directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    #[default]
    Offline,
    Away,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Away => "away",
        }
    }
}

impl FromStr for Presence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "away" => Ok(Self::Away),
            other => Err(format!("unknown presence `{other}`")),
        }
    }
}

/// Directory details layered over a `User`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberProfile {
    pub user_id: UserId,
    pub presence: Presence,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub hire_date: Option<String>,
    /// Percentage score, 0..=100.
    pub performance: Option<u8>,
    pub experience_years: Option<u8>,
    pub languages: Vec<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
}

impl MemberProfile {
    pub fn empty(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}
